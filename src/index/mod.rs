pub mod control;
pub mod models;
pub mod walker;

use std::path::Path;

use crate::config::TraversalPolicy;
use crate::error::Result;
pub use control::ScanControl;
pub use models::*;
pub use walker::FsContentIndex;

/// Project content the locator searches.
pub trait ContentIndex: Send + Sync {
    /// Visits every entry (file or directory) whose path is accepted by
    /// `filter`. Iteration stops early when `visit` returns `Ok(false)`;
    /// an error from `visit` aborts the iteration and is returned as is.
    /// Entries the index cannot read are handled according to `on_error`.
    fn iterate(
        &self,
        filter: &dyn Fn(&Path) -> bool,
        visit: &mut dyn FnMut(&FileHandle) -> Result<bool>,
        on_error: TraversalPolicy,
        control: &ScanControl,
    ) -> Result<()>;

    /// Plain files at most `depth` levels below `dir`.
    fn list_files_under(
        &self,
        dir: &FileHandle,
        depth: usize,
        control: &ScanControl,
    ) -> Result<Vec<FileHandle>>;
}
