use std::fs::File;

use crate::index::{FileHandle, ResourceHandle};

/// Turns a winning file into something the caller can open.
pub trait DocumentProvider: Send + Sync {
    /// `None` when the file can no longer be opened.
    fn open(&self, file: &FileHandle) -> Option<ResourceHandle>;
}

/// Opens files straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentProvider;

impl DocumentProvider for FsDocumentProvider {
    fn open(&self, file: &FileHandle) -> Option<ResourceHandle> {
        let opened = File::open(&file.path).and_then(|f| f.metadata());
        match opened {
            Ok(metadata) if metadata.is_file() => Some(ResourceHandle {
                path: file.path.clone(),
                canonical_path: file.canonical_path.clone(),
                size: metadata.len(),
            }),
            Ok(_) => {
                tracing::debug!("{} is no longer a regular file", file.path.display());
                None
            }
            Err(e) => {
                tracing::debug!("cannot open {}: {}", file.path.display(), e);
                None
            }
        }
    }
}
