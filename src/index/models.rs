use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Score bucket shared by every directory-anchored match.
pub const DIRECTORY_MATCH_SCORE: i32 = 10;

/// A file or directory entry of the content index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub path: PathBuf,
    /// Symlink- and case-resolved path; `None` when resolution failed.
    pub canonical_path: Option<PathBuf>,
    pub name: String,
    pub parent_path: PathBuf,
    pub is_directory: bool,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>, canonical_path: Option<PathBuf>, is_directory: bool) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent_path = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            path,
            canonical_path,
            name,
            parent_path,
            is_directory,
        }
    }

    /// Handle for a real entry on disk. Canonicalization failures leave
    /// `canonical_path` empty instead of failing.
    pub fn from_path(path: &Path, is_directory: bool) -> Self {
        Self::new(path, std::fs::canonicalize(path).ok(), is_directory)
    }

    pub fn path_str(&self) -> Cow<'_, str> {
        self.path.to_string_lossy()
    }

    /// Length of the parent path in characters.
    pub fn parent_path_len(&self) -> usize {
        self.parent_path.to_string_lossy().chars().count()
    }
}

/// A scored file eligible for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub score: i32,
    pub file: FileHandle,
}

impl Candidate {
    pub fn new(score: i32, file: FileHandle) -> Self {
        Self { score, file }
    }

    pub fn directory_match(file: FileHandle) -> Self {
        Self::new(DIRECTORY_MATCH_SCORE, file)
    }
}

/// An opened, host-usable view of the resolved file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHandle {
    pub path: PathBuf,
    pub canonical_path: Option<PathBuf>,
    pub size: u64,
}
