use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use walkdir::WalkDir;

use crate::config::{ScanConfig, TraversalPolicy};
use crate::error::{LocatorError, Result};
use crate::index::{ContentIndex, FileHandle, ScanControl};

/// Content index backed by the file system under a project root.
///
/// The outer iteration honours `.gitignore`/`.ignore` and hidden-file
/// settings like an IDE content root; bounded sub-walks see every file.
pub struct FsContentIndex {
    root: PathBuf,
    include_hidden: bool,
    respect_gitignore: bool,
}

impl FsContentIndex {
    /// Relative roots are resolved against the current directory so every
    /// handle carries an absolute path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self {
            root,
            include_hidden: false,
            respect_gitignore: true,
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &ScanConfig) -> Self {
        Self::new(root)
            .with_hidden(config.include_hidden)
            .with_gitignore(config.respect_gitignore)
    }

    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn with_gitignore(mut self, respect_gitignore: bool) -> Self {
        self.respect_gitignore = respect_gitignore;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Feeds walk results to `visit`, applying the error policy to failed entries.
    fn visit_walk(
        &self,
        walk: impl IntoIterator<Item = std::result::Result<PathBuf, ignore::Error>>,
        filter: &dyn Fn(&Path) -> bool,
        visit: &mut dyn FnMut(&FileHandle) -> Result<bool>,
        on_error: TraversalPolicy,
        control: &ScanControl,
    ) -> Result<()> {
        for entry in walk {
            control.checkpoint()?;

            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    let failed = error_path(&e).unwrap_or(self.root.as_path()).to_path_buf();
                    match on_error {
                        TraversalPolicy::Abort => {
                            return Err(LocatorError::Traversal {
                                path: failed,
                                message: e.to_string(),
                            })
                        }
                        TraversalPolicy::SkipSubtree => {
                            tracing::warn!("Skipping unreadable entry {}: {}", failed.display(), e);
                            continue;
                        }
                    }
                }
            };

            if !filter(&path) {
                continue;
            }

            let handle = FileHandle::from_path(&path, path.is_dir());
            if !visit(&handle)? {
                break;
            }
        }

        Ok(())
    }
}

/// Entry the walker failed on, when the error records one.
fn error_path(error: &ignore::Error) -> Option<&Path> {
    match error {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}

impl ContentIndex for FsContentIndex {
    fn iterate(
        &self,
        filter: &dyn Fn(&Path) -> bool,
        visit: &mut dyn FnMut(&FileHandle) -> Result<bool>,
        on_error: TraversalPolicy,
        control: &ScanControl,
    ) -> Result<()> {
        if !self.root.is_dir() {
            return Err(LocatorError::FileNotFound(self.root.display().to_string()));
        }

        let walker = WalkBuilder::new(&self.root)
            .hidden(!self.include_hidden)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .parents(self.respect_gitignore)
            .build()
            .map(|entry| entry.map(ignore::DirEntry::into_path));

        self.visit_walk(walker, filter, visit, on_error, control)
    }

    fn list_files_under(
        &self,
        dir: &FileHandle,
        depth: usize,
        control: &ScanControl,
    ) -> Result<Vec<FileHandle>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&dir.path).max_depth(depth) {
            control.checkpoint()?;

            let entry = entry.map_err(|e| LocatorError::Traversal {
                path: e.path().unwrap_or(dir.path.as_path()).to_path_buf(),
                message: e.to_string(),
            })?;

            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            files.push(FileHandle::from_path(path, false));
        }

        Ok(files)
    }
}
