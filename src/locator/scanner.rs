use crate::config::TraversalPolicy;
use crate::error::Result;
use crate::index::{Candidate, ContentIndex, FileHandle, ScanControl};
use crate::locator::ranker::CandidateSet;

/// Finds one representative file per matching directory.
///
/// Only directories whose path contains the token seed candidates; matching
/// plain files are ignored. Each directory contributes its lexicographically
/// smallest file within `max_depth` levels, or nothing if it has none.
pub struct ContentScanner<'a, I: ContentIndex + ?Sized> {
    index: &'a I,
    max_depth: usize,
    on_error: TraversalPolicy,
}

impl<'a, I: ContentIndex + ?Sized> ContentScanner<'a, I> {
    pub fn new(index: &'a I) -> Self {
        Self {
            index,
            max_depth: 3,
            on_error: TraversalPolicy::Abort,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_error_policy(mut self, on_error: TraversalPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn scan(&self, token: &str, control: &ScanControl) -> Result<CandidateSet> {
        let mut candidates = Vec::new();
        let filter = |path: &std::path::Path| path.to_string_lossy().contains(token);

        self.index.iterate(
            &filter,
            &mut |entry| {
                if !entry.is_directory {
                    return Ok(true);
                }
                match self.representative(entry, control) {
                    Ok(Some(file)) => candidates.push(Candidate::directory_match(file)),
                    Ok(None) => {}
                    Err(e) if e.is_interrupted() => return Err(e),
                    Err(e) => match self.on_error {
                        TraversalPolicy::Abort => return Err(e),
                        TraversalPolicy::SkipSubtree => {
                            tracing::warn!("Skipping {}: {}", entry.path.display(), e);
                        }
                    },
                }
                Ok(true)
            },
            self.on_error,
            control,
        )?;

        let set = CandidateSet::from_candidates(candidates);
        tracing::debug!(
            "scan for {:?} produced {} candidates after {} entries",
            token,
            set.len(),
            control.visited()
        );
        Ok(set)
    }

    /// Lexicographically smallest file path under `dir`, depth-bounded.
    pub fn representative(&self, dir: &FileHandle, control: &ScanControl) -> Result<Option<FileHandle>> {
        let files = self.index.list_files_under(dir, self.max_depth, control)?;
        // Plain string order, not component order: `b-c` sorts before `b/c`.
        Ok(files
            .into_iter()
            .min_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LocatorError;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    /// In-memory index: directory path -> files listed under it.
    #[derive(Default)]
    struct FakeIndex {
        entries: Vec<FileHandle>,
        listings: BTreeMap<PathBuf, Vec<FileHandle>>,
        failing: Vec<PathBuf>,
    }

    impl FakeIndex {
        fn dir(mut self, path: &str, files: &[&str]) -> Self {
            let dir = FileHandle::new(path, Some(PathBuf::from(path)), true);
            let listed = files
                .iter()
                .map(|f| {
                    let p = Path::new(path).join(f);
                    FileHandle::new(p.clone(), Some(p), false)
                })
                .collect::<Vec<_>>();
            self.entries.push(dir);
            self.entries.extend(listed.iter().cloned());
            self.listings.insert(PathBuf::from(path), listed);
            self
        }

        fn failing(mut self, path: &str) -> Self {
            self.entries.push(FileHandle::new(path, None, true));
            self.failing.push(PathBuf::from(path));
            self
        }
    }

    impl ContentIndex for FakeIndex {
        fn iterate(
            &self,
            filter: &dyn Fn(&Path) -> bool,
            visit: &mut dyn FnMut(&FileHandle) -> Result<bool>,
            _on_error: TraversalPolicy,
            control: &ScanControl,
        ) -> Result<()> {
            for entry in &self.entries {
                control.checkpoint()?;
                if filter(&entry.path) && !visit(entry)? {
                    break;
                }
            }
            Ok(())
        }

        fn list_files_under(
            &self,
            dir: &FileHandle,
            _depth: usize,
            _control: &ScanControl,
        ) -> Result<Vec<FileHandle>> {
            if self.failing.contains(&dir.path) {
                return Err(LocatorError::Traversal {
                    path: dir.path.clone(),
                    message: "permission denied".to_string(),
                });
            }
            Ok(self.listings.get(&dir.path).cloned().unwrap_or_default())
        }
    }

    fn paths(set: &CandidateSet) -> Vec<String> {
        set.iter().map(|c| c.file.path_str().into_owned()).collect()
    }

    #[test]
    fn test_one_representative_per_directory() {
        let index = FakeIndex::default()
            .dir("/proj/resources/testdata/foo", &["b.txt", "a.txt"])
            .dir("/proj/other/testdata/foo", &["a.txt"]);

        let set = ContentScanner::new(&index)
            .scan("testdata/foo", &ScanControl::unlimited())
            .unwrap();

        assert_eq!(
            paths(&set),
            vec![
                "/proj/other/testdata/foo/a.txt",
                "/proj/resources/testdata/foo/a.txt",
            ]
        );
        assert!(set.iter().all(|c| c.score == 10));
    }

    #[test]
    fn test_matching_files_do_not_seed_candidates() {
        let index = FakeIndex::default().dir("/proj/data", &["testdata-foo.txt"]);

        let set = ContentScanner::new(&index)
            .scan("testdata-foo", &ScanControl::unlimited())
            .unwrap();

        assert!(set.is_empty());
    }

    #[test]
    fn test_empty_directory_contributes_nothing() {
        let index = FakeIndex::default()
            .dir("/proj/testdata/empty", &[])
            .dir("/proj/testdata/full", &["x.txt"]);

        let set = ContentScanner::new(&index)
            .scan("testdata", &ScanControl::unlimited())
            .unwrap();

        assert_eq!(paths(&set), vec!["/proj/testdata/full/x.txt"]);
    }

    #[test]
    fn test_traversal_error_aborts_scan() {
        let index = FakeIndex::default()
            .dir("/proj/testdata/ok", &["x.txt"])
            .failing("/proj/testdata/locked");

        let err = ContentScanner::new(&index)
            .scan("testdata", &ScanControl::unlimited())
            .unwrap_err();

        assert!(matches!(err, LocatorError::Traversal { .. }));
    }

    #[test]
    fn test_traversal_error_skipped_when_configured() {
        let index = FakeIndex::default()
            .failing("/proj/testdata/locked")
            .dir("/proj/testdata/ok", &["x.txt"]);

        let set = ContentScanner::new(&index)
            .with_error_policy(TraversalPolicy::SkipSubtree)
            .scan("testdata", &ScanControl::unlimited())
            .unwrap();

        assert_eq!(paths(&set), vec!["/proj/testdata/ok/x.txt"]);
    }

    #[test]
    fn test_budget_exhaustion_is_not_skipped() {
        let index = FakeIndex::default()
            .dir("/proj/testdata/a", &["x.txt"])
            .dir("/proj/testdata/b", &["y.txt"]);
        let control = ScanControl::new(Default::default(), Some(2), None);

        let err = ContentScanner::new(&index)
            .with_error_policy(TraversalPolicy::SkipSubtree)
            .scan("testdata", &control)
            .unwrap_err();

        assert!(err.is_interrupted());
    }

    #[test]
    fn test_representative_is_smallest_path() {
        let index = FakeIndex::default().dir("/proj/d", &["z.txt", "sub/a.txt", "m.txt"]);
        let dir = FileHandle::new("/proj/d", None, true);

        let rep = ContentScanner::new(&index)
            .representative(&dir, &ScanControl::unlimited())
            .unwrap()
            .unwrap();

        assert_eq!(rep.path, PathBuf::from("/proj/d/m.txt"));
    }

    #[test]
    fn test_representative_uses_string_order() {
        let index = FakeIndex::default().dir("/proj/d", &["sub/a.txt", "sub-x.txt"]);
        let dir = FileHandle::new("/proj/d", None, true);

        let rep = ContentScanner::new(&index)
            .representative(&dir, &ScanControl::unlimited())
            .unwrap()
            .unwrap();

        assert_eq!(rep.name, "sub-x.txt");
    }
}
