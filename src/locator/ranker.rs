use std::cmp::Ordering;

use serde::Serialize;

use crate::index::Candidate;

/// Total order over candidates: score, then canonical path (missing paths
/// last), then file name.
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    a.score
        .cmp(&b.score)
        .then_with(|| match (&a.file.canonical_path, &b.file.canonical_path) {
            (Some(x), Some(y)) => x.as_os_str().cmp(y.as_os_str()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.file.name.cmp(&b.file.name))
}

/// Deduplicated candidates of one resolution, in [`compare_candidates`] order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    /// Sorts once and drops candidates equal under the ordering key.
    pub fn from_candidates(mut candidates: Vec<Candidate>) -> Self {
        candidates.sort_by(compare_candidates);
        candidates.dedup_by(|later, earlier| compare_candidates(earlier, later) == Ordering::Equal);
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Picks the single best candidate.
///
/// Candidates whose path contains the preferred marker (`resources` by
/// default) are considered first; only when none does is the whole set
/// considered. Within the considered group the deepest parent directory
/// (longest parent path) wins, ties going to the earlier candidate in set
/// order.
pub struct CandidateRanker {
    preferred_marker: String,
}

impl CandidateRanker {
    pub fn new() -> Self {
        Self::with_marker("resources")
    }

    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            preferred_marker: marker.into(),
        }
    }

    pub fn pick<'a>(&self, set: &'a CandidateSet) -> Option<&'a Candidate> {
        let preferred = deepest(
            set.iter()
                .filter(|c| c.file.path_str().contains(self.preferred_marker.as_str())),
        );
        if preferred.is_some() {
            return preferred;
        }
        deepest(set.iter())
    }
}

impl Default for CandidateRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// First candidate with the strictly longest parent path.
fn deepest<'a>(candidates: impl Iterator<Item = &'a Candidate>) -> Option<&'a Candidate> {
    let mut best: Option<(usize, &Candidate)> = None;
    for candidate in candidates {
        let len = candidate.file.parent_path_len();
        match best {
            Some((best_len, _)) if len <= best_len => {}
            _ => best = Some((len, candidate)),
        }
    }
    best.map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FileHandle;
    use std::path::PathBuf;

    fn candidate(path: &str) -> Candidate {
        Candidate::directory_match(FileHandle::new(path, Some(PathBuf::from(path)), false))
    }

    fn picked(set: &CandidateSet) -> String {
        CandidateRanker::new()
            .pick(set)
            .map(|c| c.file.path_str().into_owned())
            .unwrap()
    }

    #[test]
    fn test_resources_preferred_over_deeper_match() {
        // Parent path lengths 20 vs 25.
        let d1 = "/p/resources/data/tt/a.txt";
        let d2 = "/p/other/longer/paths/t/t/a.txt";
        assert_eq!(FileHandle::new(d1, None, false).parent_path_len(), 20);
        assert_eq!(FileHandle::new(d2, None, false).parent_path_len(), 25);

        let set = CandidateSet::from_candidates(vec![candidate(d2), candidate(d1)]);
        assert_eq!(picked(&set), d1);
    }

    #[test]
    fn test_deepest_resources_candidate_wins() {
        let set = CandidateSet::from_candidates(vec![
            candidate("/p/resources/a/x.txt"),
            candidate("/p/resources/a/b/c/x.txt"),
            candidate("/p/build/very/deep/dir/tree/x.txt"),
        ]);
        assert_eq!(picked(&set), "/p/resources/a/b/c/x.txt");
    }

    #[test]
    fn test_fallback_longest_parent_path() {
        let set = CandidateSet::from_candidates(vec![
            candidate("/p/short/x.txt"),
            candidate("/p/much/longer/x.txt"),
        ]);
        assert_eq!(picked(&set), "/p/much/longer/x.txt");
    }

    #[test]
    fn test_fallback_tie_goes_to_smaller_canonical_path() {
        let set = CandidateSet::from_candidates(vec![
            candidate("/p/bbb/x.txt"),
            candidate("/p/aaa/x.txt"),
        ]);
        assert_eq!(picked(&set), "/p/aaa/x.txt");
    }

    #[test]
    fn test_tie_with_missing_canonical_path_goes_to_name() {
        let a = Candidate::directory_match(FileHandle::new("/p/aaa/b.txt", None, false));
        let b = Candidate::directory_match(FileHandle::new("/p/bbb/a.txt", None, false));
        let set = CandidateSet::from_candidates(vec![a, b]);
        assert_eq!(picked(&set), "/p/bbb/a.txt");
    }

    #[test]
    fn test_empty_set_has_no_winner() {
        let set = CandidateSet::default();
        assert!(CandidateRanker::new().pick(&set).is_none());
    }

    #[test]
    fn test_custom_marker() {
        let set = CandidateSet::from_candidates(vec![
            candidate("/p/fixtures/x.txt"),
            candidate("/p/resources/deeper/x.txt"),
        ]);
        let winner = CandidateRanker::with_marker("fixtures").pick(&set).unwrap();
        assert_eq!(winner.file.name, "x.txt");
        assert_eq!(winner.file.path, PathBuf::from("/p/fixtures/x.txt"));
    }

    #[test]
    fn test_order_puts_missing_canonical_path_last() {
        let with = candidate("/z/x.txt");
        let without = Candidate::directory_match(FileHandle::new("/a/x.txt", None, false));
        let set = CandidateSet::from_candidates(vec![without, with]);
        let names: Vec<_> = set.iter().map(|c| c.file.path_str().into_owned()).collect();
        assert_eq!(names, vec!["/z/x.txt", "/a/x.txt"]);
    }

    #[test]
    fn test_dedup_by_ordering_key() {
        let set = CandidateSet::from_candidates(vec![
            candidate("/p/a/x.txt"),
            candidate("/p/a/x.txt"),
            candidate("/p/b/x.txt"),
        ]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_dedup_merges_handles_without_canonical_path_and_same_name() {
        let set = CandidateSet::from_candidates(vec![
            Candidate::directory_match(FileHandle::new("/p/a/x.txt", None, false)),
            Candidate::directory_match(FileHandle::new("/p/b/x.txt", None, false)),
        ]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().file.path, PathBuf::from("/p/a/x.txt"));
    }
}
