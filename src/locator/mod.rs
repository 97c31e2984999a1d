//! Resolution of path-like string literals to project resources.

pub mod document;
pub mod project;
pub mod ranker;
pub mod resolver;
pub mod scanner;

pub use document::{DocumentProvider, FsDocumentProvider};
pub use project::Project;
pub use ranker::{compare_candidates, CandidateRanker, CandidateSet};
pub use resolver::{Resolution, Resolver};
pub use scanner::ContentScanner;
