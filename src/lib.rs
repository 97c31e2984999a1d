pub mod config;
pub mod error;
pub mod index;
pub mod languages;
pub mod locator;
pub mod syntax;

use once_cell::sync::Lazy;

pub use config::{LocatorConfig, RankingConfig, ScanConfig, TraversalPolicy, CONFIG_FILENAME};
pub use error::{LocatorError, Result};
pub use index::{
    Candidate, ContentIndex, FileHandle, FsContentIndex, ResourceHandle, ScanControl,
    DIRECTORY_MATCH_SCORE,
};
pub use languages::{LanguageGrammar, LanguageRegistry, NodeClass};
pub use locator::{
    compare_candidates, CandidateRanker, CandidateSet, ContentScanner, DocumentProvider,
    FsDocumentProvider, Project, Resolution, Resolver,
};
pub use syntax::{ParsedFile, Parser, SourceNode, SyntaxNode, TokenExtractor};

/// Global language registry instance (lazily initialized)
pub static REGISTRY: Lazy<LanguageRegistry> = Lazy::new(LanguageRegistry::new);
