//! Literal-to-resource resolution pipeline.
//!
//! token extraction -> content scan -> ranking -> document load. Every call
//! starts from scratch; nothing is cached between calls.

use serde::Serialize;

use crate::config::{LocatorConfig, TraversalPolicy};
use crate::error::Result;
use crate::index::{Candidate, ContentIndex, ResourceHandle, ScanControl};
use crate::locator::document::DocumentProvider;
use crate::locator::ranker::{CandidateRanker, CandidateSet};
use crate::locator::scanner::ContentScanner;
use crate::syntax::{SyntaxNode, TokenExtractor};

/// Everything one resolution produced, for diagnostics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resolution {
    pub token: String,
    pub candidates: CandidateSet,
    pub winner: Option<Candidate>,
    pub resource: Option<ResourceHandle>,
}

impl Resolution {
    fn unresolved(token: &str) -> Self {
        Self {
            token: token.to_string(),
            ..Self::default()
        }
    }
}

pub struct Resolver<'a, I: ContentIndex + ?Sized, D: DocumentProvider + ?Sized> {
    index: &'a I,
    documents: &'a D,
    extractor: TokenExtractor,
    ranker: CandidateRanker,
    max_depth: usize,
    on_error: TraversalPolicy,
}

impl<'a, I: ContentIndex + ?Sized, D: DocumentProvider + ?Sized> Resolver<'a, I, D> {
    pub fn new(index: &'a I, documents: &'a D) -> Self {
        Self::with_config(index, documents, &LocatorConfig::default())
    }

    pub fn with_config(index: &'a I, documents: &'a D, config: &LocatorConfig) -> Self {
        Self {
            index,
            documents,
            extractor: TokenExtractor::new(),
            ranker: CandidateRanker::with_marker(config.ranking.preferred_marker.clone()),
            max_depth: config.scan.max_depth,
            on_error: config.scan.on_traversal_error,
        }
    }

    /// The single best resource for the literal at `node`, if any.
    ///
    /// Traversal failures are returned as errors; cancellation and budget
    /// exhaustion resolve to nothing.
    pub fn resolve<N: SyntaxNode>(&self, node: &N, control: &ScanControl) -> Result<Option<ResourceHandle>> {
        Ok(self.explain(node, control)?.resource)
    }

    pub fn explain<N: SyntaxNode>(&self, node: &N, control: &ScanControl) -> Result<Resolution> {
        let token = self.extractor.extract(node);
        self.resolve_token(&token, control)
    }

    pub fn resolve_token(&self, token: &str, control: &ScanControl) -> Result<Resolution> {
        if token.is_empty() {
            tracing::debug!("empty token, nothing to resolve");
            return Ok(Resolution::unresolved(token));
        }

        let scanner = ContentScanner::new(self.index)
            .with_max_depth(self.max_depth)
            .with_error_policy(self.on_error);

        let candidates = match scanner.scan(token, control) {
            Ok(candidates) => candidates,
            Err(e) if e.is_interrupted() => {
                tracing::warn!("Resolution of {:?} stopped: {}", token, e);
                return Ok(Resolution::unresolved(token));
            }
            Err(e) => return Err(e),
        };

        let winner = self.ranker.pick(&candidates).cloned();
        let resource = winner.as_ref().and_then(|w| {
            let opened = self.documents.open(&w.file);
            if opened.is_none() {
                tracing::debug!("winner {} could not be opened", w.file.path.display());
            }
            opened
        });

        Ok(Resolution {
            token: token.to_string(),
            candidates,
            winner,
            resource,
        })
    }
}
