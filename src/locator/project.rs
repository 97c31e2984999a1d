use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard};

use tokio_util::sync::CancellationToken;

use crate::config::LocatorConfig;
use crate::error::Result;
use crate::index::{ContentIndex, FsContentIndex, ResourceHandle};
use crate::locator::document::{DocumentProvider, FsDocumentProvider};
use crate::locator::resolver::{Resolution, Resolver};
use crate::syntax::SyntaxNode;

/// A project's content index plus the settings resolutions run under.
///
/// Resolutions hold a read lock on the index for their whole duration so they
/// never see a half-updated index; [`Project::update_index`] takes the write
/// lock.
pub struct Project<I: ContentIndex, D: DocumentProvider = FsDocumentProvider> {
    index: RwLock<I>,
    documents: D,
    config: LocatorConfig,
}

impl Project<FsContentIndex> {
    /// Opens the project rooted at `root`, reading its config file if present.
    pub fn open(root: &Path) -> Result<Self> {
        let config = LocatorConfig::load(root)?;
        Ok(Self::with_config(root, config))
    }

    pub fn with_config(root: &Path, config: LocatorConfig) -> Self {
        let index = FsContentIndex::from_config(root, &config.scan);
        Self::new(index, FsDocumentProvider, config)
    }
}

impl<I: ContentIndex, D: DocumentProvider> Project<I, D> {
    pub fn new(index: I, documents: D, config: LocatorConfig) -> Self {
        Self {
            index: RwLock::new(index),
            documents,
            config,
        }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    pub fn resolve<N: SyntaxNode>(&self, node: &N, cancel: CancellationToken) -> Result<Option<ResourceHandle>> {
        Ok(self.explain(node, cancel)?.resource)
    }

    pub fn explain<N: SyntaxNode>(&self, node: &N, cancel: CancellationToken) -> Result<Resolution> {
        let index = self.read_index();
        let control = self.config.scan.control(cancel);
        Resolver::with_config(&*index, &self.documents, &self.config).explain(node, &control)
    }

    pub fn explain_token(&self, token: &str, cancel: CancellationToken) -> Result<Resolution> {
        let index = self.read_index();
        let control = self.config.scan.control(cancel);
        Resolver::with_config(&*index, &self.documents, &self.config).resolve_token(token, &control)
    }

    /// Mutates the index once no resolution is reading it.
    pub fn update_index<F: FnOnce(&mut I)>(&self, update: F) {
        let mut index = self.index.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        update(&mut index);
    }

    fn read_index(&self) -> RwLockReadGuard<'_, I> {
        // A panicking writer leaves the index as it was; keep serving it.
        self.index.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
