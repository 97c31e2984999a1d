//! Project-level configuration read from `.resource-locator.yml`.
//!
//! Format:
//! ```yaml
//! scan:
//!   max_depth: 3
//!   max_entries: 500000     # null disables the entry budget
//!   timeout_ms: 10000       # null disables the wall-clock budget
//!   on_traversal_error: abort   # abort | skip
//!   include_hidden: false
//!   respect_gitignore: true
//! ranking:
//!   preferred_marker: resources
//! ```
//!
//! Every field is optional; a missing file means defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::{LocatorError, Result};
use crate::index::ScanControl;

/// Name of the configuration file at the project root
pub const CONFIG_FILENAME: &str = ".resource-locator.yml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub scan: ScanConfig,
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Depth of the sub-walk that picks a matching directory's representative file
    pub max_depth: usize,

    /// Entries visited across the whole scan before giving up
    pub max_entries: Option<usize>,

    /// Wall-clock budget for one scan
    pub timeout_ms: Option<u64>,

    pub on_traversal_error: TraversalPolicy,

    pub include_hidden: bool,

    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_entries: Some(500_000),
            timeout_ms: Some(10_000),
            on_traversal_error: TraversalPolicy::Abort,
            include_hidden: false,
            respect_gitignore: true,
        }
    }
}

impl ScanConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Fresh per-call control carrying this configuration's budget.
    pub fn control(&self, cancel: CancellationToken) -> ScanControl {
        ScanControl::new(cancel, self.max_entries, self.timeout())
    }
}

/// What a failed traversal does to the scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalPolicy {
    /// Fail the whole resolution.
    #[default]
    Abort,
    /// Log, drop the offending directory and keep scanning.
    #[serde(rename = "skip")]
    SkipSubtree,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Path substring whose candidates win over everything else
    pub preferred_marker: String,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            preferred_marker: "resources".to_string(),
        }
    }
}

impl LocatorConfig {
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| LocatorError::Config(format!("Invalid {}: {}", CONFIG_FILENAME, e)))
    }

    /// Reads the configuration at `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILENAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config = Self::parse(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
