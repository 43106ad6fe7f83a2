use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Catalogue profile shared read-only by every record in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueProfile {
    #[serde(default = "CatalogueProfile::default_name")]
    pub name: String,
    pub base_url: String,
    /// Catalogue search field used for identifier lookups.
    #[serde(default = "CatalogueProfile::default_search_field")]
    pub search_field: String,
    #[serde(default = "CatalogueProfile::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CatalogueProfile {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            name: Self::default_name(),
            base_url: base_url.into(),
            search_field: Self::default_search_field(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }

    pub fn default_name() -> String {
        "DSV01".to_owned()
    }
    pub fn default_search_field() -> String {
        "12".to_owned()
    }
    pub fn default_timeout_secs() -> u64 {
        30
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default)]
    pub catalogue: Option<CatalogueProfile>,
    #[serde(default)]
    pub import_folder: Option<PathBuf>,
    #[serde(default)]
    pub collections: Vec<String>,
}

impl ImportConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        serde_yaml::from_str(&yaml).with_context(|| format!("parse config: {}", path.display()))
    }
}
