use crate::error::{Result, TemplateError};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_MAX_ITEMS: usize = 1000;
pub const DEFAULT_MAX_TEMPLATE_LEN: usize = 1024;

/// Limits for a [`crate::cache::TemplateCache`].
///
/// ```toml
/// max_items = 1000
/// max_template_len = 1024
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Entry count at which the whole cache is flushed.
    pub max_items: usize,
    /// Templates longer than this (in characters) are never cached.
    pub max_template_len: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_template_len: DEFAULT_MAX_TEMPLATE_LEN,
        }
    }
}

impl CacheConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CacheConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_items == 0 {
            return Err(TemplateError::InvalidCacheLimit { name: "max_items" });
        }
        if self.max_template_len == 0 {
            return Err(TemplateError::InvalidCacheLimit {
                name: "max_template_len",
            });
        }
        Ok(())
    }
}
