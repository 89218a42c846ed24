use crate::config::CacheConfig;
use crate::parser::parse;
use crate::template::Template;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, trace};

/// Shares parsed templates between calls that log the same template string.
///
/// The cache never evicts single entries: once it holds `max_items`
/// templates the next insertion clears it. Templates are expected to form a
/// small, stable set; a flush only happens when callers log preformatted
/// messages instead of templates.
pub struct TemplateCache {
    templates: RwLock<HashMap<String, Arc<Template>>>,
    config: CacheConfig,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn is_cacheable(&self, template: &str) -> bool {
        template.len() <= self.config.max_template_len
            || template.chars().count() <= self.config.max_template_len
    }

    /// Return the cached template for `template`, parsing it on a miss.
    pub fn get_or_parse(&self, template: &str) -> Arc<Template> {
        if !self.is_cacheable(template) {
            trace!(len = template.len(), "Template too long to cache");
            return Arc::new(parse(template));
        }

        if let Some(found) = self.get(template) {
            return found;
        }

        // Parse without holding the lock; a racing thread may parse the
        // same string and the later insert wins.
        let parsed = Arc::new(parse(template));

        if let Ok(mut templates) = self.templates.write() {
            if templates.len() >= self.config.max_items {
                debug!(
                    evicted = templates.len(),
                    max_items = self.config.max_items,
                    "Template cache full, clearing"
                );
                templates.clear();
            }
            templates.insert(template.to_string(), Arc::clone(&parsed));
        }

        parsed
    }

    pub fn get(&self, template: &str) -> Option<Arc<Template>> {
        let templates = self.templates.read().ok()?;
        templates.get(template).cloned()
    }

    pub fn len(&self) -> usize {
        self.templates.read().map_or(0, |templates| templates.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut templates) = self.templates.write() {
            templates.clear();
        }
    }
}

static TEMPLATE_CACHE: Lazy<TemplateCache> = Lazy::new(TemplateCache::new);

/// The process-wide cache with default limits.
pub fn global() -> &'static TemplateCache {
    &TEMPLATE_CACHE
}

/// Parse `template` through the process-wide cache.
pub fn parse_cached(template: &str) -> Arc<Template> {
    TEMPLATE_CACHE.get_or_parse(template)
}
