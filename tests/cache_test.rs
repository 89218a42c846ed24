use mtpl::cache::{global, parse_cached};
use mtpl::config::{DEFAULT_MAX_ITEMS, DEFAULT_MAX_TEMPLATE_LEN};
use mtpl::{CacheConfig, ScalarValue, TemplateCache};
use rayon::prelude::*;
use serial_test::serial;
use std::collections::HashMap;
use std::sync::Arc;

#[test]
fn test_default_limits() {
    let cache = TemplateCache::new();
    assert_eq!(cache.config().max_items, 1000);
    assert_eq!(cache.config().max_template_len, 1024);
    assert_eq!(DEFAULT_MAX_ITEMS, 1000);
    assert_eq!(DEFAULT_MAX_TEMPLATE_LEN, 1024);
}

#[test]
fn test_overflow_flushes_everything() {
    let cache = TemplateCache::new();
    let templates: Vec<String> = (0..1000).map(|i| format!("Item {{Id}} #{i}")).collect();
    let first: Vec<_> = templates.iter().map(|t| cache.get_or_parse(t)).collect();
    assert_eq!(cache.len(), 1000);

    // Still cached before the ceiling is crossed.
    assert!(Arc::ptr_eq(&first[0], &cache.get_or_parse(&templates[0])));

    cache.get_or_parse("one more {Thing}");
    assert_eq!(cache.len(), 1);

    for (template, before) in templates.iter().zip(&first).take(10) {
        let after = cache.get_or_parse(template);
        assert!(!Arc::ptr_eq(before, &after), "{template} should have been evicted");
        assert_eq!(before.as_ref(), after.as_ref());
    }
}

#[test]
fn test_long_template_is_never_cached() {
    let cache = TemplateCache::new();
    let long = format!("{} {{Name}}", "x".repeat(1100));
    let first = cache.get_or_parse(&long);
    let second = cache.get_or_parse(&long);
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(cache.get(&long).is_none());
    assert!(cache.is_empty());
    assert_eq!(first.token_count(), 2);
}

#[test]
fn test_exactly_max_length_is_cached() {
    let cache = TemplateCache::new();
    let edge = "y".repeat(1024);
    let first = cache.get_or_parse(&edge);
    let second = cache.get_or_parse(&edge);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_custom_config() {
    let cache = TemplateCache::with_config(CacheConfig::from_toml_str("max_items = 2").unwrap());
    cache.get_or_parse("{A}");
    cache.get_or_parse("{B}");
    cache.get_or_parse("{C}");
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_concurrent_access() {
    let cache = TemplateCache::new();
    let templates: Vec<String> = (0..50).map(|i| format!("Worker {{W}} step {i}")).collect();

    (0..2000).into_par_iter().for_each(|i| {
        let template = cache.get_or_parse(&templates[i % templates.len()]);
        let mut props = HashMap::new();
        props.insert("W".to_string(), ScalarValue::from(i));
        let rendered = template.render_to_string(&props, None).unwrap();
        assert_eq!(rendered, format!("Worker {i} step {}", i % templates.len()));
    });

    assert_eq!(cache.len(), templates.len());
}

#[test]
fn test_concurrent_overflow_stays_bounded() {
    let cache = TemplateCache::with_config(CacheConfig {
        max_items: 16,
        max_template_len: 1024,
    });

    (0..1000).into_par_iter().for_each(|i| {
        cache.get_or_parse(&format!("message {i}"));
    });

    assert!(cache.len() <= 16);
}

#[test]
#[serial]
fn test_global_cache_shares_instances() {
    global().clear();
    let first = parse_cached("Global {Name}");
    let second = parse_cached("Global {Name}");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(global().len(), 1);
}

#[test]
#[serial]
fn test_global_cache_clear() {
    parse_cached("to be cleared");
    global().clear();
    assert!(global().get("to be cleared").is_none());
}
