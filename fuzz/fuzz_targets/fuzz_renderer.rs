#![no_main]
use libfuzzer_sys::fuzz_target;
use mtpl::{ScalarValue, TemplateCache};
use std::collections::HashMap;

fn properties() -> HashMap<String, ScalarValue> {
    let mut props = HashMap::new();
    props.insert("0".to_string(), ScalarValue::from(0));
    props.insert("Name".to_string(), ScalarValue::from("fuzz"));
    props.insert("Value".to_string(), ScalarValue::from(-12.5));
    props.insert("Flag".to_string(), ScalarValue::from(true));
    props
}

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Render arbitrary templates through a small cache
        let cache = TemplateCache::new();
        let template = cache.get_or_parse(s);
        let _ = template.render_to_string(&properties(), None);
    }
});
