#![no_main]
use libfuzzer_sys::fuzz_target;
use mtpl::{Token, parse};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Any input parses, and the tokens reproduce it exactly
        let template = parse(s);
        let rebuilt: String = template.tokens().iter().map(Token::raw).collect();
        assert_eq!(rebuilt, s);
    }
});
