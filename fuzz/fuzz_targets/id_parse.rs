//! Fuzz target for identifier parsing.
//!
//! Any accepted input must round-trip through its canonical text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use streamrent_proto::ObjectId;

fuzz_target!(|data: &str| {
    if let Ok(id) = data.parse::<ObjectId>() {
        let text = id.as_str();
        assert!(text.starts_with("0x"));
        assert!(!text[2..].chars().any(|ch| ch.is_ascii_uppercase()));
        assert_eq!(text.parse::<ObjectId>().ok(), Some(id.clone()));
    }
});
