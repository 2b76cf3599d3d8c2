//! Fuzz target for the command line parser.

#![no_main]

use libfuzzer_sys::fuzz_target;
use streamrent_app::{Command, commands};

fuzz_target!(|data: &str| {
    if let Command::SetName { name } = commands::parse(data) {
        assert!(!name.is_empty());
        assert_eq!(name.trim(), name);
    }
});
