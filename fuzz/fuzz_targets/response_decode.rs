//! Fuzz target for decoding CLI output.
//!
//! Decoding arbitrary output must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use streamrent_proto::ExecutionResponse;

fuzz_target!(|data: &str| {
    if let Ok(response) = ExecutionResponse::from_json_output(data) {
        let _ = response.failure();
        assert!(!response.digest.as_str().is_empty());
    }
});
