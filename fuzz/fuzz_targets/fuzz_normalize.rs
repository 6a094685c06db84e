#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(original) = serde_json::from_str::<serde_json::Value>(s) {
            let once = docview::normalize_json(&original);
            let twice = docview::normalize_json(&once);
            if once != twice {
                panic!(
                    "Normalization is not idempotent!\nInput: {}\nOnce: {}\nTwice: {}",
                    s,
                    serde_json::to_string_pretty(&once).unwrap(),
                    serde_json::to_string_pretty(&twice).unwrap()
                );
            }
        }
    }
});
