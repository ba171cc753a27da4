//! Fuzz target for `repometer.toml` parsing.

#![no_main]
use libfuzzer_sys::fuzz_target;
use repometer_config::TomlConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = TomlConfig::parse(s);
    }
});
