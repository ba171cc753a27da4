//! Fuzz target for the Python parser, structure extraction and
//! cyclomatic scoring.

#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(module) = repometer_python::parse(source) {
        let structure = module.structure();
        let scores = module.cyclomatic();
        assert!(scores.iter().all(|&s| s >= 1));
        assert!(structure.imports.values().all(|&n| n >= 1));
    }
});
