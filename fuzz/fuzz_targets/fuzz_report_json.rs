//! Fuzz target for report deserialization. Anything that parses must
//! serialize and parse back to the same value.

#![no_main]
use libfuzzer_sys::fuzz_target;
use repometer_types::AnalysisReport;

fuzz_target!(|data: &[u8]| {
    let Ok(report) = serde_json::from_slice::<AnalysisReport>(data) else {
        return;
    };
    let Ok(text) = serde_json::to_string(&report) else {
        return;
    };
    if let Ok(again) = serde_json::from_str::<AnalysisReport>(&text) {
        assert_eq!(again.repositories.len(), report.repositories.len());
    }
});
