//! Fuzz target for line classification and pseudo-complexity.
//!
//! Runs every comment syntax over arbitrary text and checks the line
//! invariants hold.

#![no_main]
use libfuzzer_sys::fuzz_target;
use repometer_content::{line_stats, pseudo_complexity};
use repometer_lang::LANGUAGES;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for lang in LANGUAGES {
        let stats = line_stats(&text, lang.comments);
        assert!(stats.num_blank <= stats.loc);
        assert!(stats.num_comments + stats.num_blank <= stats.loc);
    }
    let pc = pseudo_complexity(&text);
    assert_eq!(pc.decision_points, pc.keyword_hits + pc.comprehensions);
});
