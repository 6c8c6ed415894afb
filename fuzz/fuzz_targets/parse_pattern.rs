#![no_main]

use bitsieve::pattern::{BitPattern, MAX_WIDTH};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let bp = BitPattern::parse(text);
    assert!(bp.width() <= MAX_WIDTH);
    assert_eq!(bp.active() & !bp.mask(), 0);
    // The canonical form must re-parse to the same pattern.
    assert_eq!(BitPattern::parse(&bp.to_string()), bp);
});
