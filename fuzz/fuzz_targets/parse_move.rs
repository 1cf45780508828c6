#![no_main]
use ai_wargame::game::core::CoordPair;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(mv) = CoordPair::try_from(input) {
            // Whatever parses must round-trip through the canonical form.
            let rendered = mv.to_string();
            assert_eq!(CoordPair::try_from(rendered.as_str()).unwrap(), mv);
        }
    }
});
