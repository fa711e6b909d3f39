#![no_main]

use libfuzzer_sys::fuzz_target;
use pinboard_web::parse_encoded_input;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        let _ = parse_encoded_input(json);
    }
});
