#![no_main]

use libfuzzer_sys::fuzz_target;
use notafiscal::payload::sanitize::{self, limits};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Normalization is total over arbitrary text and must respect
        // the layout limits exactly.
        let name = sanitize::normalize_text(s, limits::NAME);
        assert!(name.chars().count() <= limits::NAME);

        let digits = sanitize::digits_truncated(s, limits::CNPJ);
        assert!(digits.len() <= limits::CNPJ);
        assert!(digits.bytes().all(|b| b.is_ascii_digit()));
    }
});
