#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Unknown vocabulary must map somewhere, never panic.
        let status = notafiscal::gateway::GatewayStatus::parse(s);
        let _ = status.to_document_status();
    }
});
