#![no_main]

use libfuzzer_sys::fuzz_target;
use rcs_log::LogParser;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut parser = LogParser::new();
    for line in text.split('\n') {
        if parser.process_line(line).is_err() {
            return;
        }
    }
    let _ = parser.finish();
});
