#![no_main]

use libfuzzer_sys::fuzz_target;
use timeguard::validate::{extract_timestamp, normalize_offset, validate_line, IssueKind};

fuzz_target!(|data: &[u8]| {
    // Lossy decode mirrors how the stream reader treats invalid UTF-8
    let line = String::from_utf8_lossy(data);
    let result = validate_line(&line, None);

    if let Some(raw) = extract_timestamp(&line) {
        let _ = normalize_offset(raw);
    }
    if result.issues.contains(&IssueKind::ParseError) {
        assert_eq!(result.issues.len(), 1);
        assert!(result.cursor.is_none());
    }
});
