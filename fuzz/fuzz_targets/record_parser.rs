#![no_main]

use contagion::loader::{parse_cheater_record, parse_kill_record, parse_team_record};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Record lines are text; any line must parse or error, never panic
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = parse_kill_record(line);
        let _ = parse_cheater_record(line);
        let _ = parse_team_record(line);
    }
});
