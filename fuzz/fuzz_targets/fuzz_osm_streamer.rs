#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either convert or fail, never panic
    let mut streamer = osm2json::osm::OsmStreamer::new(Cursor::new(data));

    for _ in 0..1000 {
        match streamer.next_record() {
            Ok(Some(record)) => {
                assert!(record.json.starts_with('{'));
                assert!(record.json.ends_with('}'));
            }
            Ok(None) | Err(_) => break,
        }
    }
});
