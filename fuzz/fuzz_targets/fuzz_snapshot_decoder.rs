//! Fuzz target: `snapshot::decode`
//!
//! Feeds arbitrary text to the status-file decoder.  It must never panic,
//! and anything it accepts must re-encode and decode to the same state.
//!
//! cargo fuzz run fuzz_snapshot_decoder

#![no_main]

use heaterfuel::snapshot::{decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(state) = decode(text) {
        let again = encode(&state).expect("decoded state must encode");
        assert_eq!(decode(&again), Ok(state), "round-trip mismatch");
    }
});
