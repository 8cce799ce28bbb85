#![no_main]
use libfuzzer_sys::fuzz_target;
use plainpnm::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce an equal image
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(decoded) = decode(text, enough::Unstoppable) else {
        return;
    };
    // Empty rows encode as blank lines, which the line filter drops
    if decoded.rows().iter().any(|row| row.is_empty()) {
        return;
    }

    let Ok(reencoded) = encode(&decoded, enough::Unstoppable) else {
        panic!("decoded image failed to encode");
    };
    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip mismatch");
});
