#![no_main]

use cursor::{decode_varu32, push_varu32, MAX_VARU32_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((value, next)) = decode_varu32(data, 0) {
        assert!(next >= 1 && next <= MAX_VARU32_LEN);

        // Canonical re-encoding decodes to the same value.
        let mut encoded = Vec::new();
        push_varu32(&mut encoded, value);
        assert_eq!(decode_varu32(&encoded, 0).unwrap().0, value);
    }
});
