#![no_main]

use block::{Decoder, Elements, Limits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits::for_testing();
    let decoder = Decoder::with_limits(limits.clone());

    let decoded = decoder.decompress(data);
    let walked = Elements::new(data, &limits).and_then(Elements::finish);

    // Decoding and element validation must agree on every input.
    match (&decoded, &walked) {
        (Ok(output), Ok(len)) => assert_eq!(output.len(), *len),
        (Err(a), Err(b)) => assert_eq!(a, b),
        _ => panic!("decoder and element walk disagree: {decoded:?} vs {walked:?}"),
    }

    if let Ok(output) = decoded {
        let mut buf = vec![0u8; output.len()];
        let written = decoder.decompress_into(data, &mut buf).unwrap();
        assert_eq!(&buf[..written], &output[..]);
    }
});
