use block::{decompress, Decoder, ErrorKind, Limits};
use cursor::push_varu32;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_reference_roundtrip(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let compressed = snap::raw::Encoder::new().compress_vec(&data).unwrap();
        prop_assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn prop_repetitive_roundtrip(
        unit in prop::collection::vec(any::<u8>(), 1..16),
        count in 1usize..512,
    ) {
        let data = unit.repeat(count);
        let compressed = snap::raw::Encoder::new().compress_vec(&data).unwrap();
        prop_assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn prop_arbitrary_input_never_panics(input in prop::collection::vec(any::<u8>(), 0..256)) {
        let decoder = Decoder::with_limits(Limits::for_testing());
        if let Ok(output) = decoder.decompress(&input) {
            prop_assert_eq!(output.len(), decoder.decompress_len(&input).unwrap());
        }
    }

    #[test]
    fn prop_run_length_copy(byte in any::<u8>(), length in 4usize..=11) {
        // One literal byte then a copy-1 with offset 1.
        let mut input = Vec::new();
        push_varu32(&mut input, u32::try_from(length + 1).unwrap());
        input.extend_from_slice(&[0x00, byte]);
        input.push((u8::try_from(length - 4).unwrap() << 2) | 0x01);
        input.push(0x01);
        prop_assert_eq!(decompress(&input).unwrap(), vec![byte; length + 1]);
    }

    #[test]
    fn prop_copy_offset_beyond_output_rejected(written in 1usize..60, extra in 1usize..200) {
        let offset = written + extra;
        let mut input = Vec::new();
        push_varu32(&mut input, u32::try_from(written + 4).unwrap());
        input.push(u8::try_from(written - 1).unwrap() << 2);
        input.extend(std::iter::repeat(b'a').take(written));
        input.push(0x0A);
        input.extend_from_slice(&u16::try_from(offset).unwrap().to_le_bytes());
        let err = decompress(&input).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidOffset);
    }
}
