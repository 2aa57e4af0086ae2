use es_core::codec;
use es_core::{Encoding, Text};
use proptest::prelude::*;

/// Code unit sequences mixing ASCII, BMP, astral pairs and lone surrogates.
fn any_units() -> impl Strategy<Value = Vec<u16>> {
    let piece = prop_oneof![
        4 => (0x20u8..0x7F).prop_map(|b| vec![b as u16]),
        2 => any::<char>().prop_map(|c| {
            let mut buf = [0u16; 2];
            c.encode_utf16(&mut buf).to_vec()
        }),
        1 => (0xD800u16..0xE000).prop_map(|u| vec![u]),
    ];
    proptest::collection::vec(piece, 0..24).prop_map(|v| v.concat())
}

fn has_pair(units: &[u16]) -> bool {
    units
        .windows(2)
        .any(|w| codec::is_high_surrogate(w[0]) && codec::is_low_surrogate(w[1]))
}

fn external_seq_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

proptest! {
    #[test]
    fn size_is_at_least_length(units in any_units()) {
        let t = Text::from_units(&units);
        prop_assert_eq!(t.length_in_code_units(), units.len());
        prop_assert!(t.size_in_bytes() >= t.length_in_code_units());
        prop_assert!(t.size(Encoding::External) >= t.length(Encoding::External));
        prop_assert_eq!(
            t.size_in_bytes() == t.length_in_code_units(),
            units.iter().all(|&u| u < 0x80)
        );
    }
}

proptest! {
    #[test]
    fn sizes_differ_only_for_pairs(units in any_units()) {
        let t = Text::from_units(&units);
        let pairs = has_pair(&units);
        prop_assert_eq!(t.size(Encoding::Compact) != t.size(Encoding::External), pairs);
        prop_assert_eq!(t.length(Encoding::Compact) != t.length(Encoding::External), pairs);
    }
}

proptest! {
    #[test]
    fn external_round_trip_preserves_units(units in any_units()) {
        let t = Text::from_units(&units);
        let back = Text::from_external(&t.to_external_bytes()).unwrap();
        prop_assert!(back.strict_equals(&t));
        prop_assert_eq!(back.units().collect::<Vec<_>>(), units);
    }
}

proptest! {
    #[test]
    fn rust_strings_encode_to_themselves(s in ".*") {
        let t = Text::from_str(&s);
        prop_assert_eq!(t.to_external_bytes(), s.as_bytes().to_vec());
        prop_assert_eq!(t.size(Encoding::External), s.len());
        prop_assert_eq!(t.length(Encoding::External), s.chars().count());
        prop_assert_eq!(t.to_string_lossy(), s);
    }
}

proptest! {
    #[test]
    fn external_copy_never_splits_a_sequence(units in any_units(), cap in 0usize..64) {
        let t = Text::from_units(&units);
        let full = t.to_external_bytes();
        let mut buf = vec![0u8; cap];
        let n = t.copy_all_to_buffer(&mut buf, Encoding::External);
        prop_assert!(n <= cap);
        prop_assert_eq!(&buf[..n], &full[..n]);
        prop_assert!(Text::from_external(&buf[..n]).is_ok());
        if n < full.len() {
            prop_assert!(full[n] & 0xC0 != 0x80);
            prop_assert!(n + external_seq_width(full[n]) > cap);
        }
    }
}

proptest! {
    #[test]
    fn compact_copy_keeps_pairs_together(units in any_units(), cap in 0usize..64) {
        let t = Text::from_units(&units);
        let mut buf = vec![0u8; cap];
        let n = t.copy_all_to_buffer(&mut buf, Encoding::Compact);
        prop_assert!(n <= cap);
        prop_assert_eq!(&buf[..n], &t.as_bytes()[..n]);
        let head = Text::from_compact(&buf[..n]).unwrap();
        let k = head.length_in_code_units();
        if k > 0 && k < units.len() {
            let split = codec::is_high_surrogate(units[k - 1]) && codec::is_low_surrogate(units[k]);
            prop_assert!(!split, "pair split at unit {}", k);
        }
    }
}

proptest! {
    #[test]
    fn start_past_end_writes_nothing(units in any_units(), past in 0usize..8, end in 0usize..64) {
        let t = Text::from_units(&units);
        let mut buf = [0u8; 64];
        let start = t.length_in_code_units() + past;
        prop_assert_eq!(t.copy_range_to_buffer(start, end, &mut buf, Encoding::Compact), 0);
        prop_assert_eq!(t.copy_range_to_buffer(start, end, &mut buf, Encoding::External), 0);
    }
}

#[test]
fn astral_text_sizes() {
    let t = Text::from_compact(b"str: \xed\xa0\x81\xed\xb0\x80").unwrap();
    assert_eq!(t.length(Encoding::Compact), 7);
    assert_eq!(t.length(Encoding::External), 6);
    assert_eq!(t.size(Encoding::Compact), 11);
    assert_eq!(t.size(Encoding::External), 9);
}

#[test]
fn single_digit_fits_single_byte() {
    let t = Text::from_str("3");
    let mut buf = [0u8; 1];
    assert_eq!(t.copy_range_to_buffer(0, 1, &mut buf, Encoding::External), 1);
    assert_eq!(&buf, b"3");
}

#[test]
fn ascii_ranges_clamp_and_truncate() {
    let t = Text::from_str("an ascii string");
    assert_eq!(t.size_in_bytes(), 15);

    let mut buf = [0u8; 16];
    let n = t.copy_range_to_buffer(3, 8, &mut buf, Encoding::Compact);
    assert_eq!(&buf[..n], b"ascii");

    let mut small = [0u8; 5];
    let n = t.copy_range_to_buffer(0, 11, &mut small, Encoding::Compact);
    assert_eq!(&small[..n], b"an as");

    assert_eq!(t.copy_range_to_buffer(16, 21, &mut buf, Encoding::External), 0);
}
