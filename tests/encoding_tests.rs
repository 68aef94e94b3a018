#![allow(clippy::unwrap_used)]

//! Percent-encoding surface: the set predicates, the single-byte
//! encoder, and the decoder, exercised over the whole byte range.

use urlkit::{EncodeSet, encode_byte, is_in_set, is_percent_encoded, percent_decode, percent_encode};

const SETS: [EncodeSet; 5] = [
    EncodeSet::None,
    EncodeSet::C0Control,
    EncodeSet::Fragment,
    EncodeSet::Path,
    EncodeSet::Userinfo,
];

#[test]
fn test_membership_matches_encoded_length() {
    for set in SETS {
        for byte in 0..=u8::MAX {
            let encoded = encode_byte(byte, set);
            if is_in_set(byte, set) {
                assert_eq!(encoded.len(), 3, "{byte:#04x} in {set:?}");
                assert!(encoded.is_encoded());
            } else {
                assert_eq!(encoded.len(), 1);
                assert_eq!(encoded.as_bytes(), [byte]);
            }
        }
    }
}

#[test]
fn test_nesting_is_strict() {
    let chain = [
        EncodeSet::C0Control,
        EncodeSet::Fragment,
        EncodeSet::Path,
        EncodeSet::Userinfo,
    ];
    for pair in chain.windows(2) {
        let (smaller, larger) = (pair[0], pair[1]);
        let mut proper = false;
        for byte in 0..=u8::MAX {
            if is_in_set(byte, smaller) {
                assert!(is_in_set(byte, larger), "{smaller:?} ⊄ {larger:?} at {byte:#04x}");
            } else if is_in_set(byte, larger) {
                proper = true;
            }
        }
        assert!(proper, "{smaller:?} should be a proper subset of {larger:?}");
    }
}

#[test]
fn test_exact_set_contents() {
    // The members beyond the c0 baseline, per set.
    let fragment_extra = [0x20, 0x22, 0x3C, 0x3E, 0x60];
    let path_extra = [0x23, 0x3F, 0x7B, 0x7D];
    let userinfo_extra = [0x2F, 0x3A, 0x3B, 0x3D, 0x40, 0x5B, 0x5C, 0x5D, 0x5E, 0x7C];

    for byte in 0x20..=0x7E {
        assert_eq!(
            is_in_set(byte, EncodeSet::Fragment),
            fragment_extra.contains(&byte),
            "fragment at {byte:#04x}"
        );
        assert_eq!(
            is_in_set(byte, EncodeSet::Path),
            fragment_extra.contains(&byte) || path_extra.contains(&byte),
            "path at {byte:#04x}"
        );
        assert_eq!(
            is_in_set(byte, EncodeSet::Userinfo),
            fragment_extra.contains(&byte)
                || path_extra.contains(&byte)
                || userinfo_extra.contains(&byte),
            "userinfo at {byte:#04x}"
        );
    }

    // The c0 baseline itself.
    for byte in 0..=u8::MAX {
        let expected = byte <= 0x1F || byte > 0x7E;
        assert_eq!(is_in_set(byte, EncodeSet::C0Control), expected);
    }
}

#[test]
fn test_spec_examples() {
    assert_eq!(encode_byte(0x20, EncodeSet::Path).to_string(), "%20");
    assert_eq!(encode_byte(0x20, EncodeSet::None).to_string(), "%20");
    assert_eq!(encode_byte(0x7E, EncodeSet::Userinfo).to_string(), "~");
}

#[test]
fn test_uppercase_hex_digits() {
    for byte in 0..=u8::MAX {
        let encoded = encode_byte(byte, EncodeSet::None);
        let bytes = encoded.as_bytes();
        assert_eq!(bytes[0], b'%');
        for &digit in &bytes[1..] {
            assert!(
                digit.is_ascii_digit() || (b'A'..=b'F').contains(&digit),
                "lowercase or invalid hex in {encoded}"
            );
        }
    }
}

#[test]
fn test_decode_inverts_encode() {
    for set in SETS {
        for byte in 0..=u8::MAX {
            let encoded = encode_byte(byte, set);
            assert_eq!(percent_decode(encoded.as_bytes()), [byte]);
        }
    }
}

#[test]
fn test_decode_passthrough_for_invalid_triples() {
    assert_eq!(percent_decode(b"%"), b"%");
    assert_eq!(percent_decode(b"%1"), b"%1");
    assert_eq!(percent_decode(b"%GG"), b"%GG");
    assert_eq!(percent_decode(b"abc"), b"abc");
    assert_eq!(percent_decode(b"%41%zz%42"), b"A%zzB");
}

#[test]
fn test_decode_accepts_either_hex_case() {
    assert_eq!(percent_decode(b"%2f"), b"/");
    assert_eq!(percent_decode(b"%2F"), b"/");
}

#[test]
fn test_is_percent_encoded_triple() {
    assert!(is_percent_encoded(b"%00"));
    assert!(is_percent_encoded(b"%aF"));
    assert!(!is_percent_encoded(b"%a"));
    assert!(!is_percent_encoded(b"%aFF"));
    assert!(!is_percent_encoded(b"x20"));
    assert!(!is_percent_encoded(b""));
}

#[test]
fn test_string_level_encode() {
    assert_eq!(percent_encode(b"a b/c", EncodeSet::Path), "a%20b/c");
    assert_eq!(percent_encode(b"a b/c", EncodeSet::Userinfo), "a%20b%2Fc");
    assert_eq!(percent_encode("é".as_bytes(), EncodeSet::C0Control), "%C3%A9");
    assert_eq!(percent_encode(b"", EncodeSet::None), "");
}

#[test]
fn test_encode_not_idempotent_under_none() {
    let once = percent_encode(b"%", EncodeSet::None);
    assert_eq!(once, "%25");
    let twice = percent_encode(once.as_bytes(), EncodeSet::None);
    assert_eq!(twice, "%2525");
    assert_ne!(once, twice);
}
