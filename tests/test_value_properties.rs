//! Property tests for value serialization.

use pdf_objwriter::object::Value;
use pdf_objwriter::writer::{convert, format_number, text_encoding::escape_literal, NUMBER_LIMIT};
use pdf_objwriter::Error;
use proptest::prelude::*;

/// Reverse the literal-string escape table.
fn unescape(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter();
    while let Some(&byte) = iter.next() {
        if byte != b'\\' {
            out.push(byte);
            continue;
        }
        match iter.next() {
            Some(b'n') => out.push(b'\n'),
            Some(b'r') => out.push(b'\r'),
            Some(b't') => out.push(b'\t'),
            Some(b'b') => out.push(0x08),
            Some(b'f') => out.push(0x0C),
            Some(&other) => out.push(other),
            None => panic!("dangling escape"),
        }
    }
    out
}

proptest! {
    #[test]
    fn prop_numbers_round_to_six_decimals(n in -1e9f64..1e9f64) {
        let formatted = format_number(n).unwrap();
        let parsed: f64 = formatted.parse().unwrap();
        prop_assert_eq!(parsed, (n * 1e6).round() / 1e6 + 0.0);
        let decimals = formatted.split('.').nth(1).map_or(0, str::len);
        prop_assert!(decimals <= 6);
        prop_assert!(!formatted.contains('e'));
    }

    #[test]
    fn prop_numbers_beyond_limit_fail(n in NUMBER_LIMIT..f64::MAX, negative in any::<bool>()) {
        let n = if negative { -n } else { n };
        prop_assert!(matches!(format_number(n), Err(Error::NumberOutOfRange(_))));
    }

    #[test]
    fn prop_ascii_text_escape_roundtrip(s in "[\\x00-\\x7F]*") {
        let bytes = convert(&Value::text(s.clone()), None).unwrap();
        prop_assert_eq!(bytes[0], b'(');
        prop_assert_eq!(bytes[bytes.len() - 1], b')');
        prop_assert_eq!(unescape(&bytes[1..bytes.len() - 1]), s.into_bytes());
    }

    #[test]
    fn prop_escape_roundtrip_any_bytes(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(unescape(&escape_literal(&data)), data);
    }

    #[test]
    fn prop_wide_text_is_utf16be(s in "\\PC*", c in proptest::char::range('\u{80}', '\u{D7FE}')) {
        let text = format!("{}{}", s, c);
        let bytes = convert(&Value::text(text.clone()), None).unwrap();
        let raw = unescape(&bytes[1..bytes.len() - 1]);
        prop_assert_eq!(&raw[..2], &[0xFE, 0xFF]);
        let units: Vec<u16> = raw[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        prop_assert_eq!(String::from_utf16(&units).unwrap(), text);
    }

    #[test]
    fn prop_hex_has_two_digits_per_byte(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let bytes = convert(&Value::binary(data.clone()), None).unwrap();
        prop_assert_eq!(bytes.len(), data.len() * 2 + 2);
        prop_assert!(bytes[1..bytes.len() - 1].iter().all(u8::is_ascii_hexdigit));
    }
}
