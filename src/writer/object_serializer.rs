//! Value serialization.
//!
//! Converts [`Value`]s to the exact byte representation used inside indirect
//! objects. Output is bytes rather than `String` because encrypted and wide
//! strings carry arbitrary byte values.

use super::text_encoding::{encode_text, escape_literal};
use crate::encryption::Encryptor;
use crate::error::{Error, Result};
use crate::object::{Dictionary, PdfDate, Value};
use std::io::Write;

/// Exclusive magnitude bound for serializable numbers.
pub const NUMBER_LIMIT: f64 = 1e21;

/// Serializer for values.
///
/// Stateless; the only side effect is calling the encryptor, when one is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize a value to bytes.
    ///
    /// Strings and dates are passed through `encryptor` before escaping.
    pub fn serialize(&self, value: &Value, encryptor: Option<&dyn Encryptor>) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_value(&mut buf, value, encryptor)?;
        Ok(buf)
    }

    /// Serialize a bare dictionary to bytes.
    pub fn serialize_dictionary(
        &self,
        dict: &Dictionary,
        encryptor: Option<&dyn Encryptor>,
    ) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_dictionary(&mut buf, dict, encryptor)?;
        Ok(buf)
    }

    /// Serialize a value to a string (for debugging).
    ///
    /// Bytes that are not valid UTF-8 are replaced.
    pub fn serialize_to_string(&self, value: &Value) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.serialize(value, None)?).into_owned())
    }

    /// Write a value to a writer.
    pub fn write_value<W: Write>(
        &self,
        w: &mut W,
        value: &Value,
        encryptor: Option<&dyn Encryptor>,
    ) -> Result<()> {
        match value {
            Value::Name(n) => write!(w, "/{}", n)?,
            Value::Text(s) => self.write_text(w, s, encryptor)?,
            Value::Binary(data) => self.write_hex(w, data)?,
            Value::Reference(r) => write!(w, "{}", r)?,
            Value::Date(d) => self.write_date(w, d, encryptor)?,
            Value::Array(items) => self.write_array(w, items, encryptor)?,
            Value::Dictionary(dict) => self.write_dictionary(w, dict, encryptor)?,
            Value::Number(n) => w.write_all(format_number(*n)?.as_bytes())?,
            Value::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" })?,
            Value::Null => write!(w, "null")?,
            Value::Raw(s) => w.write_all(s.as_bytes())?,
        }
        Ok(())
    }

    /// Write a text string: encode, optionally encrypt, escape, parenthesize.
    fn write_text<W: Write>(
        &self,
        w: &mut W,
        text: &str,
        encryptor: Option<&dyn Encryptor>,
    ) -> Result<()> {
        let mut data = encode_text(text)?;
        if let Some(enc) = encryptor {
            data = enc.encrypt(&data);
        }
        self.write_literal(w, &escape_literal(&data))
    }

    /// Write a date string.
    ///
    /// The plain path writes the date unescaped: a rendered date only holds
    /// `D`, `:`, digits and `Z`.
    fn write_date<W: Write>(
        &self,
        w: &mut W,
        date: &PdfDate,
        encryptor: Option<&dyn Encryptor>,
    ) -> Result<()> {
        let date = date.to_date_string();
        match encryptor {
            Some(enc) => {
                let encrypted = enc.encrypt(date.as_bytes());
                self.write_literal(w, &escape_literal(&encrypted))
            },
            None => self.write_literal(w, date.as_bytes()),
        }
    }

    /// Wrap already escaped bytes in parentheses.
    fn write_literal<W: Write>(&self, w: &mut W, escaped: &[u8]) -> Result<()> {
        w.write_all(b"(")?;
        w.write_all(escaped)?;
        w.write_all(b")")?;
        Ok(())
    }

    /// Write binary data as a hex string.
    fn write_hex<W: Write>(&self, w: &mut W, data: &[u8]) -> Result<()> {
        write!(w, "<")?;
        for byte in data {
            write!(w, "{:02X}", byte)?;
        }
        write!(w, ">")?;
        Ok(())
    }

    /// Write an array.
    fn write_array<W: Write>(
        &self,
        w: &mut W,
        items: &[Value],
        encryptor: Option<&dyn Encryptor>,
    ) -> Result<()> {
        write!(w, "[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_value(w, item, encryptor)?;
        }
        write!(w, "]")?;
        Ok(())
    }

    /// Write a dictionary, one entry per line.
    fn write_dictionary<W: Write>(
        &self,
        w: &mut W,
        dict: &Dictionary,
        encryptor: Option<&dyn Encryptor>,
    ) -> Result<()> {
        write!(w, "<<")?;
        for (key, value) in dict {
            write!(w, "\n/{} ", key)?;
            self.write_value(w, value, encryptor)?;
        }
        write!(w, "\n>>")?;
        Ok(())
    }
}

/// Convert a value to bytes with the default serializer.
pub fn convert(value: &Value, encryptor: Option<&dyn Encryptor>) -> Result<Vec<u8>> {
    ObjectSerializer::new().serialize(value, encryptor)
}

/// Format a number rounded to six decimal places.
///
/// Rounding is `round(n * 1e6) / 1e6`, half away from zero. Trailing zeros and
/// the sign of zero are dropped.
pub fn format_number(n: f64) -> Result<String> {
    if n.is_nan() || n <= -NUMBER_LIMIT || n >= NUMBER_LIMIT {
        return Err(Error::NumberOutOfRange(n));
    }
    let rounded = (n * 1e6).round() / 1e6;
    if rounded == 0.0 {
        return Ok("0".to_string());
    }
    Ok(format!("{}", rounded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectRef;

    fn to_string(value: &Value) -> String {
        ObjectSerializer::new().serialize_to_string(value).unwrap()
    }

    fn xor_ff(data: &[u8]) -> Vec<u8> {
        data.iter().map(|b| b ^ 0xFF).collect()
    }

    #[test]
    fn test_serialize_name() {
        assert_eq!(to_string(&Value::name("Type")), "/Type");
        assert_eq!(to_string(&Value::name("Font")), "/Font");
    }

    #[test]
    fn test_serialize_ascii_text() {
        assert_eq!(to_string(&Value::text("Hello")), "(Hello)");
    }

    #[test]
    fn test_serialize_text_escapes() {
        assert_eq!(to_string(&Value::text("Test (parens)")), "(Test \\(parens\\))");
        assert_eq!(to_string(&Value::text("a\\b\nc")), "(a\\\\b\\nc)");
    }

    #[test]
    fn test_serialize_unicode_text() {
        let bytes = convert(&Value::text("café"), None).unwrap();
        assert_eq!(
            bytes,
            vec![b'(', 0xFE, 0xFF, 0x00, b'c', 0x00, b'a', 0x00, b'f', 0x00, 0xE9, b')']
        );
    }

    #[test]
    fn test_serialize_unicode_text_escapes_wide_bytes() {
        // U+0128 encodes as 01 28, and 0x28 is '('
        let bytes = convert(&Value::text("\u{0128}"), None).unwrap();
        assert_eq!(bytes, vec![b'(', 0xFE, 0xFF, 0x01, b'\\', b'(', b')']);
    }

    #[test]
    fn test_serialize_encrypted_text() {
        // 'H' ^ 0xFF = 0xB7, 'i' ^ 0xFF = 0x96
        let bytes = convert(&Value::text("Hi"), Some(&xor_ff)).unwrap();
        assert_eq!(bytes, vec![b'(', 0xB7, 0x96, b')']);
    }

    #[test]
    fn test_serialize_encrypted_text_is_escaped() {
        let identity = |data: &[u8]| data.to_vec();
        let bytes = convert(&Value::text("a)"), Some(&identity)).unwrap();
        assert_eq!(bytes, b"(a\\))".to_vec());

        let flip = |data: &[u8]| data.iter().map(|b| b ^ 0x5F).collect::<Vec<u8>>();
        // 'w' (0x77) ^ 0x5F = 0x28
        let bytes = convert(&Value::text("w"), Some(&flip)).unwrap();
        assert_eq!(bytes, b"(\\()".to_vec());
    }

    #[test]
    fn test_serialize_hex_string() {
        assert_eq!(to_string(&Value::binary(vec![0x00, 0xFF])), "<00FF>");
        assert_eq!(to_string(&Value::binary(vec![0x00, 0xFF, 0x80])), "<00FF80>");
        assert_eq!(to_string(&Value::binary(Vec::new())), "<>");
    }

    #[test]
    fn test_hex_string_is_not_encrypted() {
        let bytes = convert(&Value::binary(vec![0x01]), Some(&xor_ff)).unwrap();
        assert_eq!(bytes, b"<01>".to_vec());
    }

    #[test]
    fn test_serialize_reference() {
        assert_eq!(to_string(&Value::Reference(ObjectRef::new(10, 0))), "10 0 R");
    }

    #[test]
    fn test_serialize_date() {
        let date = PdfDate::new(2024, 3, 7, 9, 5, 0);
        assert_eq!(to_string(&Value::Date(date)), "(D:20240307090500Z)");
    }

    #[test]
    fn test_serialize_encrypted_date() {
        let identity = |data: &[u8]| data.to_vec();
        let date = Value::Date(PdfDate::new(2024, 3, 7, 9, 5, 0));
        let bytes = convert(&date, Some(&identity)).unwrap();
        assert_eq!(bytes, b"(D:20240307090500Z)".to_vec());

        let bytes = convert(&date, Some(&xor_ff)).unwrap();
        let expected: Vec<u8> = b"D:20240307090500Z".iter().map(|b| b ^ 0xFF).collect();
        assert_eq!(bytes[1..bytes.len() - 1].to_vec(), escape_literal(&expected));
    }

    #[test]
    fn test_date_never_contains_escapable_bytes() {
        let dates = [
            PdfDate::new(0, 0, 0, 0, 0, 0),
            PdfDate::new(9999, 12, 31, 23, 59, 59),
            PdfDate::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX, u32::MAX, u32::MAX),
        ];
        for date in dates {
            let s = date.to_date_string();
            assert_eq!(escape_literal(s.as_bytes()), s.as_bytes().to_vec());
        }
    }

    #[test]
    fn test_serialize_array() {
        let arr = Value::Array(vec![1.into(), 2.into(), 3.into()]);
        assert_eq!(to_string(&arr), "[1 2 3]");
        assert_eq!(to_string(&Value::Array(Vec::new())), "[]");
    }

    #[test]
    fn test_serialize_nested_array_passes_encryptor() {
        let arr = Value::Array(vec![Value::text("A"), Value::Array(vec![Value::text("B")])]);
        let bytes = convert(&arr, Some(&xor_ff)).unwrap();
        assert_eq!(bytes, vec![b'[', b'(', 0xBE, b')', b' ', b'[', b'(', 0xBD, b')', b']', b']']);
    }

    #[test]
    fn test_serialize_dictionary() {
        let dict = Value::dict([
            ("Type", Value::name("Catalog")),
            ("Pages", ObjectRef::new(2, 0).into()),
        ]);
        assert_eq!(to_string(&dict), "<<\n/Type /Catalog\n/Pages 2 0 R\n>>");
    }

    #[test]
    fn test_serialize_empty_dictionary() {
        assert_eq!(to_string(&Value::Dictionary(Dictionary::new())), "<<\n>>");
    }

    #[test]
    fn test_serialize_nested_dictionary() {
        let dict = Value::dict([(
            "Resources",
            Value::dict([("ProcSet", Value::Array(vec![Value::name("PDF")]))]),
        )]);
        assert_eq!(to_string(&dict), "<<\n/Resources <<\n/ProcSet [/PDF]\n>>\n>>");
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(to_string(&Value::Boolean(true)), "true");
        assert_eq!(to_string(&Value::Boolean(false)), "false");
        assert_eq!(to_string(&Value::Null), "null");
        assert_eq!(to_string(&Value::raw("0 0 612 792 re")), "0 0 612 792 re");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0 / 3.0).unwrap(), "0.333333");
        assert_eq!(format_number(2.0 / 3.0).unwrap(), "0.666667");
        assert_eq!(format_number(1.0).unwrap(), "1");
        assert_eq!(format_number(0.5).unwrap(), "0.5");
        assert_eq!(format_number(-12.25).unwrap(), "-12.25");
        assert_eq!(format_number(612.0).unwrap(), "612");
        assert_eq!(format_number(0.000001).unwrap(), "0.000001");
    }

    #[test]
    fn test_format_number_drops_negative_zero() {
        assert_eq!(format_number(-0.0).unwrap(), "0");
        assert_eq!(format_number(-0.0000001).unwrap(), "0");
        assert_eq!(format_number(0.0000004).unwrap(), "0");
    }

    #[test]
    fn test_format_large_number_has_no_exponent() {
        assert_eq!(format_number(1e15).unwrap(), "1000000000000000");
    }

    #[test]
    fn test_number_out_of_range() {
        for n in [1e21, -1e21, 1e300, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(format_number(n), Err(Error::NumberOutOfRange(_))));
        }
    }

    #[test]
    fn test_out_of_range_propagates_from_nested_value() {
        let dict = Value::dict([("MediaBox", Value::Array(vec![0.into(), Value::Number(1e22)]))]);
        let err = convert(&dict, None).unwrap_err();
        assert!(matches!(err, Error::NumberOutOfRange(n) if n == 1e22));
    }
}
