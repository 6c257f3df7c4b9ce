//! Byte encoding and escaping for literal strings.

use crate::error::{Error, Result};

/// Byte order mark prepended to wide text strings.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Encode text as string bytes.
///
/// Pure 7-bit text is written one byte per character. Anything else becomes
/// UTF-16BE behind a byte order mark.
pub fn encode_text(text: &str) -> Result<Vec<u8>> {
    if text.chars().all(|c| (c as u32) <= 0x7F) {
        return Ok(text.as_bytes().to_vec());
    }

    let mut buf: Vec<u8> = std::iter::once(BYTE_ORDER_MARK)
        .chain(text.chars())
        .collect::<String>()
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect();
    swap_bytes(&mut buf)?;
    Ok(buf)
}

/// Swap each adjacent byte pair in place (UTF-16LE to UTF-16BE).
pub fn swap_bytes(buf: &mut [u8]) -> Result<()> {
    if buf.len() % 2 != 0 {
        return Err(Error::InvalidEncoding(format!(
            "buffer length must be even, got {}",
            buf.len()
        )));
    }
    for pair in buf.chunks_exact_mut(2) {
        pair.swap(0, 1);
    }
    Ok(())
}

/// Escape the bytes of a literal string.
///
/// Only `\n \r \t \b \f \\ ( )` are rewritten; every other byte passes through.
pub fn escape_literal(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 2);
    for &byte in data {
        match byte {
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0C => out.extend_from_slice(b"\\f"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            _ => out.push(byte),
        }
    }
    out
}
