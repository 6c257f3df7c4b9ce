//! Stream filter selection.
//!
//! Runs before a stream body is appended: by the time an [`IndirectObject`] sees
//! its content, compressed bytes are opaque.

use super::indirect_object::IndirectObject;
use crate::error::Result;
use crate::object::Value;
use std::borrow::Cow;
use std::io::Write;

/// Compress data using Flate/Deflate compression.
///
/// Returns compressed bytes suitable for FlateDecode filter.
pub fn compress_data(data: &[u8], level: u32) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data)?;
    encoder.finish()
}

/// Encode a whole stream body for `object`.
///
/// When the object's `compress` flag is set and nothing has been appended yet,
/// the body is Flate-compressed and `/Filter /FlateDecode` is added to the
/// attributes. Otherwise the body is returned untouched.
pub fn encode_stream<'a>(
    object: &mut IndirectObject,
    body: &'a [u8],
    level: u32,
) -> Result<Cow<'a, [u8]>> {
    if !object.compress() {
        return Ok(Cow::Borrowed(body));
    }
    if object.uncompressed_length() > 0 {
        log::warn!(
            "Object {} already holds content, leaving stream uncompressed",
            object.to_reference()
        );
        return Ok(Cow::Borrowed(body));
    }

    let compressed = compress_data(body, level)?;
    object
        .attributes_mut()?
        .insert("Filter".to_string(), Value::name("FlateDecode"));
    log::debug!(
        "Compressed stream of object {}: {} -> {} bytes",
        object.to_reference(),
        body.len(),
        compressed.len()
    );
    Ok(Cow::Owned(compressed))
}
