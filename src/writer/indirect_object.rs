//! Indirect object writer.
//!
//! An [`IndirectObject`] buffers stream content until it is finalized, then emits
//! its full record through the owning [`DocumentContext`]:
//!
//! ```text
//! {id} {gen} obj
//! << ... >>
//! stream
//! {content}
//! endstream
//! endobj
//! ```
//!
//! The `stream` block is omitted when there is no content.

use super::document::{DocumentContext, Emission};
use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use crate::object::{Dictionary, ObjectRef, Value};
use bytes::{Bytes, BytesMut};

/// Content appended to an object's stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    /// Raw bytes, appended verbatim
    Bytes(Bytes),
    /// Text line, appended as UTF-8 with a trailing newline
    Text(String),
    /// Structured value; only `Binary` and `Raw` values have a byte form
    Value(Value),
}

impl Chunk {
    /// Convert to the bytes appended to the stream.
    fn into_bytes(self) -> Result<Bytes> {
        match self {
            Chunk::Bytes(data) => Ok(data),
            Chunk::Text(text) | Chunk::Value(Value::Raw(text)) => Ok(text_line(text)),
            Chunk::Value(Value::Binary(data)) => Ok(Bytes::from(data)),
            Chunk::Value(other) => Err(Error::UnsupportedChunkType(other.type_name())),
        }
    }
}

fn text_line(text: String) -> Bytes {
    let mut line = text.into_bytes();
    line.push(b'\n');
    Bytes::from(line)
}

impl From<Bytes> for Chunk {
    fn from(data: Bytes) -> Self {
        Chunk::Bytes(data)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(data: Vec<u8>) -> Self {
        Chunk::Bytes(Bytes::from(data))
    }
}

impl From<&[u8]> for Chunk {
    fn from(data: &[u8]) -> Self {
        Chunk::Bytes(Bytes::copy_from_slice(data))
    }
}

impl From<String> for Chunk {
    fn from(text: String) -> Self {
        Chunk::Text(text)
    }
}

impl From<&str> for Chunk {
    fn from(text: &str) -> Self {
        Chunk::Text(text.to_string())
    }
}

impl From<Value> for Chunk {
    fn from(value: Value) -> Self {
        Chunk::Value(value)
    }
}

/// Lifecycle of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectState {
    /// Accepting appends
    Open,
    /// Record emitted (or emission attempted); terminal
    Finalized,
}

/// One indirect object being written.
#[derive(Debug)]
pub struct IndirectObject {
    id: u32,
    gen: u16,
    attributes: Dictionary,
    /// Advisory: document compresses and no `Filter` was given at creation
    compress: bool,
    chunks: Vec<Bytes>,
    uncompressed_length: usize,
    offset: Option<u64>,
    state: ObjectState,
}

impl IndirectObject {
    /// Create an open object with generation 0.
    pub fn new<D: DocumentContext + ?Sized>(doc: &D, id: u32, attributes: Dictionary) -> Self {
        let compress = doc.compression_enabled() && !attributes.contains_key("Filter");
        Self {
            id,
            gen: 0,
            attributes,
            compress,
            chunks: Vec::new(),
            uncompressed_length: 0,
            offset: None,
            state: ObjectState::Open,
        }
    }

    /// Object number.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Generation number.
    pub fn generation(&self) -> u16 {
        self.gen
    }

    /// Object attributes (the object's dictionary).
    pub fn attributes(&self) -> &Dictionary {
        &self.attributes
    }

    /// Mutable attributes; only available while the object is open.
    pub fn attributes_mut(&mut self) -> Result<&mut Dictionary> {
        self.ensure_open()?;
        Ok(&mut self.attributes)
    }

    /// Whether the stream body should be compressed before it is appended.
    pub fn compress(&self) -> bool {
        self.compress
    }

    /// Total bytes appended so far.
    pub fn uncompressed_length(&self) -> usize {
        self.uncompressed_length
    }

    /// Byte offset of the header, set at finalization.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Whether the object has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.state == ObjectState::Finalized
    }

    /// Reference to this object.
    pub fn to_reference(&self) -> ObjectRef {
        ObjectRef::new(self.id, self.gen)
    }

    /// Reference token, `"{id} {gen} R"`.
    pub fn to_reference_token(&self) -> String {
        self.to_reference().to_string()
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            ObjectState::Open => Ok(()),
            ObjectState::Finalized => Err(Error::AlreadyFinalized {
                id: self.id,
                generation: self.gen,
            }),
        }
    }

    /// Append a chunk to the stream content.
    ///
    /// `Length` is set to the running total of appended bytes.
    pub fn append(&mut self, chunk: impl Into<Chunk>) -> Result<()> {
        self.ensure_open()?;
        let data = match chunk.into().into_bytes() {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Rejected chunk for object {}: {}", self.to_reference(), e);
                return Err(e);
            },
        };

        self.uncompressed_length += data.len();
        self.chunks.push(data);
        self.attributes
            .insert("Length".to_string(), Value::from(self.uncompressed_length));
        log::trace!(
            "Object {} now holds {} bytes in {} chunks",
            self.to_reference(),
            self.uncompressed_length,
            self.chunks.len()
        );
        Ok(())
    }

    /// Finalize the object and emit its record.
    ///
    /// `trailing` is appended first. The header and dictionary are serialized
    /// before anything is emitted, so a conversion error writes nothing. The
    /// object is terminal afterwards whether or not emission succeeded.
    pub fn finalize<D: DocumentContext + ?Sized>(
        &mut self,
        doc: &mut D,
        trailing: Option<Chunk>,
    ) -> Result<()> {
        self.ensure_open()?;
        if let Some(chunk) = trailing {
            self.append(chunk)?;
        }
        self.state = ObjectState::Finalized;

        let offset = doc.current_offset();
        self.offset = Some(offset);
        let encryptor = doc.encryptor_for(self.id, self.gen);

        let mut content = Bytes::new();
        if !self.chunks.is_empty() {
            let mut buf = BytesMut::with_capacity(self.uncompressed_length);
            for chunk in self.chunks.drain(..) {
                buf.extend_from_slice(&chunk);
            }
            content = match &encryptor {
                Some(enc) => Bytes::from(enc.encrypt(&buf)),
                None => buf.freeze(),
            };
            self.attributes
                .insert("Length".to_string(), Value::from(content.len()));
        }
        self.chunks = Vec::new();

        let header = format!("{} {} obj", self.id, self.gen);
        let dict = ObjectSerializer::new()
            .serialize_dictionary(&self.attributes, encryptor.as_deref())?;

        doc.emit(Emission::Line(header.as_bytes()))?;
        doc.emit(Emission::Line(&dict))?;
        if !content.is_empty() {
            doc.emit(Emission::Line(b"stream"))?;
            doc.emit(Emission::Binary(&content))?;
            doc.emit(Emission::Line(b"\nendstream"))?;
        }
        doc.emit(Emission::Line(b"endobj"))?;

        log::debug!(
            "Finalized object {} at offset {} ({} stream bytes, {} appended)",
            self.to_reference(),
            offset,
            content.len(),
            self.uncompressed_length
        );
        drop(content);

        doc.on_finalized(self);
        Ok(())
    }
}
