//! Document context consumed by indirect objects.
//!
//! [`DocumentContext`] is everything an [`IndirectObject`] needs from its owning
//! document: the compression switch, the running output offset, per-object
//! encryptors, byte emission and the finalization registry.
//! [`OutputDocument`] implements it over any [`std::io::Write`].

use super::filters;
use super::indirect_object::IndirectObject;
use crate::config::WriterConfig;
use crate::encryption::{Encryptor, SecurityHandler};
use crate::error::Result;
use crate::object::{Dictionary, ObjectRef};
use std::collections::BTreeMap;
use std::io::Write;

/// Bytes handed to the document sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission<'a> {
    /// Keyword or text line; the sink terminates it with `\n`
    Line(&'a [u8]),
    /// Raw bytes, written verbatim
    Binary(&'a [u8]),
}

impl Emission<'_> {
    /// Number of bytes this emission adds to the output.
    pub fn output_len(&self) -> u64 {
        match self {
            Emission::Line(data) => data.len() as u64 + 1,
            Emission::Binary(data) => data.len() as u64,
        }
    }
}

/// Capabilities an indirect object requires from its document.
///
/// Finalizations must be serialized by the caller; the offset counter and the
/// registry are not synchronized.
pub trait DocumentContext {
    /// Whether stream compression is enabled for this document.
    fn compression_enabled(&self) -> bool;

    /// Number of bytes emitted so far.
    fn current_offset(&self) -> u64;

    /// Encryptor for object `id`/`gen`, or `None` without active security.
    fn encryptor_for(&self, id: u32, gen: u16) -> Option<Box<dyn Encryptor>>;

    /// Append to the cumulative output.
    fn emit(&mut self, emission: Emission<'_>) -> Result<()>;

    /// Called once per object after its record has been emitted.
    fn on_finalized(&mut self, object: &IndirectObject);
}

/// Cross-reference entry recorded for a finalized object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrefEntry {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
    /// Byte offset of the `obj` header line
    pub offset: u64,
}

/// Document writing indirect objects into a [`Write`] sink.
pub struct OutputDocument<W: Write> {
    writer: W,
    config: WriterConfig,
    /// Bytes written so far
    offset: u64,
    /// Object ID counter
    next_obj_id: u32,
    security: Option<Box<dyn SecurityHandler>>,
    /// Finalized objects (id -> entry)
    xref: BTreeMap<u32, XrefEntry>,
}

impl OutputDocument<Vec<u8>> {
    /// Create a document that collects its output in memory.
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }

    /// Bytes written so far.
    pub fn bytes(&self) -> &[u8] {
        &self.writer
    }
}

impl<W: Write> OutputDocument<W> {
    /// Create a document with default config.
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, WriterConfig::default())
    }

    /// Create a document with custom config.
    pub fn with_config(writer: W, config: WriterConfig) -> Self {
        Self {
            writer,
            config,
            offset: 0,
            next_obj_id: 1,
            security: None,
            xref: BTreeMap::new(),
        }
    }

    /// Activate security: every object is encrypted with its own encryptor.
    pub fn with_security(mut self, handler: impl SecurityHandler + 'static) -> Self {
        self.security = Some(Box::new(handler));
        self
    }

    /// Get the writer configuration.
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Allocate a new object ID.
    pub fn alloc_obj_id(&mut self) -> u32 {
        let id = self.next_obj_id;
        self.next_obj_id += 1;
        id
    }

    /// Create an open object with a freshly allocated ID.
    pub fn new_object(&mut self, attributes: Dictionary) -> IndirectObject {
        let id = self.alloc_obj_id();
        IndirectObject::new(&*self, id, attributes)
    }

    /// Write a complete object with an optional stream body.
    ///
    /// The body goes through filter selection first, so it is Flate-compressed
    /// when the document compresses and `attributes` has no `Filter`.
    pub fn write_object(&mut self, attributes: Dictionary, body: &[u8]) -> Result<ObjectRef> {
        let mut object = self.new_object(attributes);
        if !body.is_empty() {
            let level = self.config.compression_level;
            let encoded = filters::encode_stream(&mut object, body, level)?;
            object.append(encoded.into_owned())?;
        }
        object.finalize(self, None)?;
        Ok(object.to_reference())
    }

    /// Offset of a finalized object.
    pub fn offset_of(&self, id: u32) -> Option<u64> {
        self.xref.get(&id).map(|entry| entry.offset)
    }

    /// Finalized objects, ordered by object number.
    pub fn xref_entries(&self) -> impl Iterator<Item = &XrefEntry> {
        self.xref.values()
    }

    /// Flush the sink and return it.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> DocumentContext for OutputDocument<W> {
    fn compression_enabled(&self) -> bool {
        self.config.compress
    }

    fn current_offset(&self) -> u64 {
        self.offset
    }

    fn encryptor_for(&self, id: u32, gen: u16) -> Option<Box<dyn Encryptor>> {
        self.security
            .as_ref()
            .map(|handler| handler.encryptor_for(id, gen))
    }

    fn emit(&mut self, emission: Emission<'_>) -> Result<()> {
        match emission {
            Emission::Line(data) => {
                self.writer.write_all(data)?;
                self.writer.write_all(b"\n")?;
            },
            Emission::Binary(data) => self.writer.write_all(data)?,
        }
        self.offset += emission.output_len();
        Ok(())
    }

    fn on_finalized(&mut self, object: &IndirectObject) {
        let Some(offset) = object.offset() else {
            log::warn!("Object {} has no offset after finalization", object.to_reference());
            return;
        };
        let entry = XrefEntry {
            id: object.id(),
            gen: object.generation(),
            offset,
        };
        if let Some(previous) = self.xref.insert(entry.id, entry) {
            log::warn!(
                "Object {} finalized twice (offsets {} and {})",
                object.id(),
                previous.offset,
                offset
            );
        }
    }
}
