//! Object writing.
//!
//! ## Architecture
//!
//! ```text
//! Value / attributes
//!     ↓
//! [ObjectSerializer] (values → bytes, optional per-object encryption)
//!     ↓
//! [IndirectObject] (buffers stream content, emits `obj ... endobj`)
//!     ↓
//! [DocumentContext] (offsets, registry, output sink)
//! ```
//!
//! ## Example
//!
//! ```
//! use pdf_objwriter::object::{Dictionary, Value};
//! use pdf_objwriter::writer::OutputDocument;
//!
//! # fn main() -> pdf_objwriter::Result<()> {
//! let mut doc = OutputDocument::in_memory();
//! let mut attrs = Dictionary::new();
//! attrs.insert("Type".to_string(), Value::name("XObject"));
//!
//! let mut object = doc.new_object(attrs);
//! object.append("0 0 m 10 10 l S")?;
//! object.finalize(&mut doc, None)?;
//!
//! assert!(doc.bytes().starts_with(b"1 0 obj\n<<\n/Type /XObject\n/Length 16\n>>\nstream\n"));
//! # Ok(())
//! # }
//! ```

mod document;
pub mod filters;
mod indirect_object;
mod object_serializer;
pub mod text_encoding;

pub use document::{DocumentContext, Emission, OutputDocument, XrefEntry};
pub use indirect_object::{Chunk, IndirectObject};
pub use object_serializer::{convert, format_number, ObjectSerializer, NUMBER_LIMIT};
