//! # PDF Object Writer
//!
//! The innermost encoding layer of PDF generation: values are serialized to
//! their exact byte syntax, and indirect objects are emitted as
//! `obj ... stream ... endstream endobj` records into an append-only output.
//!
//! ## Core Features
//!
//! - **Value serialization**: names, literal strings (UTF-16BE with byte order
//!   mark when needed), hex strings, references, dates, arrays, dictionaries and
//!   numbers rounded to six decimals
//! - **Indirect objects**: buffered stream content, `Length` tracking, per-object
//!   encryption of strings and stream bodies
//! - **Pluggable document**: offsets, encryption and the cross-reference registry
//!   come from a [`writer::DocumentContext`]
//!
//! Compression and ciphers are not implemented here. A document may select a
//! Flate filter before content is appended ([`writer::filters`]), and supplies
//! encryption through [`encryption::SecurityHandler`].
//!
//! ## Quick Start
//!
//! ```
//! use pdf_objwriter::object::{ObjectRef, Value};
//! use pdf_objwriter::writer::convert;
//!
//! let catalog = Value::dict([
//!     ("Type", Value::name("Catalog")),
//!     ("Pages", ObjectRef::new(2, 0).into()),
//! ]);
//! let bytes = convert(&catalog, None).unwrap();
//! assert_eq!(bytes, b"<<\n/Type /Catalog\n/Pages 2 0 R\n>>".to_vec());
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Values
pub mod object;

// Encryption capabilities
pub mod encryption;

// Serialization and object output
pub mod writer;

pub use error::{Error, Result};
