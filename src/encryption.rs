//! Encryption capabilities consumed by the writer.
//!
//! Key derivation and ciphers live outside this crate. The writer only needs a
//! per-object byte transform, obtained from a [`SecurityHandler`] for each
//! `(id, generation)` pair.

/// Byte transform applied to string contents and stream bodies of one object.
pub trait Encryptor {
    /// Encrypt `data`, returning the ciphertext.
    fn encrypt(&self, data: &[u8]) -> Vec<u8>;
}

impl<F> Encryptor for F
where
    F: Fn(&[u8]) -> Vec<u8>,
{
    fn encrypt(&self, data: &[u8]) -> Vec<u8> {
        self(data)
    }
}

/// Source of per-object encryptors for a document with active security.
pub trait SecurityHandler {
    /// Get the encryptor for the object `id` with generation `gen`.
    fn encryptor_for(&self, id: u32, gen: u16) -> Box<dyn Encryptor>;
}
