//! Configuration for object writing.

/// Highest Flate compression level.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Document-level writer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Whether stream bodies are Flate-compressed
    pub compress: bool,
    /// Flate compression level (0-9)
    pub compression_level: u32,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl WriterConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            compress: false,
            compression_level: 6,
        }
    }

    /// Enable or disable stream compression.
    ///
    /// Only objects whose attributes carry no `Filter` entry at creation are
    /// compressed.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the Flate compression level, clamped to 0-9.
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(MAX_COMPRESSION_LEVEL);
        self
    }
}
