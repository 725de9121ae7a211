//! Chunk configuration and output types.

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunker.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum characters per chunk (default: 800).
    pub max_chunk_length: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_length: 800,
        }
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A contiguous run of sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based position within the document.
    pub ordinal: usize,
    pub text: String,
}

impl Chunk {
    pub fn char_len(&self) -> usize {
        crate::text::char_len(&self.text)
    }
}
