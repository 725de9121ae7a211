//! Turning files into summarizable text: extraction, normalization,
//! sentence splitting and chunking.

pub mod document;
pub mod normalize;
pub mod sentences;
pub mod text;

pub use document::chunker::{chunk_text, Chunk, ChunkConfig};
pub use document::{extract_bytes, extract_file, ExtractionError};
pub use normalize::normalize;
pub use sentences::{count_sentences, count_words, split_sentences, MIN_SENTENCE_CHARS};
pub use text::truncate_chars;
