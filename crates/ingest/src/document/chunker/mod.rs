//! Sentence-aware chunking.
//!
//! Packs whole sentences into chunks of at most `max_chunk_length`
//! characters so each chunk fits one model call. Sentences are never
//! reordered; a sentence too long for any chunk is truncated on its own.

mod greedy;
mod types;

pub use greedy::chunk_text;
pub use types::{Chunk, ChunkConfig};
