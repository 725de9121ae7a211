//! Greedy sentence packing.

use super::types::{Chunk, ChunkConfig};
use crate::sentences::split_sentences;
use crate::text::{char_len, truncate_chars};

/// Split normalized text into ordered chunks.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    let max = config.max_chunk_length.max(1);
    let mut pieces: Vec<String> = Vec::new();
    let mut buf = String::new();
    let mut buf_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence_len = char_len(sentence);

        if sentence_len > max {
            if !buf.is_empty() {
                pieces.push(std::mem::take(&mut buf));
                buf_len = 0;
            }
            tracing::debug!(sentence_len, max, "truncating oversized sentence");
            pieces.push(truncate_chars(sentence, max).to_string());
            continue;
        }

        let joined_len = if buf.is_empty() {
            sentence_len
        } else {
            buf_len + 1 + sentence_len
        };

        if joined_len > max {
            pieces.push(std::mem::take(&mut buf));
            buf.push_str(sentence);
            buf_len = sentence_len;
        } else {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(sentence);
            buf_len = joined_len;
        }
    }

    if !buf.is_empty() {
        pieces.push(buf);
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(ordinal, text)| Chunk { ordinal, text })
        .collect()
}
