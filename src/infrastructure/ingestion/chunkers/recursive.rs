//! Recursive chunking strategy

use std::collections::VecDeque;

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::ingestion::{ChunkingConfig, ChunkingStrategy};
use crate::domain::DomainError;

/// Boundaries tried in order before falling back to grapheme clusters
const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

/// Chunking strategy that recursively splits text hierarchically
///
/// Splitting order: paragraphs -> lines -> words -> grapheme clusters.
/// Pieces are merged back into chunks of at most `chunk_size` characters,
/// and each chunk starts with up to `chunk_overlap` characters carried over
/// from the end of its predecessor.
#[derive(Debug, Clone, Default)]
pub struct RecursiveChunker;

impl RecursiveChunker {
    /// Create a new recursive chunker
    pub fn new() -> Self {
        Self
    }

    /// Split on `separator`, keeping each separator attached to the start of
    /// the piece that follows it so that pieces concatenate back to `text`.
    fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
        let mut parts = Vec::new();
        let mut start = 0;

        for (idx, _) in text.match_indices(separator) {
            if idx > start {
                parts.push(&text[start..idx]);
                start = idx;
            }
        }

        if start < text.len() {
            parts.push(&text[start..]);
        }

        parts
    }

    fn recursive_chunk(text: &str, config: &ChunkingConfig, level: usize) -> Vec<String> {
        let level = (level..SEPARATORS.len())
            .find(|&l| text.contains(SEPARATORS[l]))
            .unwrap_or(SEPARATORS.len());

        let parts: Vec<&str> = match SEPARATORS.get(level) {
            Some(separator) => Self::split_keeping_separator(text, separator),
            None => text.graphemes(true).collect(),
        };

        let mut result = Vec::new();
        let mut pending: Vec<&str> = Vec::new();

        for part in parts {
            if char_len(part) < config.chunk_size {
                pending.push(part);
                continue;
            }

            if !pending.is_empty() {
                result.extend(Self::merge_with_overlap(&pending, config));
                pending.clear();
            }

            if level < SEPARATORS.len() {
                result.extend(Self::recursive_chunk(part, config, level + 1));
            } else {
                // A single grapheme cluster wider than the chunk size
                result.extend(Self::split_chars(part, config.chunk_size));
            }
        }

        if !pending.is_empty() {
            result.extend(Self::merge_with_overlap(&pending, config));
        }

        result
    }

    /// Hard split at scalar boundaries into pieces of `size` characters
    fn split_chars(text: &str, size: usize) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars.chunks(size).map(|c| c.iter().collect()).collect()
    }

    /// Greedily pack pieces into chunks. When a chunk is emitted, pieces are
    /// dropped from the front of the window until at most `chunk_overlap`
    /// characters remain and the next piece fits.
    fn merge_with_overlap(parts: &[&str], config: &ChunkingConfig) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0;

        for &part in parts {
            let len = char_len(part);

            if total + len > config.chunk_size && !window.is_empty() {
                Self::push_window(&window, &mut chunks);

                while total > config.chunk_overlap
                    || (total > 0 && total + len > config.chunk_size)
                {
                    match window.pop_front() {
                        Some((_, dropped)) => total -= dropped,
                        None => break,
                    }
                }
            }

            window.push_back((part, len));
            total += len;
        }

        Self::push_window(&window, &mut chunks);
        chunks
    }

    fn push_window(window: &VecDeque<(&str, usize)>, chunks: &mut Vec<String>) {
        let joined: String = window.iter().map(|(part, _)| *part).collect();
        let trimmed = joined.trim();

        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

impl ChunkingStrategy for RecursiveChunker {
    fn split_text(&self, text: &str, config: &ChunkingConfig) -> Result<Vec<String>, DomainError> {
        config.validate()?;

        if text.trim().is_empty() {
            return Ok(vec![]);
        }

        Ok(Self::recursive_chunk(text, config, 0))
    }

    fn name(&self) -> &'static str {
        "recursive"
    }
}
