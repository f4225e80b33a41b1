//! Text chunking with a recursive separator hierarchy
//!
//! Splits on the largest separator that yields pieces within the chunk size:
//! paragraph, then line, then sentence, then word, then grapheme. Pieces are
//! merged back into overlapping windows so no text is ever dropped.

use std::collections::VecDeque;

use unicode_segmentation::UnicodeSegmentation;

/// Text chunker with configurable size and overlap
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap carried between consecutive chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            overlap,
        }
    }

    /// Split text into overlapping chunks of at most `chunk_size` characters
    ///
    /// Empty input yields an empty vector. Concatenating the chunks with the
    /// shared boundary regions de-duplicated reproduces the input.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut pieces = Vec::new();
        self.split_level(text, 0, &mut pieces);
        self.merge(pieces)
    }

    /// Recursively split `text` into pieces no longer than `chunk_size`,
    /// preferring the largest separator level that achieves it
    fn split_level<'a>(&self, text: &'a str, level: usize, out: &mut Vec<&'a str>) {
        if text.len() <= self.chunk_size {
            if !text.is_empty() {
                out.push(text);
            }
            return;
        }

        match level {
            0 => self.split_parts(text.split_inclusive("\n\n"), level, out),
            1 => self.split_parts(text.split_inclusive('\n'), level, out),
            2 => self.split_parts(text.split_sentence_bounds(), level, out),
            3 => self.split_parts(text.split_inclusive(' '), level, out),
            // Grapheme clusters are the final fallback and always fit any
            // realistic chunk size
            _ => out.extend(text.graphemes(true)),
        }
    }

    fn split_parts<'a>(
        &self,
        parts: impl Iterator<Item = &'a str>,
        level: usize,
        out: &mut Vec<&'a str>,
    ) {
        for part in parts {
            if part.len() <= self.chunk_size {
                if !part.is_empty() {
                    out.push(part);
                }
            } else {
                self.split_level(part, level + 1, out);
            }
        }
    }

    /// Merge pieces into chunks of at most `chunk_size` characters, carrying
    /// a trailing window of at least `overlap` characters into the next chunk
    /// whenever capacity allows
    fn merge(&self, pieces: Vec<&str>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut window_len = 0usize;

        for piece in pieces {
            if window_len > 0 && window_len + piece.len() > self.chunk_size {
                chunks.push(window.iter().copied().collect());

                // Retain the overlap tail; drop more only to make room for
                // the incoming piece
                while let Some(front) = window.front() {
                    let without_front = window_len - front.len();
                    if without_front >= self.overlap
                        || window_len + piece.len() > self.chunk_size
                    {
                        window_len = without_front;
                        window.pop_front();
                    } else {
                        break;
                    }
                }
            }

            window_len += piece.len();
            window.push_back(piece);
        }

        if window_len > 0 {
            chunks.push(window.iter().copied().collect());
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Longest region shared between the end of `a` and the start of `b`
    fn boundary_overlap(a: &str, b: &str) -> usize {
        let max = a.len().min(b.len());
        (0..=max)
            .rev()
            .find(|&k| {
                a.is_char_boundary(a.len() - k) && b.is_char_boundary(k) && a[a.len() - k..] == b[..k]
            })
            .unwrap_or(0)
    }

    /// Rejoin chunks, de-duplicating the shared boundary regions
    fn rejoin(chunks: &[String]) -> String {
        let mut text = String::new();
        for chunk in chunks {
            let k = boundary_overlap(&text, chunk);
            text.push_str(&chunk[k..]);
        }
        text
    }

    /// Text of distinct numbered words, roughly `target` characters long
    fn numbered_words(target: usize) -> String {
        let mut text = String::new();
        let mut i = 0u32;
        while text.len() < target {
            text.push_str(&format!("word{:04} ", i));
            i += 1;
        }
        text.truncate(target);
        text
    }

    #[test]
    fn test_empty_input() {
        let chunker = TextChunker::new(1000, 200);
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn test_short_input_single_chunk() {
        let chunker = TextChunker::new(1000, 200);
        let chunks = chunker.chunk("a short document");
        assert_eq!(chunks, vec!["a short document".to_string()]);
    }

    #[test]
    fn test_chunks_respect_size_and_overlap() {
        let chunker = TextChunker::new(1000, 200);
        let text = numbered_words(2500);
        let chunks = chunker.chunk(&text);

        assert!((3..=4).contains(&chunks.len()), "got {} chunks", chunks.len());
        for chunk in &chunks {
            assert!(chunk.len() <= 1000);
        }
        for pair in chunks.windows(2) {
            assert!(boundary_overlap(&pair[0], &pair[1]) >= 200);
        }
    }

    #[test]
    fn test_no_text_dropped() {
        let chunker = TextChunker::new(1000, 200);
        let text = numbered_words(2500);
        assert_eq!(rejoin(&chunker.chunk(&text)), text);
    }

    #[test]
    fn test_paragraph_boundaries_preferred() {
        let chunker = TextChunker::new(1000, 200);
        let para = numbered_words(600);
        let text = format!("{}\n\n{}", para, para);
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks.len(), 2);
        // The first chunk ends exactly at the paragraph separator
        assert!(chunks[0].ends_with("\n\n"));
        assert_eq!(rejoin(&chunks), text);
    }

    #[test]
    fn test_unbroken_text_falls_back_to_graphemes() {
        let chunker = TextChunker::new(100, 20);
        // No paragraph, line, sentence, or word boundaries anywhere
        let text = numbered_words(250).replace(' ', "-");
        let chunks = chunker.chunk(&text);

        assert!(chunks.len() >= 3);
        for chunk in &chunks {
            assert!(chunk.len() <= 100);
        }
        assert_eq!(rejoin(&chunks), text);
    }

    #[test]
    fn test_zero_overlap() {
        let chunker = TextChunker::new(100, 0);
        let text = numbered_words(350);
        let chunks = chunker.chunk(&text);

        let total: usize = chunks.iter().map(|c| c.len()).sum();
        assert_eq!(total, text.len());
        assert_eq!(chunks.concat(), text);
    }
}
