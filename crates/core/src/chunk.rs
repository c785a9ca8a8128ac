use serde::{Deserialize, Serialize};

use crate::extract::PageText;
use crate::normalization::{collapse_lines, split_paragraphs};

pub const MIN_CHUNK_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkConfig {
    pub min_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            min_chars: MIN_CHUNK_CHARS,
        }
    }
}

/// A normalized passage of document text tagged with its source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub document: String,
    pub page_number: u32,
    pub text: String,
}

pub struct ChunkExtractor {
    config: ChunkConfig,
}

impl ChunkExtractor {
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    pub fn chunk_pages(&self, document: &str, pages: &[PageText]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for page in pages {
            if page.text.trim().is_empty() {
                continue;
            }
            for paragraph in split_paragraphs(&page.text) {
                let cleaned = collapse_lines(paragraph);
                if cleaned.chars().count() > self.config.min_chars {
                    chunks.push(Chunk {
                        document: document.to_string(),
                        page_number: page.page_number,
                        text: cleaned,
                    });
                }
            }
        }
        chunks
    }
}
