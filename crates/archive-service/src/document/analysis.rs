//! Content analysis: integrity checksums and keyword extraction.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use tracing::debug;

/// Words never used as tags.
pub const STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "is",
];

/// Shortest token considered a keyword.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Most keywords returned by [`DocumentAnalysisService::extract_keywords`].
pub const MAX_KEYWORDS: usize = 5;

/// Stateless document analysis.
#[derive(Debug, Clone, Default)]
pub struct DocumentAnalysisService;

impl DocumentAnalysisService {
    /// Creates a new analysis service.
    pub fn new() -> Self {
        Self
    }

    /// SHA-256 of `data` as lower-case hex.
    pub fn calculate_checksum(&self, data: &[u8]) -> String {
        let digest = Sha256::digest(data);
        debug!(bytes = data.len(), "Calculated checksum");
        format!("{digest:x}")
    }

    /// Up to five most frequent keywords of `text`.
    ///
    /// Text is lower-cased and stripped of everything except ASCII letters,
    /// digits and whitespace. Tokens shorter than three characters and stop
    /// words are ignored. Equal counts keep the order of first occurrence.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
            .collect();

        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for word in normalized.split_whitespace() {
            if word.len() < MIN_KEYWORD_LEN || STOP_WORDS.contains(&word) {
                continue;
            }
            match index.get(word) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(word, counts.len());
                    counts.push((word, 1));
                }
            }
        }

        // Stable sort keeps first-occurrence order among ties.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .take(MAX_KEYWORDS)
            .map(|(word, _)| word.to_string())
            .collect()
    }
}
