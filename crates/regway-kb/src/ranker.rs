//! # Retrieval Ranker
//!
//! Deterministic keyword-weighted scoring of knowledge chunks against a
//! free-text query plus an optional jurisdiction hint. Purely a function of
//! its inputs and the immutable knowledge base: no side effects, no
//! randomness, safe for unlimited concurrent callers.

use std::sync::Arc;

use regway_core::KnowledgeChunk;

use crate::store::KnowledgeBase;

/// Result bound used when a caller does not specify one.
pub const DEFAULT_TOP_K: usize = 5;

/// Fixed, ordered keyword signals and their weights.
///
/// A signal's weight is added when the keyword appears in either the
/// lowercased query or the lowercased chunk text — not requiring both.
const KEYWORD_WEIGHTS: [(&str, u32); 7] = [
    ("secr", 3),
    ("csrd", 3),
    ("cbam", 3),
    ("assurance", 2),
    ("report", 1),
    ("scope", 1),
    ("tagging", 1),
];

/// Weight added when the jurisdiction hint matches a chunk's jurisdiction
/// case-insensitively.
const JURISDICTION_BONUS: u32 = 1;

/// Ranks knowledge chunks against guidance queries.
///
/// Holds its knowledge base behind an `Arc`: the base is constructed once
/// at startup and shared read-only across all request handlers.
#[derive(Debug, Clone)]
pub struct Retriever {
    base: Arc<KnowledgeBase>,
}

impl Retriever {
    /// Create a retriever over an already-loaded knowledge base.
    pub fn new(base: Arc<KnowledgeBase>) -> Self {
        Self { base }
    }

    /// The knowledge base this retriever ranks over.
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.base
    }

    /// Score and order chunks against `query`, returning at most `top_k`.
    ///
    /// Matching is case-insensitive. Ties retain dataset order (the sort is
    /// stable). An empty query still ranks deterministically on chunk-text
    /// keyword presence and the jurisdiction bonus; a hint matching no
    /// chunk simply never contributes.
    pub fn retrieve(
        &self,
        query: &str,
        jurisdiction: Option<&str>,
        top_k: usize,
    ) -> Vec<KnowledgeChunk> {
        let query_lower = query.to_lowercase();

        let mut scored: Vec<(u32, &KnowledgeChunk)> = self
            .base
            .chunks()
            .iter()
            .map(|chunk| (score_chunk(&query_lower, jurisdiction, chunk), chunk))
            .collect();

        // Stable sort: equal scores keep their dataset order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(top_k)
            .map(|(_, chunk)| chunk.clone())
            .collect()
    }
}

/// Compute the keyword-weighted score of one chunk. `query_lower` must
/// already be lowercased.
fn score_chunk(query_lower: &str, jurisdiction: Option<&str>, chunk: &KnowledgeChunk) -> u32 {
    let text_lower = chunk.text.to_lowercase();
    let mut score: u32 = KEYWORD_WEIGHTS
        .iter()
        .filter(|(keyword, _)| query_lower.contains(keyword) || text_lower.contains(keyword))
        .map(|(_, weight)| weight)
        .sum();

    if let Some(hint) = jurisdiction {
        if hint.eq_ignore_ascii_case(&chunk.jurisdiction) {
            score += JURISDICTION_BONUS;
        }
    }

    score
}
