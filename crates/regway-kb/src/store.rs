//! # Knowledge Base
//!
//! The immutable, in-memory collection of [`KnowledgeChunk`]s. Loaded once
//! from the dataset compiled into this crate; exposes a read-only accessor
//! and no mutation operations.

use regway_core::KnowledgeChunk;
use thiserror::Error;

/// The regulatory chunk dataset, compiled into the binary.
const EMBEDDED_DATASET: &str = include_str!("../data/chunks.json");

/// Failure to load the knowledge dataset at startup.
///
/// Fatal: a process that cannot load its corpus must not serve retrieval
/// requests. Never a per-request condition.
#[derive(Debug, Error)]
pub enum KbError {
    /// The dataset is not valid JSON or does not match the chunk schema.
    #[error("knowledge dataset malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The dataset decoded to zero chunks.
    #[error("knowledge dataset is empty")]
    Empty,
}

/// The fixed, ordered collection of regulatory knowledge chunks.
///
/// Immutable for the lifetime of the process. Dataset order is significant:
/// the ranker's tie-break preserves it.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    chunks: Vec<KnowledgeChunk>,
}

impl KnowledgeBase {
    /// Load the embedded dataset.
    ///
    /// # Errors
    ///
    /// Returns [`KbError`] if the compiled-in dataset is malformed or empty.
    pub fn load_embedded() -> Result<Self, KbError> {
        let base = Self::from_json(EMBEDDED_DATASET)?;
        tracing::info!(chunks = base.len(), "knowledge base loaded");
        Ok(base)
    }

    /// Parse a knowledge base from a JSON array of chunks.
    pub fn from_json(json: &str) -> Result<Self, KbError> {
        let chunks: Vec<KnowledgeChunk> = serde_json::from_str(json)?;
        if chunks.is_empty() {
            return Err(KbError::Empty);
        }
        Ok(Self { chunks })
    }

    /// Build a knowledge base directly from chunks. For fixture injection
    /// in tests; production loading goes through [`Self::load_embedded`].
    pub fn from_chunks(chunks: Vec<KnowledgeChunk>) -> Self {
        Self { chunks }
    }

    /// The full, fixed ordered sequence of chunks.
    pub fn chunks(&self) -> &[KnowledgeChunk] {
        &self.chunks
    }

    /// Number of chunks in the dataset.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the dataset holds no chunks. Only reachable via
    /// [`Self::from_chunks`]; loading rejects empty datasets.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Distinct jurisdiction labels, in dataset order of first appearance.
    pub fn jurisdictions(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for chunk in &self.chunks {
            if !seen.iter().any(|j: &String| j == &chunk.jurisdiction) {
                seen.push(chunk.jurisdiction.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_loads() {
        let base = KnowledgeBase::load_embedded().unwrap();
        assert!(!base.is_empty());
        // Every chunk carries a unique id.
        let mut ids: Vec<&str> = base.chunks().iter().map(|c| c.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total, "chunk ids must be unique");
    }

    #[test]
    fn malformed_json_is_a_load_failure() {
        let err = KnowledgeBase::from_json("{not json").unwrap_err();
        assert!(matches!(err, KbError::Malformed(_)));
    }

    #[test]
    fn schema_mismatch_is_a_load_failure() {
        let err = KnowledgeBase::from_json(r#"[{"id": "x"}]"#).unwrap_err();
        assert!(matches!(err, KbError::Malformed(_)));
    }

    #[test]
    fn empty_dataset_is_a_load_failure() {
        let err = KnowledgeBase::from_json("[]").unwrap_err();
        assert!(matches!(err, KbError::Empty));
    }

    #[test]
    fn jurisdictions_are_distinct_in_dataset_order() {
        let base = KnowledgeBase::load_embedded().unwrap();
        let jurisdictions = base.jurisdictions();
        assert_eq!(jurisdictions, vec!["UK", "EU", "IN"]);
    }

    #[test]
    fn chunks_accessor_preserves_dataset_order() {
        let base = KnowledgeBase::load_embedded().unwrap();
        assert_eq!(base.chunks()[0].id, "uk-secr-001");
        assert_eq!(base.chunks()[base.len() - 1].id, "in-cct-001");
    }
}
