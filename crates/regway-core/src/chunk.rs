//! # Knowledge Chunk
//!
//! One unit of jurisdictional regulatory reference text, plus provenance
//! metadata. Chunks are loaded once at startup into an immutable knowledge
//! base and ranked against guidance queries; the provenance fields are
//! opaque to ranking and exist for display and audit.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A unit of regulatory reference text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct KnowledgeChunk {
    /// Unique stable identifier.
    pub id: String,
    /// Region or regulatory zone label (e.g., "UK", "EU").
    pub jurisdiction: String,
    /// Short categorization of the chunk.
    pub topic: String,
    /// When the cited provision takes effect. Opaque to ranking.
    pub effective_date: String,
    /// Where the text was sourced from. Opaque to ranking.
    pub source_url: String,
    /// Version label of the source document. Opaque to ranking.
    pub version: String,
    /// The body used for matching.
    pub text: String,
}
