#![deny(missing_docs)]

//! # regway-core — Foundational Types for Regway
//!
//! Defines the types the rest of the workspace depends on: the Beckn-style
//! protocol [`Envelope`] and the [`KnowledgeChunk`] unit of regulatory
//! reference text. No internal crate dependencies — only `serde`,
//! `serde_json`, and `utoipa` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Availability over schema strictness.** Envelope parsing never fails:
//!    missing or malformed context fields collapse to the [`UNKNOWN_FIELD`]
//!    sentinel so that every inbound interaction can be recorded.
//!
//! 2. **Opaque payload passthrough.** The envelope `message` is carried as
//!    raw JSON and never interpreted by this workspace.

pub mod chunk;
pub mod envelope;

pub use chunk::KnowledgeChunk;
pub use envelope::{Envelope, EnvelopeContext, UNKNOWN_FIELD};
