#![deny(missing_docs)]

//! # regway-kb — Regulatory Knowledge Base & Retrieval Ranker
//!
//! Holds the fixed collection of jurisdictional compliance text chunks and
//! the deterministic keyword-weighted ranker that orders them against a
//! guidance query.
//!
//! ## Design Principles
//!
//! 1. **Load once, never mutate.** [`KnowledgeBase`] is populated at process
//!    start from the dataset compiled into this crate. A malformed dataset
//!    is a startup failure, never a per-request error. After construction
//!    the collection is read-only and safe for unlimited concurrent readers.
//!
//! 2. **Explicit injection, no singleton.** The [`Retriever`] takes its
//!    knowledge base at construction time so tests can substitute fixture
//!    data.
//!
//! 3. **Deterministic ranking.** No randomness, no external model calls.
//!    Identical inputs against an unchanged knowledge base produce
//!    identical ordered output.

pub mod ranker;
pub mod store;

pub use ranker::{Retriever, DEFAULT_TOP_K};
pub use store::{KbError, KnowledgeBase};
