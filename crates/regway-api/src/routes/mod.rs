//! # Route Modules
//!
//! - [`events`] — protocol envelope ingestion and stored-event listing.
//! - [`guidance`] — regulatory guidance retrieval over the knowledge base.

pub mod events;
pub mod guidance;
