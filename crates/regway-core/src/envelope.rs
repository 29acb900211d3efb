//! # Protocol Envelope
//!
//! The Beckn-style context/message pair representing one commerce-protocol
//! interaction. The context sub-record carries identity and correlation
//! metadata; the message payload is opaque and preserved verbatim.
//!
//! ## Validation Policy
//!
//! [`Envelope::from_value`] never fails. A context field that is absent or
//! not a JSON string is replaced by the [`UNKNOWN_FIELD`] sentinel. This
//! favors availability — every inbound interaction is recordable — over
//! strict schema enforcement. Correlation keys (`action`,
//! `transaction_id`) therefore always hold a usable value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel substituted for any context field that is absent or malformed.
pub const UNKNOWN_FIELD: &str = "unknown";

/// The identity/metadata sub-record of an [`Envelope`].
///
/// All fields are strings. `action` and `transaction_id` are the
/// correlation keys used to identify the interaction downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeContext {
    /// Network domain (e.g., a Beckn domain code).
    pub domain: String,
    /// Protocol action (e.g., "search", "confirm", "on_status").
    pub action: String,
    /// Protocol core version the sender claims.
    pub core_version: String,
    /// Subscriber ID of the buyer-app platform.
    pub bap_id: String,
    /// Callback URI of the buyer-app platform.
    pub bap_uri: String,
    /// Transaction correlation key, stable across a protocol exchange.
    pub transaction_id: String,
    /// Per-message identifier.
    pub message_id: String,
    /// Sender-supplied timestamp, opaque to this workspace.
    pub timestamp: String,
    /// Time-to-live hint, opaque to this workspace.
    pub ttl: String,
}

/// One protocol interaction: a context sub-record plus an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Identity and correlation metadata.
    pub context: EnvelopeContext,
    /// The payload, preserved verbatim and never interpreted.
    pub message: Value,
}

/// Read a string field out of a context object, defaulting to the sentinel.
fn context_field(context: Option<&Value>, key: &str) -> String {
    context
        .and_then(|c| c.get(key))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_FIELD)
        .to_string()
}

impl Envelope {
    /// Build an envelope from arbitrary decoded JSON.
    ///
    /// Never fails: a missing or non-object `context`, or any context field
    /// that is absent or not a string, yields [`UNKNOWN_FIELD`] for that
    /// field. A missing `message` becomes JSON `null`.
    pub fn from_value(raw: &Value) -> Self {
        let context = raw.get("context").filter(|c| c.is_object());
        Self {
            context: EnvelopeContext {
                domain: context_field(context, "domain"),
                action: context_field(context, "action"),
                core_version: context_field(context, "core_version"),
                bap_id: context_field(context, "bap_id"),
                bap_uri: context_field(context, "bap_uri"),
                transaction_id: context_field(context, "transaction_id"),
                message_id: context_field(context, "message_id"),
                timestamp: context_field(context, "timestamp"),
                ttl: context_field(context, "ttl"),
            },
            message: raw.get("message").cloned().unwrap_or(Value::Null),
        }
    }
}
