//! Persistent syntax-check channel contract.
//!
//! Checks are published fire-and-forget; results come back later through the
//! subscription, tagged with the content/language pair they were produced
//! for. The channel is process-wide and reconnects on its own; a subscriber
//! holds a scoped handle and is unregistered when the handle drops, so
//! re-subscribing on every session start never leaks duplicate listeners.

use serde::{Deserialize, Serialize};

use crate::kernel::language::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub content: String,
    pub language: Language,
}

/// The checking collaborator failed (transport or engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckError(pub String);

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Check failed: {}", self.0)
    }
}

impl std::error::Error for CheckError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// Error/warning lines for the checked content; empty means clean.
    Errors(Vec<String>),
    Failed(CheckError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReply {
    pub content: String,
    pub language: Language,
    pub outcome: CheckOutcome,
}

/// Scoped registration on the channel. Dropping it unsubscribes.
pub trait CheckSubscription: Send {}

pub type CheckDelivery = Box<dyn Fn(CheckReply) + Send + Sync + 'static>;

pub trait CheckChannel: Send + Sync {
    /// Fire-and-forget publish; the result, if any, is delivered to
    /// subscribers.
    fn publish(&self, request: CheckRequest);

    fn subscribe(&self, deliver: CheckDelivery) -> Box<dyn CheckSubscription>;
}
