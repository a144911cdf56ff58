//! Router module for content-based provider selection.
//!
//! This module decides which provider and model should answer a message,
//! based on:
//! - Keyword vocabularies (greeting, code, reasoning, research, documents)
//! - Conversation size
//! - Question patterns, with a veto for ambiguous requests

pub mod rules;
mod selector;
mod types;

pub use selector::{route, ContentRouter, DEFAULT_LONG_CONTEXT_THRESHOLD};
pub use types::{Classification, Domain, ProviderType, RouteKind, RoutingDecision};
