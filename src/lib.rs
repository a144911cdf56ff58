//! switchyard - content-based routing of chat queries to LLM providers
//!
//! This library provides the routing core (a deterministic cascade of
//! classification rules) plus the configuration it can be tuned with.

pub mod config;
pub mod error;
pub mod router;

pub use config::Config;
pub use error::{Error, Result};
pub use router::{route, ContentRouter, ProviderType, RoutingDecision};
