//! Routing decision types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend LLM services a query can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Low-latency inference, used for code and vague requests.
    Groq,
    /// Conversational and reasoning models.
    OpenAi,
    /// Web-grounded search with citations.
    Perplexity,
    /// Long-context models.
    Gemini,
}

impl ProviderType {
    /// Every provider, in declaration order.
    pub const ALL: [ProviderType; 4] = [
        ProviderType::Groq,
        ProviderType::OpenAi,
        ProviderType::Perplexity,
        ProviderType::Gemini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Groq => "groq",
            ProviderType::OpenAi => "openai",
            ProviderType::Perplexity => "perplexity",
            ProviderType::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "openai" => Ok(Self::OpenAi),
            "perplexity" => Ok(Self::Perplexity),
            "gemini" => Ok(Self::Gemini),
            _ => Err(format!(
                "invalid provider '{}', expected: groq, openai, perplexity, gemini",
                s
            )),
        }
    }
}

/// The outcome of routing a single message.
///
/// `reason` is for logs and display only; callers should branch on
/// `provider` and `model`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub provider: ProviderType,
    pub model: String,
    pub reason: String,
}

/// One stage of the classification cascade, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Greeting,
    Code,
    Reasoning,
    Research,
    LongContext,
    LongDocument,
    FactualQuestion,
    Fallback,
}

impl Domain {
    /// All stages in the order the router consults them.
    pub const ORDER: [Domain; 8] = [
        Domain::Greeting,
        Domain::Code,
        Domain::Reasoning,
        Domain::Research,
        Domain::LongContext,
        Domain::LongDocument,
        Domain::FactualQuestion,
        Domain::Fallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Greeting => "greeting",
            Domain::Code => "code",
            Domain::Reasoning => "reasoning",
            Domain::Research => "research",
            Domain::LongContext => "long_context",
            Domain::LongDocument => "long_document",
            Domain::FactualQuestion => "factual_question",
            Domain::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A decision template. Each stage produces one of these; the
/// factual-question stage can also produce [`RouteKind::AmbiguousQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Greeting,
    Code,
    Reasoning,
    Research,
    LongContext,
    LongDocument,
    FactualQuestion,
    AmbiguousQuery,
    Fallback,
}

impl RouteKind {
    pub const ALL: [RouteKind; 9] = [
        RouteKind::Greeting,
        RouteKind::Code,
        RouteKind::Reasoning,
        RouteKind::Research,
        RouteKind::LongContext,
        RouteKind::LongDocument,
        RouteKind::FactualQuestion,
        RouteKind::AmbiguousQuery,
        RouteKind::Fallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Greeting => "greeting",
            RouteKind::Code => "code",
            RouteKind::Reasoning => "reasoning",
            RouteKind::Research => "research",
            RouteKind::LongContext => "long_context",
            RouteKind::LongDocument => "long_document",
            RouteKind::FactualQuestion => "factual_question",
            RouteKind::AmbiguousQuery => "ambiguous_query",
            RouteKind::Fallback => "fallback",
        }
    }

    /// Provider that serves this kind. Not configurable.
    pub fn provider(&self) -> ProviderType {
        match self {
            RouteKind::Greeting | RouteKind::Reasoning => ProviderType::OpenAi,
            RouteKind::Code | RouteKind::AmbiguousQuery => ProviderType::Groq,
            RouteKind::Research | RouteKind::FactualQuestion | RouteKind::Fallback => {
                ProviderType::Perplexity
            }
            RouteKind::LongContext | RouteKind::LongDocument => ProviderType::Gemini,
        }
    }

    /// Model used when no override is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            RouteKind::Greeting => "gpt-4o-mini",
            RouteKind::Code => "llama-3.3-70b-versatile",
            RouteKind::Reasoning => "o3-mini",
            RouteKind::Research => "sonar",
            RouteKind::LongContext => "gemini-1.5-flash",
            RouteKind::LongDocument => "gemini-1.5-pro",
            RouteKind::FactualQuestion => "sonar-pro",
            RouteKind::AmbiguousQuery => "llama-3.1-8b-instant",
            RouteKind::Fallback => "sonar",
        }
    }

    /// Stage that produces this kind.
    pub fn domain(&self) -> Domain {
        match self {
            RouteKind::Greeting => Domain::Greeting,
            RouteKind::Code => Domain::Code,
            RouteKind::Reasoning => Domain::Reasoning,
            RouteKind::Research => Domain::Research,
            RouteKind::LongContext => Domain::LongContext,
            RouteKind::LongDocument => Domain::LongDocument,
            RouteKind::FactualQuestion | RouteKind::AmbiguousQuery => Domain::FactualQuestion,
            RouteKind::Fallback => Domain::Fallback,
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A routing decision together with the stage and template that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub domain: Domain,
    pub kind: RouteKind,
    pub decision: RoutingDecision,
}

impl Classification {
    /// Pretty-printed JSON for display.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
