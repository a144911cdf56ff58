//! Content-based provider selection.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::rules::{Query, CASCADE};
use super::types::{Classification, ProviderType, RouteKind, RoutingDecision};
use crate::config::Config;

/// Context sizes strictly above this route to the long-context model.
pub const DEFAULT_LONG_CONTEXT_THRESHOLD: i64 = 10;

static DEFAULT_ROUTER: LazyLock<ContentRouter> = LazyLock::new(ContentRouter::default);

/// Route a message with the default thresholds and models.
///
/// Total: every input, including an empty message or a negative context
/// size, produces a decision.
pub fn route(message: &str, context_size: i64) -> RoutingDecision {
    DEFAULT_ROUTER.route(message, context_size)
}

/// Router that maps a message and conversation size to a provider and model.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct ContentRouter {
    long_context_threshold: i64,
    models: BTreeMap<RouteKind, String>,
}

impl Default for ContentRouter {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_CONTEXT_THRESHOLD, BTreeMap::new())
    }
}

impl ContentRouter {
    /// Create a router with a long-context threshold and per-kind model
    /// overrides. Kinds without an override use their default model.
    pub fn new(long_context_threshold: i64, model_overrides: BTreeMap<RouteKind, String>) -> Self {
        Self {
            long_context_threshold,
            models: model_overrides,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.router.long_context_threshold, config.models.clone())
    }

    pub fn long_context_threshold(&self) -> i64 {
        self.long_context_threshold
    }

    /// Select a provider and model for a message.
    pub fn route(&self, message: &str, context_size: i64) -> RoutingDecision {
        self.classify(message, context_size).decision
    }

    /// Like [`route`](Self::route), but also reports which stage fired.
    pub fn classify(&self, message: &str, context_size: i64) -> Classification {
        let query = Query::new(message, context_size);

        let kind = CASCADE
            .iter()
            .find_map(|rule| rule.evaluate(&query, self.long_context_threshold))
            .unwrap_or(RouteKind::Fallback);

        let decision = self.decision_for(kind, context_size);
        tracing::debug!(
            domain = %kind.domain(),
            kind = %kind,
            provider = %decision.provider,
            model = %decision.model,
            context_size,
            "Routed message"
        );

        Classification {
            domain: kind.domain(),
            kind,
            decision,
        }
    }

    /// Build the decision a given template produces.
    pub fn decision_for(&self, kind: RouteKind, context_size: i64) -> RoutingDecision {
        let (provider, model) = self.target(kind);
        RoutingDecision {
            provider,
            model: model.to_string(),
            reason: reason(kind, context_size),
        }
    }

    /// Provider and model (after overrides) for a template.
    pub fn target(&self, kind: RouteKind) -> (ProviderType, &str) {
        let model = self
            .models
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_model());
        (kind.provider(), model)
    }
}

fn reason(kind: RouteKind, context_size: i64) -> String {
    let text = match kind {
        RouteKind::Greeting => "Social greeting; a lightweight conversational model is enough",
        RouteKind::Code => "Code or tool use; Groq for fast inference and generous rate limits",
        RouteKind::Reasoning => "Complex reasoning or creative task; using a reasoning model",
        RouteKind::Research => "Real-time or research query; using web-grounded search",
        RouteKind::LongContext => {
            return format!("{context_size} prior turns; using a long-context model");
        }
        RouteKind::LongDocument => "Document or codebase scale input; using the high-capacity tier",
        RouteKind::FactualQuestion => "Factual question; using precise search with citations",
        RouteKind::AmbiguousQuery => "Ambiguous or open-ended request; using a fast model",
        RouteKind::Fallback => "No specific domain matched; using default web-grounded chat",
    };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(message: &str, context_size: i64) -> RouteKind {
        let router = ContentRouter::default();
        router.classify(message, context_size).kind
    }

    #[test]
    fn test_empty_message_falls_back() {
        assert_eq!(kind_of("", 0), RouteKind::Fallback);
    }

    #[test]
    fn test_greeting_checked_before_questions() {
        assert_eq!(kind_of("hey, what's up", 0), RouteKind::Greeting);
    }

    #[test]
    fn test_code_checked_before_questions() {
        let kind = kind_of("how do I write a python function to parse json?", 0);
        assert_eq!(kind, RouteKind::Code);
    }

    #[test]
    fn test_code_shadows_creative_writing() {
        // "write a story" is reasoning vocabulary, but "write a" hits first
        assert_eq!(kind_of("write a story about dragons", 0), RouteKind::Code);
    }

    #[test]
    fn test_language_substrings_route_to_code() {
        assert_eq!(kind_of("i trust nobody", 0), RouteKind::Code);
        assert_eq!(kind_of("go lang tips", 0), RouteKind::Code);
    }

    #[test]
    fn test_keyword_stages_beat_context_override() {
        assert_eq!(kind_of("hello", 11), RouteKind::Greeting);
        assert_eq!(kind_of("latest election results", 50), RouteKind::Research);
    }

    #[test]
    fn test_context_override_beats_documents_and_questions() {
        let pdf = "summarize the attached pdf";
        assert_eq!(kind_of(pdf, 11), RouteKind::LongContext);
        assert_eq!(kind_of("who wrote hamlet?", 11), RouteKind::LongContext);
        assert_eq!(kind_of(pdf, 10), RouteKind::LongDocument);
    }

    #[test]
    fn test_long_context_reason_includes_count() {
        let decision = ContentRouter::default().route("tell me about cats", 11);
        assert_eq!(decision.provider, ProviderType::Gemini);
        assert_eq!(decision.model, "gemini-1.5-flash");
        assert!(decision.reason.contains("11"));
    }

    #[test]
    fn test_custom_threshold() {
        let router = ContentRouter::new(3, BTreeMap::new());
        let above = router.classify("tell me about cats", 4);
        let at = router.classify("tell me about cats", 3);
        assert_eq!(above.kind, RouteKind::LongContext);
        assert_eq!(at.kind, RouteKind::FactualQuestion);
    }

    #[test]
    fn test_model_override_keeps_provider() {
        let mut overrides = BTreeMap::new();
        overrides.insert(RouteKind::Code, "llama-3.1-70b-versatile".to_string());
        let router = ContentRouter::new(DEFAULT_LONG_CONTEXT_THRESHOLD, overrides);

        let decision = router.route("debug my script", 0);
        assert_eq!(decision.provider, ProviderType::Groq);
        assert_eq!(decision.model, "llama-3.1-70b-versatile");

        // Other kinds are untouched
        let greeting = router.target(RouteKind::Greeting);
        assert_eq!(greeting, (ProviderType::OpenAi, "gpt-4o-mini"));
    }

    #[test]
    fn test_decision_for_every_kind_is_populated() {
        let router = ContentRouter::default();
        for kind in RouteKind::ALL {
            let decision = router.decision_for(kind, 0);
            assert_eq!(decision.provider, kind.provider());
            assert!(!decision.model.is_empty());
            assert!(!decision.reason.is_empty());
        }
    }

    #[test]
    fn test_free_function_matches_default_router() {
        let expected = ContentRouter::default().route("purple elephants dance", 0);
        assert_eq!(route("purple elephants dance", 0), expected);
    }
}
