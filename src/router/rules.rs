//! Classification rules and the ordered cascade.
//!
//! Rules are evaluated against the lower-cased message in the order of
//! [`CASCADE`]; the first rule that fires decides the route. Vocabulary
//! terms are plain substring tests, so "hi" fires on "this" as well.

use regex::RegexSet;
use std::sync::LazyLock;

use super::types::{Domain, RouteKind};

pub const GREETING_TERMS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
    "how are you",
    "what's up",
    "howdy",
];

pub const CODE_TERMS: &[&str] = &[
    "json",
    "code",
    "function",
    "class",
    "api",
    "tool",
    "call",
    "format",
    "parse",
    "extract",
    "schema",
    "structure",
    "plan",
    "automate",
    "workflow",
    "execute",
    "generate code",
    "write script",
    "create function",
    "build api",
    "implement",
    "develop",
    "algorithm",
    "program",
    "script",
    "write a",
    "write an",
    "create a",
    "build a",
    "make a",
    "debug",
    "refactor",
    "optimize code",
];

/// Programming languages, tested like every other code term.
pub const LANGUAGE_TERMS: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "java",
    "rust",
    "go",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "scala",
    "sql",
    "html",
    "css",
    "bash",
    "haskell",
    "c++",
    "c#",
];

pub const REASONING_TERMS: &[&str] = &[
    "analyze",
    "compare",
    "contrast",
    "evaluate",
    "assess",
    "critique",
    "explain",
    "why",
    "reason",
    "logic",
    "think",
    "solve",
    "calculate",
    "math",
    "equation",
    "proof",
    "theorem",
    "creative",
    "write a story",
    "poem",
    "essay",
    "article",
    "brainstorm",
    "ideate",
    "design thinking",
    "strategy",
    "multi-step",
    "complex",
    "detailed analysis",
    "deep dive",
];

pub const RESEARCH_TERMS: &[&str] = &[
    "latest",
    "recent",
    "news",
    "current",
    "today",
    "now",
    "what is happening",
    "cite",
    "source",
    "research",
    "breaking",
    "update",
    "discover",
    "investigate",
    "analyze trends",
    "market research",
    "competitive analysis",
    "events",
    "happening",
    "developments",
    "situation",
    "status",
    "web search",
    "google",
    "look up",
];

pub const DOCUMENT_TERMS: &[&str] = &[
    "pdf",
    "document",
    "file",
    "codebase",
    "repository",
    "long",
    "entire",
    "whole",
    "full text",
    "analyze document",
    "summarize",
    "extract from",
    "process document",
    "parse file",
    "codebase analysis",
    "repository analysis",
];

/// Any one of these marks the message as a question.
pub static QUESTION_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"\?$",
        r"^(?:what|who|where|when|why|how|which|can|could|should|would)\b",
        r"tell me|explain|describe|define|compare|contrast|list|identify",
        r"what is|what are|how does|how do|why is|why are",
    ])
    .expect("question patterns are valid")
});

pub const AMBIGUOUS_TERMS: &[&str] = &[
    "meaning of life",
    "universe and everything",
    "make me a sandwich",
    "philosophical",
    "existential",
    "abstract",
    "remind me",
];

/// A message after normalization, plus the conversation signal.
#[derive(Debug, Clone)]
pub struct Query {
    pub text: String,
    pub context_size: i64,
}

impl Query {
    pub fn new(message: &str, context_size: i64) -> Self {
        Self {
            text: message.to_lowercase(),
            context_size,
        }
    }
}

/// Detection test attached to a rule.
#[derive(Debug)]
pub enum Predicate {
    /// Any term of any list is a substring of the message.
    Vocabulary(&'static [&'static [&'static str]]),
    /// Context size is strictly greater than the router's threshold.
    ContextAbove,
    /// Question patterns with the ambiguity veto.
    Question,
}

/// One entry of the cascade.
#[derive(Debug)]
pub struct Rule {
    pub domain: Domain,
    /// Template produced when the predicate fires. The question rule may
    /// produce [`RouteKind::AmbiguousQuery`] instead.
    pub kind: RouteKind,
    pub predicate: Predicate,
}

impl Rule {
    /// Evaluate this rule alone. Returns the decision template on a hit.
    pub fn evaluate(&self, query: &Query, long_context_threshold: i64) -> Option<RouteKind> {
        match &self.predicate {
            Predicate::Vocabulary(lists) => {
                let hit = lists.iter().any(|terms| contains_any(&query.text, terms));
                hit.then_some(self.kind)
            }
            Predicate::ContextAbove => {
                let above = query.context_size > long_context_threshold;
                above.then_some(self.kind)
            }
            Predicate::Question => classify_question(&query.text),
        }
    }

    /// Number of terms and patterns this rule checks, if any.
    pub fn vocabulary_len(&self) -> Option<usize> {
        match &self.predicate {
            Predicate::Vocabulary(lists) => Some(lists.iter().map(|terms| terms.len()).sum()),
            Predicate::ContextAbove => None,
            Predicate::Question => Some(QUESTION_PATTERNS.len() + AMBIGUOUS_TERMS.len()),
        }
    }
}

/// Stages 1 through 7. The fallback is not a rule: it is what remains when
/// none of these fire.
pub static CASCADE: [Rule; 7] = [
    Rule {
        domain: Domain::Greeting,
        kind: RouteKind::Greeting,
        predicate: Predicate::Vocabulary(&[GREETING_TERMS]),
    },
    Rule {
        domain: Domain::Code,
        kind: RouteKind::Code,
        predicate: Predicate::Vocabulary(&[CODE_TERMS, LANGUAGE_TERMS]),
    },
    Rule {
        domain: Domain::Reasoning,
        kind: RouteKind::Reasoning,
        predicate: Predicate::Vocabulary(&[REASONING_TERMS]),
    },
    Rule {
        domain: Domain::Research,
        kind: RouteKind::Research,
        predicate: Predicate::Vocabulary(&[RESEARCH_TERMS]),
    },
    Rule {
        domain: Domain::LongContext,
        kind: RouteKind::LongContext,
        predicate: Predicate::ContextAbove,
    },
    Rule {
        domain: Domain::LongDocument,
        kind: RouteKind::LongDocument,
        predicate: Predicate::Vocabulary(&[DOCUMENT_TERMS]),
    },
    Rule {
        domain: Domain::FactualQuestion,
        kind: RouteKind::FactualQuestion,
        predicate: Predicate::Question,
    },
];

fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

/// Question detection for an already lower-cased message.
///
/// Ambiguous phrasing vetoes the factual route whether or not the message
/// reads as a question.
pub fn classify_question(text: &str) -> Option<RouteKind> {
    if contains_any(text, AMBIGUOUS_TERMS) {
        return Some(RouteKind::AmbiguousQuery);
    }
    QUESTION_PATTERNS
        .is_match(text)
        .then_some(RouteKind::FactualQuestion)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(domain: Domain) -> &'static Rule {
        CASCADE.iter().find(|r| r.domain == domain).unwrap()
    }

    fn fires(domain: Domain, message: &str) -> bool {
        rule(domain).evaluate(&Query::new(message, 0), 10).is_some()
    }

    fn fires_at(context_size: i64, threshold: i64) -> bool {
        let query = Query::new("x", context_size);
        let rule = rule(Domain::LongContext);
        rule.evaluate(&query, threshold).is_some()
    }

    #[test]
    fn test_cascade_follows_domain_order() {
        let domains: Vec<Domain> = CASCADE.iter().map(|r| r.domain).collect();
        assert_eq!(domains, Domain::ORDER[..7].to_vec());
    }

    #[test]
    fn test_rules_produce_their_own_kind() {
        for rule in &CASCADE {
            assert_eq!(rule.kind.domain(), rule.domain);
        }
    }

    #[test]
    fn test_greeting_matches_anywhere_in_message() {
        assert!(fires(Domain::Greeting, "well, hello there"));
        assert!(fires(Domain::Greeting, "Good Morning"));
        assert!(!fires(Domain::Greeting, "purple elephants"));
    }

    #[test]
    fn test_greeting_is_a_substring_test() {
        // "this" contains "hi"
        assert!(fires(Domain::Greeting, "summarize this"));
    }

    #[test]
    fn test_code_vocabulary() {
        assert!(fires(Domain::Code, "parse this json"));
        assert!(fires(Domain::Code, "please refactor"));
        assert!(!fires(Domain::Code, "tell me about cats"));
    }

    #[test]
    fn test_language_names_are_substring_tests() {
        assert!(fires(Domain::Code, "i love rust"));
        assert!(fires(Domain::Code, "is c++ hard"));
        assert!(fires(Domain::Code, "learning c# now"));
        assert!(fires(Domain::Code, "go lang tips"));
        // "trust" contains "rust"
        assert!(fires(Domain::Code, "i trust nobody"));
    }

    #[test]
    fn test_reasoning_vocabulary() {
        assert!(fires(Domain::Reasoning, "analyze the revolution"));
        assert!(fires(Domain::Reasoning, "a poem about rain"));
        assert!(!fires(Domain::Reasoning, "purple elephants"));
    }

    #[test]
    fn test_research_vocabulary() {
        assert!(fires(Domain::Research, "latest election results"));
        assert!(fires(Domain::Research, "look up the weather"));
        assert!(!fires(Domain::Research, "purple elephants"));
    }

    #[test]
    fn test_context_override_is_strictly_greater() {
        assert!(!fires_at(10, 10));
        assert!(fires_at(11, 10));
        assert!(!fires_at(-5, 10));
        assert!(fires_at(3, 2));
    }

    #[test]
    fn test_document_vocabulary() {
        assert!(fires(Domain::LongDocument, "the attached pdf"));
        assert!(fires(Domain::LongDocument, "read the entire book"));
        assert!(!fires(Domain::LongDocument, "purple elephants"));
    }

    #[test]
    fn test_question_patterns() {
        let factual = Some(RouteKind::FactualQuestion);
        assert_eq!(classify_question("who wrote hamlet?"), factual);
        assert_eq!(classify_question("who wrote hamlet"), factual);
        assert_eq!(classify_question("describe the eiffel tower"), factual);
        assert_eq!(classify_question("so what are koalas"), factual);
        assert_eq!(classify_question("purple elephants dance"), None);
    }

    #[test]
    fn test_question_mark_must_be_last() {
        let factual = Some(RouteKind::FactualQuestion);
        assert_eq!(classify_question("paris is big?  "), None);
        assert_eq!(classify_question("paris is big?"), factual);
    }

    #[test]
    fn test_question_verbs_are_substring_tests() {
        let factual = Some(RouteKind::FactualQuestion);
        assert_eq!(classify_question("enlist three volunteers"), factual);
        assert_eq!(classify_question("a listing of birds"), factual);
    }

    #[test]
    fn test_question_words_only_count_at_start() {
        assert_eq!(classify_question("somehow it works"), None);
        assert_eq!(classify_question("i know who"), None);
    }

    #[test]
    fn test_ambiguity_vetoes_question() {
        let kind = classify_question("what is the meaning of life?");
        assert_eq!(kind, Some(RouteKind::AmbiguousQuery));
    }

    #[test]
    fn test_ambiguity_without_question() {
        let kind = classify_question("remind me to buy milk");
        assert_eq!(kind, Some(RouteKind::AmbiguousQuery));
    }

    #[test]
    fn test_vocabulary_len() {
        let greeting = rule(Domain::Greeting).vocabulary_len();
        let code = rule(Domain::Code).vocabulary_len();
        assert_eq!(greeting, Some(GREETING_TERMS.len()));
        assert_eq!(code, Some(CODE_TERMS.len() + LANGUAGE_TERMS.len()));
        assert_eq!(rule(Domain::LongContext).vocabulary_len(), None);
    }
}
