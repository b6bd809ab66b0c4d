//! Message routing: keyword rules mapped to pipeline actions

/// What the pipeline does with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Record as a correction and acknowledge. Skips retrieval and inference.
    Correction,
    /// Augment with tool search results before inference.
    ToolSearch,
    /// Straight to inference.
    Direct,
}

/// Classifier seam. Swap in a different strategy without touching the pipeline.
pub trait MessageClassifier: Send + Sync {
    fn classify(&self, message: &str) -> Route;
}

/// Ordered `(keywords, route)` rules. First rule with a case-insensitive
/// substring hit wins; no hit means [`Route::Direct`].
#[derive(Debug, Clone)]
pub struct KeywordRouter {
    rules: Vec<(Vec<String>, Route)>,
}

pub const CORRECTION_KEYWORDS: [&str; 3] = ["fix", "correction", "wrong"];
pub const TOOL_KEYWORDS: [&str; 3] = ["search", "web", "vision"];

impl KeywordRouter {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Earlier rules take precedence.
    pub fn rule<I, S>(mut self, keywords: I, route: Route) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .collect();
        self.rules.push((keywords, route));
        self
    }
}

impl Default for KeywordRouter {
    fn default() -> Self {
        Self::empty()
            .rule(CORRECTION_KEYWORDS, Route::Correction)
            .rule(TOOL_KEYWORDS, Route::ToolSearch)
    }
}

impl MessageClassifier for KeywordRouter {
    fn classify(&self, message: &str) -> Route {
        let lower = message.to_lowercase();
        self.rules
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|(_, route)| *route)
            .unwrap_or(Route::Direct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules() {
        let r = KeywordRouter::default();
        assert_eq!(r.classify("please FIX this"), Route::Correction);
        assert_eq!(r.classify("That's Wrong"), Route::Correction);
        assert_eq!(r.classify("a correction"), Route::Correction);
        assert_eq!(r.classify("search the WEB"), Route::ToolSearch);
        assert_eq!(r.classify("vision please"), Route::ToolSearch);
        assert_eq!(r.classify("tell me a joke"), Route::Direct);
    }

    #[test]
    fn correction_beats_tool_search() {
        let r = KeywordRouter::default();
        assert_eq!(r.classify("fix the web search"), Route::Correction);
    }

    #[test]
    fn substring_matching() {
        // "prefix" contains "fix": the rule is substring-based.
        assert_eq!(KeywordRouter::default().classify("prefix"), Route::Correction);
    }

    #[test]
    fn custom_rules_and_empty_router() {
        let r = KeywordRouter::empty().rule(["LOOKUP"], Route::ToolSearch);
        assert_eq!(r.classify("lookup rust"), Route::ToolSearch);
        assert_eq!(r.classify("fix it"), Route::Direct);
        assert_eq!(KeywordRouter::empty().classify("anything"), Route::Direct);
    }
}
