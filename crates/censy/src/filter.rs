use crate::{CategoryDetector, CensorStrategy, Result, TextMatcher};

/// Verdict of the content filter for a single piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    pub is_clean: bool,

    /// Matched profanity substrings of the input in the order they occur in
    /// the text, followed by the labels of the matched categories.
    pub matched_categories: Vec<String>,

    /// Equals the input if it is clean. Otherwise contains the input with
    /// the profanity censored. Category matches don't censor anything.
    pub censored_text: Option<String>,
}

/// Content filtering engine that combines profanity matching with sensitive
/// topic detection.
#[derive(Debug)]
pub struct ContentFilter {
    matcher: TextMatcher,
    detector: CategoryDetector,
    censor: CensorStrategy,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentFilter {
    /// Filter with the built-in english profanity dataset and the default
    /// category rules
    pub fn new() -> Self {
        Self::from_parts(TextMatcher::english(), CategoryDetector::default())
    }

    pub fn from_parts(matcher: TextMatcher, detector: CategoryDetector) -> Self {
        Self {
            matcher,
            detector,
            censor: CensorStrategy::default(),
        }
    }

    pub fn with_censor(mut self, censor: CensorStrategy) -> Self {
        self.censor = censor;
        self
    }

    pub fn analyze(&self, text: &str) -> FilterResult {
        let spans = self.matcher.find_matches(text);
        let categories = self.detector.detect_categories(text);

        let is_clean = spans.is_empty() && categories.is_empty();

        let censored_text = if is_clean {
            text.to_owned()
        } else {
            self.censor.apply(text, &spans)
        };

        let matched_categories = spans
            .iter()
            .map(|span| span.as_str(text).to_owned())
            .chain(categories)
            .collect();

        let result = FilterResult {
            is_clean,
            matched_categories,
            censored_text: Some(censored_text),
        };

        tracing::trace!(?result, "Analyzed text");

        result
    }

    pub fn is_clean(&self, text: &str) -> bool {
        self.analyze(text).is_clean
    }

    /// Returns the text with the profanity censored
    pub fn clean(&self, text: &str) -> String {
        self.analyze(text)
            .censored_text
            .unwrap_or_else(|| text.to_owned())
    }

    /// Adds a category rule at runtime. See [`CategoryDetector::add_custom_pattern`]
    pub fn add_custom_pattern(&self, pattern: &str, category: &str) -> Result {
        self.detector.add_custom_pattern(pattern, category)
    }

    pub fn matcher(&self) -> &TextMatcher {
        &self.matcher
    }

    pub fn detector(&self) -> &CategoryDetector {
        &self.detector
    }

    pub fn censor(&self) -> CensorStrategy {
        self.censor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{expect, Expect};

    #[track_caller]
    fn assert_analyze(text: &str, expected: Expect) {
        expected.assert_debug_eq(&ContentFilter::new().analyze(text));
    }

    #[test]
    fn profanity_and_categories() {
        assert_analyze(
            "This fucking racist joke",
            expect![[r#"
                FilterResult {
                    is_clean: false,
                    matched_categories: [
                        "fuck",
                        "racism",
                    ],
                    censored_text: Some(
                        "This %&#%ing racist joke",
                    ),
                }
            "#]],
        );
    }

    #[test]
    fn category_only_match_is_not_censored() {
        assert_analyze(
            "Violent jokes are not funny",
            expect![[r#"
                FilterResult {
                    is_clean: false,
                    matched_categories: [
                        "violence",
                    ],
                    censored_text: Some(
                        "Violent jokes are not funny",
                    ),
                }
            "#]],
        );
    }

    #[test]
    fn clean_text_is_returned_unchanged() {
        let text = "Why don't skeletons fight each other? They don't have the guts.";
        let result = ContentFilter::new().analyze(text);

        assert_eq!(
            result,
            FilterResult {
                is_clean: true,
                matched_categories: vec![],
                censored_text: Some(text.to_owned()),
            }
        );
    }

    #[test]
    fn clean_removes_profanity() {
        let filter = ContentFilter::new();
        let text = "What the fuck is this?";

        let censored = filter.clean(text);

        expect!["What the %&#% is this?"].assert_eq(&censored);
        assert!(!filter.is_clean(text));
        assert!(!censored.contains("fuck"));
    }

    #[test]
    fn clean_is_idempotent() {
        let filter = ContentFilter::new();
        let texts = [
            "What the fuck is this?",
            "sh!t, this b4stard is a f.u.c.k.i.n.g dickhead",
            "you a$$hole, kiss my ass",
            "A racist and violent shitshow",
        ];

        for text in texts {
            let once = filter.clean(text);
            let twice = filter.clean(&once);
            assert_eq!(once, twice, "text: {text}");
            assert!(filter.matcher().find_matches(&once).is_empty(), "text: {once}");
        }

        let filter = ContentFilter::new().with_censor(CensorStrategy::KeepFirstChar);
        let once = filter.clean(texts[1]);
        assert_eq!(once, filter.clean(&once));
    }

    #[test]
    fn common_profanity_is_not_clean() {
        let filter = ContentFilter::new();

        let dirty = [
            "That porn joke",
            "He has a big penis",
            "Let's have sex",
            "rape is not funny",
            "Nice boobs",
            "you chink",
            "a kike",
        ];

        for text in dirty {
            assert!(!filter.is_clean(text), "text: {text}");
        }

        assert!(filter.is_clean("The children began to snigger"));
    }

    #[test]
    fn custom_pattern_affects_analysis() {
        let filter = ContentFilter::new();
        assert!(filter.is_clean("Knock knock, who's there? Broccoli"));

        filter.add_custom_pattern(r"\bbroccoli\b", "vegetables").unwrap();

        expect![[r#"
            [
                "vegetables",
            ]
        "#]]
        .assert_debug_eq(
            &filter
                .analyze("Knock knock, who's there? Broccoli")
                .matched_categories,
        );

        assert!(filter.add_custom_pattern("[", "broken").is_err());
        assert_eq!(filter.detector().rules().len(), 7);
    }
}
