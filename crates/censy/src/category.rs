use crate::{CensyError, Result};
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};

/// Text pattern that labels the text with a sensitive topic category when
/// it matches.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub pattern: Regex,
    pub category: String,
}

impl CategoryRule {
    fn new(pattern: &Regex, category: &str) -> Self {
        Self {
            pattern: pattern.clone(),
            category: category.to_owned(),
        }
    }
}

fn default_rules() -> Vec<CategoryRule> {
    use lazy_regex::regex;

    vec![
        CategoryRule::new(regex!(r"\brac(ist|ism|ial)\b"i), "racism"),
        CategoryRule::new(regex!(r"\bdiscriminat\w*\b"i), "discrimination"),
        CategoryRule::new(regex!(r"\b(violence|violent|abuse)\b"i), "violence"),
        CategoryRule::new(regex!(r"\bhate\s*(speech|crime)?\b"i), "hate"),
        CategoryRule::new(regex!(r"\b(suicide|self.?harm)\b"i), "self-harm"),
        CategoryRule::new(regex!(r"\b(terror|extremis[mt])\b"i), "extremism"),
    ]
}

/// Ordered, append-only set of category rules evaluated against the raw text.
/// New rules may be added while the detector is shared between threads.
#[derive(Debug)]
pub struct CategoryDetector {
    rules: RwLock<Vec<CategoryRule>>,
}

impl Default for CategoryDetector {
    fn default() -> Self {
        Self::with_rules(default_rules())
    }
}

impl CategoryDetector {
    pub fn with_rules(rules: Vec<CategoryRule>) -> Self {
        Self {
            rules: RwLock::new(rules),
        }
    }

    /// Returns the categories of the rules that match the text in the order
    /// the rules were added. Every category is listed at most once.
    pub fn detect_categories(&self, text: &str) -> Vec<String> {
        let mut categories: Vec<String> = vec![];

        for rule in self.rules.read().iter() {
            if rule.pattern.is_match(text) && !categories.contains(&rule.category) {
                categories.push(rule.category.clone());
            }
        }

        categories
    }

    /// Compiles the pattern case-insensitively and appends it to the rules.
    /// If the pattern is invalid the rules are left untouched.
    pub fn add_custom_pattern(&self, pattern: &str, category: &str) -> Result {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| CensyError::InvalidPattern {
                pattern: pattern.to_owned(),
                category: category.to_owned(),
                source,
            })?;

        tracing::debug!(pattern, category, "Adding custom category pattern");

        self.rules.write().push(CategoryRule {
            pattern: compiled,
            category: category.to_owned(),
        });

        Ok(())
    }

    pub fn rules(&self) -> Vec<CategoryRule> {
        self.rules.read().clone()
    }
}
