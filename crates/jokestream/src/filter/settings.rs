use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Desired sensitivity of the content filter.
///
/// The content filter doesn't vary its matching by the strength yet, the
/// setting is stored and reported only.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FilterStrength {
    Minimal,
    Moderate,
    #[default]
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub enabled: bool,
    pub strength: FilterStrength,

    /// Words the user asked to block in addition to the built-in dataset.
    /// Stored lowercased. Not used by the matching yet.
    pub custom_blocklist: BTreeSet<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: FilterStrength::default(),
            custom_blocklist: BTreeSet::new(),
        }
    }
}

impl FilterSettings {
    /// Returns the new value of [`FilterSettings::enabled`]
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn set_strength(&mut self, strength: FilterStrength) {
        self.strength = strength;
    }

    /// Returns `false` if the word is empty or was already in the blocklist
    pub fn add_to_blocklist(&mut self, word: &str) -> bool {
        let word = normalize_word(word);
        !word.is_empty() && self.custom_blocklist.insert(word)
    }

    /// Returns `false` if the word wasn't in the blocklist
    pub fn remove_from_blocklist(&mut self, word: &str) -> bool {
        self.custom_blocklist.remove(&normalize_word(word))
    }
}

fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn defaults() {
        let settings = FilterSettings::default();

        assert!(settings.enabled);
        assert_eq!(settings.strength, FilterStrength::Strict);
        assert!(settings.custom_blocklist.is_empty());

        // Missing fields in the stored settings take the default values
        let settings: FilterSettings =
            serde_json::from_str(r#"{ "strength": "minimal" }"#).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.strength, FilterStrength::Minimal);
    }

    #[test]
    fn toggle() {
        let mut settings = FilterSettings::default();
        assert!(!settings.toggle());
        assert!(!settings.enabled);
        assert!(settings.toggle());
        assert!(settings.enabled);
    }

    #[test]
    fn blocklist() {
        let mut settings = FilterSettings::default();

        assert!(settings.add_to_blocklist("  Broccoli "));
        assert!(!settings.add_to_blocklist("broccoli"));
        assert!(!settings.add_to_blocklist("   "));
        assert!(settings.add_to_blocklist("puns"));

        expect![[r#"
            {
                "broccoli",
                "puns",
            }
        "#]]
        .assert_debug_eq(&settings.custom_blocklist);

        assert!(settings.remove_from_blocklist("BROCCOLI"));
        assert!(!settings.remove_from_blocklist("broccoli"));
        assert_eq!(settings.custom_blocklist.len(), 1);
    }

    #[test]
    fn strength_names() {
        assert_eq!("moderate".parse::<FilterStrength>().unwrap(), FilterStrength::Moderate);
        assert_eq!(FilterStrength::Minimal.to_string(), "minimal");

        let mut settings = FilterSettings::default();
        settings.set_strength(FilterStrength::Moderate);
        expect![[r#"{"enabled":true,"strength":"moderate","custom_blocklist":[]}"#]]
            .assert_eq(&serde_json::to_string(&settings).unwrap());
    }
}
