use crate::normalize::OPAQUE_CHARS;
use crate::MatchSpan;

/// Defines how the matched spans of the text are redacted. Every character
/// of a span is replaced by exactly one character, so the censored text has
/// the same number of characters as the original.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CensorStrategy {
    /// `fuck` -> `%&#%`
    #[default]
    Grawlix,

    /// `fuck` -> `f###`
    KeepFirstChar,
}

impl CensorStrategy {
    fn replacement(self, position: usize, original: char) -> char {
        match self {
            Self::Grawlix => OPAQUE_CHARS[position % OPAQUE_CHARS.len()],
            Self::KeepFirstChar if position == 0 => original,
            Self::KeepFirstChar => '#',
        }
    }

    /// Replaces the characters inside of the given spans. The spans may
    /// overlap and don't need to be sorted.
    pub fn apply(self, text: &str, spans: &[MatchSpan]) -> String {
        let mut censored = String::with_capacity(text.len());
        let mut cursor = 0;

        for span in merge_spans(spans) {
            censored.push_str(&text[cursor..span.start]);

            let chars = span.as_str(text).chars().enumerate();
            censored.extend(chars.map(|(position, char)| self.replacement(position, char)));

            cursor = span.end;
        }

        censored.push_str(&text[cursor..]);
        censored
    }
}

fn merge_spans(spans: &[MatchSpan]) -> Vec<MatchSpan> {
    let mut spans = spans.to_vec();
    spans.sort_unstable();

    let mut merged: Vec<MatchSpan> = Vec::with_capacity(spans.len());

    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }

    merged
}
