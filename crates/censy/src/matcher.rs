use crate::normalize::{normalize, NormalizedChar, SEPARATOR};
use crate::{CensyError, Result};
use once_cell::sync::Lazy;
use std::sync::Arc;

static ENGLISH: Lazy<Arc<Dataset>> = Lazy::new(|| {
    let dataset = Dataset::parse(include_str!("dataset.txt"), include_str!("whitelist.txt"))
        .unwrap_or_else(|err| panic!("BUG: the built-in english dataset is invalid: {err}"));
    Arc::new(dataset)
});

/// Byte range of the original text that matched a profanity pattern.
/// The `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    /// Returns the matched substring of the text this span was produced from
    pub fn as_str(self, text: &str) -> &str {
        &text[self.start..self.end]
    }
}

#[derive(Debug)]
struct Pattern {
    chars: Vec<char>,
    boundary_before: bool,
    boundary_after: bool,
}

impl Pattern {
    fn parse(line: usize, entry: &str) -> Result<Self> {
        let boundary_before = entry.starts_with('|');
        let boundary_after = entry.len() > 1 && entry.ends_with('|');

        let body = entry.trim_start_matches('|').trim_end_matches('|');
        let chars = normalized_chars(body);

        if chars.is_empty() {
            return Err(CensyError::EmptyDatasetEntry {
                line,
                entry: entry.to_owned(),
            });
        }

        Ok(Self {
            chars,
            boundary_before,
            boundary_after,
        })
    }

    /// Returns the ranges of indices into `text` where the pattern occurs
    fn find_all<'a>(
        &'a self,
        text: &'a [NormalizedChar],
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        let is_boundary =
            |char: Option<&NormalizedChar>| char.map_or(true, |char| char.char == SEPARATOR);

        occurrences(text, &self.chars)
            .filter(move |&(start, end)| {
                let before = start.checked_sub(1).and_then(|i| text.get(i));
                (!self.boundary_before || is_boundary(before))
                    && (!self.boundary_after || is_boundary(text.get(end)))
            })
    }
}

fn normalized_chars(text: &str) -> Vec<char> {
    let chars: Vec<_> = normalize(text).into_iter().map(|char| char.char).collect();

    // Leading and trailing separators would never let the pattern match
    // at the start or the end of the text
    let start = chars.iter().position(|&char| char != SEPARATOR).unwrap_or(chars.len());
    let end = chars.iter().rposition(|&char| char != SEPARATOR).map_or(start, |end| end + 1);

    chars[start..end].to_vec()
}

#[derive(Debug)]
struct Dataset {
    patterns: Vec<Pattern>,

    /// Normalized innocent terms that contain some of the patterns
    whitelist: Vec<Vec<char>>,
}

impl Dataset {
    fn parse(patterns: &str, whitelist: &str) -> Result<Self> {
        let patterns = entries(patterns)
            .map(|(line, entry)| Pattern::parse(line, entry))
            .collect::<Result<_>>()?;

        let whitelist = entries(whitelist)
            .map(|(_, entry)| normalized_chars(entry))
            .filter(|term| !term.is_empty())
            .collect();

        Ok(Self {
            patterns,
            whitelist,
        })
    }
}

/// Non-empty, non-comment lines with their 1-based line numbers
fn entries(file: &str) -> impl Iterator<Item = (usize, &str)> {
    file.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Finds profanity in the text using a fixed dataset of patterns. The text is
/// normalized before matching to defeat leetspeak, masking and repetitions.
///
/// Cloning is cheap, the dataset is shared.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    dataset: Arc<Dataset>,
}

impl TextMatcher {
    /// Matcher with the built-in english dataset
    pub fn english() -> Self {
        Self {
            dataset: ENGLISH.clone(),
        }
    }

    /// Creates a matcher from a custom dataset. Both `patterns` and `whitelist`
    /// contain one entry per line, lines starting with `#` are ignored.
    /// A pattern may be prefixed and/or suffixed with `|` to require a word
    /// boundary on that side.
    pub fn from_dataset(patterns: &str, whitelist: &str) -> Result<Self> {
        Ok(Self {
            dataset: Arc::new(Dataset::parse(patterns, whitelist)?),
        })
    }

    /// Returns the spans of `text` that match profanity, sorted by their
    /// position in the text. Overlapping spans may be returned, but each
    /// distinct span is returned only once.
    pub fn find_matches(&self, text: &str) -> Vec<MatchSpan> {
        let normalized = normalize(text);

        let whitelisted: Vec<_> = self
            .dataset
            .whitelist
            .iter()
            .flat_map(|term| occurrences(&normalized, term))
            .collect();

        let mut spans: Vec<_> = self
            .dataset
            .patterns
            .iter()
            .flat_map(|pattern| pattern.find_all(&normalized))
            .filter(|&(start, end)| {
                !whitelisted
                    .iter()
                    .any(|&(term_start, term_end)| term_start <= start && end <= term_end)
            })
            .map(|(start, end)| MatchSpan {
                start: normalized[start].start,
                end: normalized[end - 1].end,
            })
            .collect();

        spans.sort_unstable();
        spans.dedup();
        spans
    }
}

fn occurrences<'a>(
    text: &'a [NormalizedChar],
    term: &'a [char],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    text.windows(term.len())
        .enumerate()
        .filter(move |(_, window)| {
            window.iter().map(|char| char.char).eq(term.iter().copied())
        })
        .map(move |(start, _)| (start, start + term.len()))
}
