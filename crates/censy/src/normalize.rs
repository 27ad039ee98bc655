//! Text normalization pipeline that defeats the most common ways of obfuscating
//! profanity: leetspeak, homoglyphs, masking characters and letter repetition.
use itertools::Itertools;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Word boundary in the normalized text
pub(crate) const SEPARATOR: char = ' ';

/// Characters that the censor writes into the text. They are normalized into
/// a single [`OPAQUE`] word character, so that censored text never produces
/// a match and doesn't change the word boundaries around the censored span.
pub(crate) const OPAQUE_CHARS: &[char] = &['%', '&', '#'];
const OPAQUE: char = '#';

/// Characters that are skipped entirely, so that `f.u.c.k` or `f*ck` lose
/// their masking.
const MASKS: &[char] = &['*', '.', '_', '~', '\'', '`'];

/// Aliases that resolve only when surrounded by word characters on both sides.
/// Otherwise they are too likely to be regular punctuation.
const MID_WORD_ALIASES: &[(char, char)] = &[('!', 'i'), ('|', 'i'), ('(', 'c')];

static ALIASES: Lazy<HashMap<char, char>> =
    Lazy::new(|| parse_aliases(include_str!("aliases.csv")));

fn parse_aliases(csv: &str) -> HashMap<char, char> {
    let single_char = |line: usize, symbol: &str| {
        symbol.chars().exactly_one().unwrap_or_else(|_| {
            panic!("BUG: aliases.csv:{line} has a multi-character symbol `{symbol}`");
        })
    };

    csv.split_terminator('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .flat_map(|(i, line)| {
            let line_number = i + 1;
            let mut symbols = line.split_whitespace();
            let root = symbols.next().unwrap_or_else(|| {
                panic!("BUG: aliases.csv:{line_number} doesn't have the root character");
            });
            let root = single_char(line_number, root);

            symbols
                .map(move |alias| (single_char(line_number, alias), root))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Character of the normalized text, that remembers the byte range of the
/// source text it was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NormalizedChar {
    pub(crate) char: char,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

enum CharClass {
    Word(char),
    Mask,
    Separator,
}

fn is_word_like(char: char) -> bool {
    char.is_alphanumeric() || ALIASES.contains_key(&char)
}

fn classify(prev: Option<char>, char: char, next: Option<char>) -> CharClass {
    let lower = char.to_lowercase().next().unwrap_or(char);

    if let Some(&root) = ALIASES.get(&lower) {
        return CharClass::Word(root);
    }

    if lower.is_alphanumeric() {
        return CharClass::Word(lower);
    }

    if OPAQUE_CHARS.contains(&char) {
        return CharClass::Word(OPAQUE);
    }

    if MASKS.contains(&char) {
        return CharClass::Mask;
    }

    let mid_word = MID_WORD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == char)
        .filter(|_| prev.is_some_and(is_word_like) && next.is_some_and(is_word_like));

    match mid_word {
        Some(&(_, root)) => CharClass::Word(root),
        None => CharClass::Separator,
    }
}

/// How many times a character may repeat in a row before the repetitions
/// are collapsed. Some letters are legitimately doubled in the dataset words.
fn max_repeats(char: char) -> usize {
    match char {
        'b' | 'e' | 'o' | 'l' | 's' | 'g' => 2,
        _ => 1,
    }
}

pub(crate) fn normalize(text: &str) -> Vec<NormalizedChar> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut output: Vec<NormalizedChar> = Vec::with_capacity(chars.len());

    // Number of identical characters at the tail of the output
    let mut run = 0;

    for (i, &(start, char)) in chars.iter().enumerate() {
        let end = start + char.len_utf8();
        let prev = i.checked_sub(1).map(|prev| chars[prev].1);
        let next = chars.get(i + 1).map(|&(_, next)| next);

        let normalized = match classify(prev, char, next) {
            CharClass::Word(char) => char,
            CharClass::Separator => SEPARATOR,
            CharClass::Mask => continue,
        };

        match output.last_mut() {
            Some(last) if last.char == normalized => {
                let collapses = normalized == SEPARATOR
                    || normalized == OPAQUE
                    || run >= max_repeats(normalized);

                if collapses {
                    last.end = end;
                    continue;
                }
                run += 1;
            }
            _ => run = 1,
        }

        output.push(NormalizedChar {
            char: normalized,
            start,
            end,
        });
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{expect, Expect};

    #[track_caller]
    fn assert_normalize(text: &str, expected: Expect) {
        let actual: String = normalize(text).iter().map(|char| char.char).collect();
        expected.assert_eq(&actual);
    }

    #[test]
    fn leetspeak_and_homoglyphs() {
        assert_normalize("sh!t happens", expect!["shit hapens"]);
        assert_normalize("a$$hole", expect!["asshole"]);
        assert_normalize("ph4ck 3v3ryth1ng", expect!["phack everything"]);
        assert_normalize("ÀBÇ", expect!["abc"]);
    }

    #[test]
    fn punctuation() {
        assert_normalize("f.u.c.k", expect!["fuck"]);
        assert_normalize("f*cking", expect!["fcking"]);
        assert_normalize("wow!! really?", expect!["wow really "]);
        assert_normalize("don't - stop", expect!["dont stop"]);
        assert_normalize("(hello)", expect![" hello "]);
    }

    #[test]
    fn repetitions() {
        assert_normalize("fuuuuuck", expect!["fuck"]);
        assert_normalize("asssss", expect!["ass"]);
        assert_normalize("boooooob", expect!["boob"]);
        assert_normalize("%&#%&#", expect!["#"]);
    }

    #[test]
    fn byte_ranges_cover_collapsed_characters() {
        let text = "fuuuck";
        let normalized = normalize(text);

        let ranges: Vec<_> = normalized.iter().map(|char| (char.start, char.end)).collect();

        expect!["[(0, 1), (1, 4), (4, 5), (5, 6)]"].assert_eq(&format!("{ranges:?}"));
    }
}
