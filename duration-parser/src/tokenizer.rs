//! Tokenizer - finds amount/unit pairs like "1.5h" or "30 minutes"
//!
//! Input is first normalized so that a comma between two digits becomes a
//! decimal point ("2,5" -> "2.5"). The replacement keeps the length, so
//! offsets in the normalized text line up with the original input.

use std::borrow::Cow;
use std::ops::Range as ByteRange;
use std::sync::LazyLock;
use regex::{CaptureMatches, Regex};

static DECIMAL_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]),([0-9])").expect("decimal comma pattern is valid")
});

/// Signed decimal amount with optional exponent, optional whitespace, then
/// a run of ASCII letters or mu (Greek lower/upper and the micro sign).
static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)\s*([a-zA-ZμΜµ]*)")
        .expect("duration pattern is valid")
});

/// Replace "digit,digit" with "digit.digit" in one non-overlapping pass.
///
/// "1,2,3" becomes "1.2,3": the second comma's left digit was already consumed.
pub fn normalize_decimal_commas(input: &str) -> Cow<'_, str> {
    DECIMAL_COMMA.replace_all(input, "${1}.${2}")
}

/// One amount/unit occurrence in the normalized input
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'t> {
    /// Whole matched text, including whitespace between amount and unit
    pub full: &'t str,
    /// Numeric part, e.g. "-1.5e3"
    pub amount: &'t str,
    /// Unit suffix, empty for a bare number
    pub unit: &'t str,
    /// Char offset of the first character
    pub start: usize,
    /// Char offset one past the last character
    pub end: usize,
    /// Byte span of `full` in the normalized input
    pub span: ByteRange<usize>,
}

/// Owns the normalized input and hands out token iterators over it
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    normalized: Cow<'a, str>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            normalized: normalize_decimal_commas(input),
        }
    }

    /// Input after decimal-comma normalization
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Lazily scan the normalized input left to right
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(&self.normalized)
    }
}

/// Single forward pass over the amount/unit occurrences of a text
pub struct Tokens<'t> {
    text: &'t str,
    captures: CaptureMatches<'static, 't>,
    byte_cursor: usize,
    char_cursor: usize,
}

impl<'t> Tokens<'t> {
    /// Scan `text` as-is, without decimal-comma normalization
    pub fn new(text: &'t str) -> Self {
        let pattern: &'static Regex = &DURATION_PATTERN;
        Tokens {
            text,
            captures: pattern.captures_iter(text),
            byte_cursor: 0,
            char_cursor: 0,
        }
    }
}

impl<'t> Iterator for Tokens<'t> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.captures.next()?;
        let full = caps.get(0)?;
        let amount = caps.get(1)?;
        let unit = caps.get(2).map_or("", |m| m.as_str());

        // Matches arrive in order, so counting from the previous end keeps this linear
        let start = self.char_cursor + self.text[self.byte_cursor..full.start()].chars().count();
        let end = start + full.as_str().chars().count();
        self.byte_cursor = full.end();
        self.char_cursor = end;

        Some(Match {
            full: full.as_str(),
            amount: amount.as_str(),
            unit,
            start,
            end,
            span: full.range(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> (String, Vec<(String, String, String, usize, usize)>) {
        let tokenizer = Tokenizer::new(input);
        let tokens = tokenizer
            .tokens()
            .map(|m| (m.full.to_string(), m.amount.to_string(), m.unit.to_string(), m.start, m.end))
            .collect();
        (tokenizer.normalized().to_string(), tokens)
    }

    fn scan(input: &str) -> Vec<(String, String, String, usize, usize)> {
        tokenize(input).1
    }

    fn token(full: &str, amount: &str, unit: &str, start: usize, end: usize) -> (String, String, String, usize, usize) {
        (full.to_string(), amount.to_string(), unit.to_string(), start, end)
    }

    #[test]
    fn test_normalize_decimal_commas() {
        assert_eq!(normalize_decimal_commas("2,5 days"), "2.5 days");
        assert_eq!(normalize_decimal_commas("1,2,3"), "1.2,3");
        assert_eq!(normalize_decimal_commas("1,5h, 2,5m"), "1.5h, 2.5m");
        assert_eq!(normalize_decimal_commas("a, b"), "a, b");
        assert!(matches!(normalize_decimal_commas("no commas"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_single_token() {
        assert_eq!(scan("5s"), vec![token("5s", "5", "s", 0, 2)]);
    }

    #[test]
    fn test_multiple_tokens_with_offsets() {
        assert_eq!(scan("1h 30m"), vec![
            token("1h", "1", "h", 0, 2),
            token("30m", "30", "m", 3, 6),
        ]);
    }

    #[test]
    fn test_whitespace_between_amount_and_unit() {
        assert_eq!(scan("2   hours"), vec![token("2   hours", "2", "hours", 0, 9)]);
        assert_eq!(scan("2\tmin"), vec![token("2\tmin", "2", "min", 0, 5)]);
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(scan("42"), vec![token("42", "42", "", 0, 2)]);
        assert_eq!(scan("1h 30"), vec![
            token("1h", "1", "h", 0, 2),
            token("30", "30", "", 3, 5),
        ]);
    }

    #[test]
    fn test_trailing_whitespace_belongs_to_match() {
        // The whitespace run is consumed even when no unit follows it
        assert_eq!(scan("7 , 8"), vec![
            token("7 ", "7", "", 0, 2),
            token("8", "8", "", 4, 5),
        ]);
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(scan("-5m")[0].1, "-5");
        assert_eq!(scan(".5h")[0].1, ".5");
        assert_eq!(scan("-.5h")[0].1, "-.5");
        assert_eq!(scan("1.5e3ms")[0].1, "1.5e3");
        assert_eq!(scan("2E-2s")[0].1, "2E-2");
        assert_eq!(scan("1e+2s")[0].1, "1e+2");
    }

    #[test]
    fn test_exponent_without_digits_is_a_unit() {
        assert_eq!(scan("3e"), vec![token("3e", "3", "e", 0, 2)]);
    }

    #[test]
    fn test_plus_sign_is_not_part_of_amount() {
        assert_eq!(scan("+5s"), vec![token("5s", "5", "s", 1, 3)]);
    }

    #[test]
    fn test_unit_letters_case_and_mu() {
        assert_eq!(scan("5MIN")[0].2, "MIN");
        assert_eq!(scan("5μs")[0].2, "μs");
        assert_eq!(scan("5µs")[0].2, "µs");
        // Digits and punctuation end the unit
        assert_eq!(scan("5s_x")[0].2, "s");
    }

    #[test]
    fn test_decimal_comma_tokens() {
        let (normalized, tokens) = tokenize("2,5 days");
        assert_eq!(normalized, "2.5 days");
        assert_eq!(tokens, vec![token("2.5 days", "2.5", "days", 0, 8)]);
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        // "μ" is two bytes in UTF-8
        let tokenizer = Tokenizer::new("5μs 10s");
        let tokens: Vec<Match> = tokenizer.tokens().collect();
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 3);
        assert_eq!(tokens[0].span, 0..4);
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[1].end, 7);
        assert_eq!(&tokenizer.normalized()[tokens[1].span.clone()], "10s");

        // Astral characters count once
        let tokenizer = Tokenizer::new("😀 5s");
        let tokens: Vec<Match> = tokenizer.tokens().collect();
        assert_eq!((tokens[0].start, tokens[0].end), (2, 4));
        assert_eq!(tokens[0].span, 5..7);
    }

    #[test]
    fn test_no_tokens() {
        assert!(scan("").is_empty());
        assert!(scan("soon, maybe later").is_empty());
    }

    #[test]
    fn test_text_between_tokens_is_ignored() {
        let tokens = scan("about 2 hours and 3 minutes");
        assert_eq!(tokens, vec![
            token("2 hours", "2", "hours", 6, 13),
            token("3 minutes", "3", "minutes", 18, 27),
        ]);
    }

    #[test]
    fn test_iterator_is_lazy_and_single_pass() {
        let tokenizer = Tokenizer::new("1s 2s 3s");
        let mut tokens = tokenizer.tokens();
        assert_eq!(tokens.next().unwrap().full, "1s");
        assert_eq!(tokens.next().unwrap().full, "2s");
        assert_eq!(tokens.next().unwrap().full, "3s");
        assert!(tokens.next().is_none());
        // A fresh iterator starts over
        assert_eq!(tokenizer.tokens().count(), 3);
    }
}
