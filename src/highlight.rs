//! Locating a headword inside citation text.
//!
//! Citations are tokenized by the provider and re-joined with single spaces,
//! so a word can come back split (`"mo hab bat"`) or otherwise re-spaced.
//! The matcher allows any run of whitespace between the reference word's
//! characters and then confirms every hit against the cleaned word.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A contiguous piece of highlighted text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Span {
    pub text: String,
    pub emphasized: bool,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            emphasized: false,
        }
    }
}

/// Splits `text` into emphasized occurrences of `reference` and the rest.
///
/// Joining the returned spans reproduces `text` exactly. With no usable
/// reference word the whole text comes back as one plain span.
pub fn highlight(text: &str, reference: Option<&str>) -> Vec<Span> {
    Highlighter::new(reference).spans(text)
}

/// A reference word compiled once and applied to many texts.
#[derive(Debug, Clone)]
pub struct Highlighter {
    matcher: Option<(Regex, String)>,
}

impl Highlighter {
    pub fn new(reference: Option<&str>) -> Self {
        let matcher = reference
            .map(clean_reference)
            .filter(|word| !word.is_empty())
            .and_then(|cleaned| {
                let pattern = spaced_pattern(&cleaned)?;
                Some((pattern, cleaned.to_lowercase()))
            });
        Self { matcher }
    }

    /// Same contract as [`highlight`].
    pub fn spans(&self, text: &str) -> Vec<Span> {
        match &self.matcher {
            Some((pattern, target)) => highlight_with(pattern, target, text),
            None => vec![Span::plain(text)],
        }
    }
}

fn highlight_with(pattern: &Regex, target: &str, text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        if found.is_empty() {
            continue;
        }
        if !is_exact_hit(found.as_str(), target) {
            continue;
        }
        push_plain(&mut spans, &text[cursor..found.start()]);
        spans.push(Span {
            text: found.as_str().to_string(),
            emphasized: true,
        });
        cursor = found.end();
    }
    push_plain(&mut spans, &text[cursor..]);

    if spans.is_empty() {
        spans.push(Span::plain(text));
    }
    spans
}

/// Trims the word and drops every whitespace character and hyphen.
pub fn clean_reference(word: &str) -> String {
    word.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

fn spaced_pattern(cleaned: &str) -> Option<Regex> {
    let source = cleaned
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0u8; 4])))
        .collect::<Vec<_>>()
        .join(r"\s*");
    match RegexBuilder::new(&source).case_insensitive(true).build() {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            debug!(error = %err, "reference word does not compile to a pattern");
            None
        }
    }
}

fn is_exact_hit(matched: &str, target: &str) -> bool {
    let squeezed: String = matched.chars().filter(|c| !c.is_whitespace()).collect();
    squeezed.to_lowercase() == target
}

fn push_plain(spans: &mut Vec<Span>, text: &str) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if !last.emphasized => last.text.push_str(text),
        _ => spans.push(Span::plain(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(spans: &[Span]) -> String {
        spans.iter().map(|span| span.text.as_str()).collect()
    }

    fn emphasized(spans: &[Span]) -> Vec<&str> {
        spans
            .iter()
            .filter(|span| span.emphasized)
            .map(|span| span.text.as_str())
            .collect()
    }

    #[test]
    fn absent_or_blank_reference_is_identity() {
        for reference in [None, Some(""), Some("   "), Some(" - ")] {
            let spans = highlight("dil hi to hai", reference);
            assert_eq!(spans, vec![Span::plain("dil hi to hai")]);
        }
        assert_eq!(highlight("", None), vec![Span::plain("")]);
        assert_eq!(highlight("", Some("")), vec![Span::plain("")]);
    }

    #[test]
    fn empty_text_with_reference_is_single_plain_span() {
        assert_eq!(highlight("", Some("ishq")), vec![Span::plain("")]);
    }

    #[test]
    fn tolerates_inserted_whitespace() {
        let spans = highlight("a  b  c def", Some("abc"));
        assert_eq!(
            spans,
            vec![
                Span {
                    text: "a  b  c".to_string(),
                    emphasized: true,
                },
                Span::plain(" def"),
            ]
        );
    }

    #[test]
    fn matches_case_insensitively() {
        let spans = highlight("HELLO world", Some("hello"));
        assert_eq!(emphasized(&spans), vec!["HELLO"]);
        assert_eq!(joined(&spans), "HELLO world");
    }

    #[test]
    fn hyphens_and_spaces_in_reference_are_ignored() {
        let spans = highlight("yeh be-wafa nahin, bewafa hai", Some("be-wafa"));
        assert_eq!(emphasized(&spans), vec!["bewafa"]);
        assert_eq!(joined(&spans), "yeh be-wafa nahin, bewafa hai");
    }

    #[test]
    fn every_occurrence_is_emphasized() {
        let text = "ishq par zor nahin hai ye vo aatish ishq";
        let spans = highlight(text, Some("Ishq"));
        assert_eq!(emphasized(&spans), vec!["ishq", "ishq"]);
        assert_eq!(spans.first().map(|s| s.emphasized), Some(true));
        assert_eq!(joined(&spans), text);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let spans = highlight("price (a+b) rises", Some("(a+b)"));
        assert_eq!(emphasized(&spans), vec!["(a+b)"]);
        let spans = highlight("aab", Some("a+"));
        assert!(emphasized(&spans).is_empty());
        assert_eq!(joined(&spans), "aab");
    }

    #[test]
    fn non_latin_scripts_match() {
        let text = "दिल ही तो है न संग-ओ-ख़िश्त";
        let spans = highlight(text, Some("दिल"));
        assert_eq!(emphasized(&spans), vec!["दिल"]);
        assert_eq!(joined(&spans), text);

        let text = "عشق پر زور نہیں";
        let spans = highlight(text, Some("عشق"));
        assert_eq!(emphasized(&spans), vec!["عشق"]);
        assert_eq!(joined(&spans), text);
    }

    #[test]
    fn no_match_keeps_text_whole() {
        let spans = highlight("nothing to see", Some("mohabbat"));
        assert_eq!(spans, vec![Span::plain("nothing to see")]);
    }

    #[test]
    fn plain_spans_are_never_adjacent() {
        let spans = highlight("x ab y ab z", Some("ab"));
        for pair in spans.windows(2) {
            assert!(pair[0].emphasized || pair[1].emphasized);
        }
        assert!(spans.iter().all(|span| !span.text.is_empty()));
    }

    #[test]
    fn coverage_holds_across_inputs() {
        let texts = [
            "",
            " ",
            "abc",
            "a b c",
            "A\tB\nC abc",
            "zabcabcz",
            "ab cab c",
            "नज़र नज़र",
        ];
        let references = [None, Some(""), Some("abc"), Some("a b"), Some("नज़र"), Some("c")];
        for text in texts {
            for reference in references {
                let spans = highlight(text, reference);
                assert_eq!(joined(&spans), text, "text {text:?} reference {reference:?}");
                assert!(!spans.is_empty());
            }
        }
    }

    #[test]
    fn deterministic_output() {
        let text = "Dil-e-naadaan tujhe hua kya hai";
        assert_eq!(highlight(text, Some("naadaan")), highlight(text, Some("naadaan")));
    }

    #[test]
    fn compiled_highlighter_matches_one_shot_calls() {
        let highlighter = Highlighter::new(Some("ishq"));
        for text in ["ishq par zor", "i s h q", "", "kuchh aur"] {
            assert_eq!(highlighter.spans(text), highlight(text, Some("ishq")));
        }
        assert_eq!(Highlighter::new(Some(" - ")).spans("ishq"), vec![Span::plain("ishq")]);
    }
}
