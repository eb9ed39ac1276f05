//! Short, single-line previews of assistant replies.

use regex::Regex;
use std::num::NonZeroUsize;
use std::sync::LazyLock;

/// Number of words kept in a preview unless configured otherwise.
pub const DEFAULT_WORD_LIMIT: NonZeroUsize = NonZeroUsize::new(40).unwrap();

/// Shown when a reply has no prose left once code is stripped.
pub const FALLBACK_PREVIEW: &str = "Task Completed";

/// Appended when a preview was cut at the word limit.
pub const TRUNCATION_MARKER: &str = "...";

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("valid regex"));
// Unicode whitespace plus the byte order mark, which editors and models
// sometimes leave at the edges of a reply.
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x{FEFF}]+").expect("valid regex"));

/// Strip fenced and inline code and collapse whitespace to single spaces.
pub fn clean_text(text: &str) -> String {
    let text = FENCED_CODE.replace_all(text, "");
    let text = INLINE_CODE.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim_matches(' ').to_string()
}

/// Build a preview of at most `word_limit` words from `text`.
///
/// Never returns an empty string: text that is only code or whitespace
/// yields [`FALLBACK_PREVIEW`].
pub fn extract_preview(text: &str, word_limit: NonZeroUsize) -> String {
    let cleaned = clean_text(text);
    let words: Vec<&str> = cleaned.split(' ').filter(|w| !w.is_empty()).collect();

    if words.is_empty() {
        return FALLBACK_PREVIEW.to_string();
    }

    let limit = word_limit.get();
    if words.len() > limit {
        format!("{}{TRUNCATION_MARKER}", words[..limit].join(" "))
    } else {
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn strips_code_and_keeps_prose() {
        let text = "Done! Here's the ```code``` result.";
        assert_eq!(extract_preview(text, limit(40)), "Done! Here's the result.");
    }

    #[test]
    fn fenced_blocks_span_lines() {
        let text = "Updated the parser:\n\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n\nAll tests pass.";
        assert_eq!(
            extract_preview(text, DEFAULT_WORD_LIMIT),
            "Updated the parser: All tests pass."
        );
    }

    #[test]
    fn fenced_blocks_are_matched_lazily() {
        let text = "one ```a``` two ```b``` three";
        assert_eq!(extract_preview(text, DEFAULT_WORD_LIMIT), "one two three");
    }

    #[test]
    fn inline_code_is_removed() {
        let text = "Renamed `foo` to `bar` in `src/lib.rs`.";
        assert_eq!(extract_preview(text, DEFAULT_WORD_LIMIT), "Renamed to in .");
    }

    #[test]
    fn code_only_text_falls_back() {
        for text in ["```\nls -la\n```", "`x` `y`", "```a```\n\n`b`", "", "  \n\t "] {
            assert_eq!(extract_preview(text, DEFAULT_WORD_LIMIT), FALLBACK_PREVIEW, "{text:?}");
        }
    }

    #[test]
    fn byte_order_mark_counts_as_whitespace() {
        assert_eq!(extract_preview("\u{FEFF}", DEFAULT_WORD_LIMIT), FALLBACK_PREVIEW);
        assert_eq!(
            extract_preview("\u{FEFF}All done.\u{FEFF}", DEFAULT_WORD_LIMIT),
            "All done."
        );
        assert_eq!(clean_text("a\u{FEFF}b \u{FEFF} c"), "a b c");
    }

    #[test]
    fn short_text_is_not_truncated() {
        let text = "  several   words\n\nacross\tlines ";
        let preview = extract_preview(text, limit(4));
        assert_eq!(preview, "several words across lines");
        assert_eq!(preview, clean_text(text));
    }

    #[test]
    fn long_text_keeps_exactly_limit_words() {
        let text = (1..=50).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");
        let preview = extract_preview(&text, DEFAULT_WORD_LIMIT);

        let body = preview.strip_suffix(TRUNCATION_MARKER).unwrap();
        let words: Vec<&str> = body.split(' ').collect();
        assert_eq!(words.len(), 40);
        assert_eq!(words[0], "w1");
        assert_eq!(words[39], "w40");
    }

    #[test]
    fn limit_boundary() {
        assert_eq!(extract_preview("a b c", limit(3)), "a b c");
        assert_eq!(extract_preview("a b c d", limit(3)), "a b c...");
        assert_eq!(extract_preview("a b", limit(1)), "a...");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let samples = [
            "Done! Here's the ```code``` result.",
            "  lots\n\n of\t\twhitespace  ",
            "`inline` and ```\nblock\n``` mixed",
            "unterminated ``` fence stays",
        ];
        for text in samples {
            let once = clean_text(text);
            assert_eq!(clean_text(&once), once, "{text:?}");
        }
    }

    #[test]
    fn unterminated_fence_loses_its_first_pair() {
        // The inline pattern pairs the first two backticks.
        assert_eq!(clean_text("see ``` here"), "see ` here");
    }
}
