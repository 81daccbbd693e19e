//! Inline markup tokenization
//!
//! Splits a cell's raw text into plain and tagged segments for downstream
//! rich-text styling. Single-pass and best-effort: a run opened by one tag
//! is closed by the next closing tag regardless of its name, and tags of
//! the same name do not nest.

use lazy_regex::{regex_captures, regex_is_match, regex_replace_all};

/// One segment of a tokenized cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    /// Plain text outside any tag pair
    Plain(String),
    /// A tagged run: the opening tag's name and the inner text with all
    /// tags stripped
    Tagged {
        /// Tag name from the opening `<tag>`
        tag: String,
        /// Inner text, tags removed
        text: String,
    },
}

impl MarkupToken {
    /// The segment's text
    pub fn text(&self) -> &str {
        match self {
            MarkupToken::Plain(s) => s,
            MarkupToken::Tagged { text, .. } => text,
        }
    }

    /// Check if this is a tagged run
    pub fn is_tagged(&self) -> bool {
        matches!(self, MarkupToken::Tagged { .. })
    }
}

/// Check whether text contains any `<...>` markup at all
pub fn has_markup(text: &str) -> bool {
    regex_is_match!(r"<[^>]+>", text)
}

/// True if the token starts with `<X>`
pub fn starts_with_tag(token: &str) -> bool {
    regex_is_match!(r"^<[^>]+>", token)
}

/// True if the token ends with `<X>` or `</X>`
pub fn ends_with_tag(token: &str) -> bool {
    regex_is_match!(r"<[^>]+>$", token)
}

/// Extract the tag name from a leading `<tagname...>`
///
/// # Examples
/// ```
/// use tally_sheets_core::tag_from_string;
///
/// assert_eq!(tag_from_string("<ins>adds</ins>").as_deref(), Some("ins"));
/// assert_eq!(tag_from_string("no tag"), None);
/// ```
pub fn tag_from_string(token: &str) -> Option<String> {
    regex_captures!(r"^<([^>]*)>", token).map(|(_, tag)| tag.to_string())
}

fn strip_tags(token: &str) -> String {
    regex_replace_all!(r"<[^>]*>", token, "").into_owned()
}

/// Tokenize a string of whitespace-separated words with inline tag markup.
///
/// Words are scanned left to right. A word that both opens and closes a
/// tag emits as one tagged run. A word that only opens a tag starts an
/// accumulation buffer; following words join it (space-separated) until a
/// word closes a tag, at which point the whole run emits as one tagged
/// token. Words outside any run emit as plain tokens. A run left open at
/// the end of input is dropped.
///
/// # Examples
/// ```
/// use tally_sheets_core::{split_markup, MarkupToken};
///
/// let tokens = split_markup("This <ins>adds</ins> ok?");
/// assert_eq!(tokens[0], MarkupToken::Plain("This".to_string()));
/// assert_eq!(
///     tokens[1],
///     MarkupToken::Tagged { tag: "ins".to_string(), text: "adds".to_string() }
/// );
/// ```
pub fn split_markup(text: &str) -> Vec<MarkupToken> {
    let mut tokens = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut tag_open = false;

    for word in text.split(char::is_whitespace) {
        let trimmed = word.trim();

        if starts_with_tag(word) && ends_with_tag(word) {
            tokens.push(tagged(trimmed));
        } else if starts_with_tag(word) {
            tag_open = true;
            buffer.clear();
            buffer.push(trimmed);
        } else if ends_with_tag(word) {
            buffer.push(trimmed);
            tokens.push(tagged(&buffer.join(" ")));
            buffer.clear();
            tag_open = false;
        } else if tag_open {
            buffer.push(trimmed);
        } else {
            tokens.push(MarkupToken::Plain(trimmed.to_string()));
        }
    }

    tokens
}

fn tagged(piece: &str) -> MarkupToken {
    match tag_from_string(piece) {
        Some(tag) => MarkupToken::Tagged {
            tag,
            text: strip_tags(piece),
        },
        // An unopened closer lands here; it never was a tagged run.
        None => MarkupToken::Plain(piece.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged_token(tag: &str, text: &str) -> MarkupToken {
        MarkupToken::Tagged {
            tag: tag.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn splits_plain_and_tagged() {
        let tokens = split_markup("This <ins>adds</ins> and this <del>removes</del> ok?");
        assert_eq!(
            tokens,
            vec![
                MarkupToken::Plain("This".to_string()),
                tagged_token("ins", "adds"),
                MarkupToken::Plain("and".to_string()),
                MarkupToken::Plain("this".to_string()),
                tagged_token("del", "removes"),
                MarkupToken::Plain("ok?".to_string()),
            ]
        );
    }

    #[test]
    fn multi_word_run_accumulates_until_close() {
        let tokens = split_markup("before <ins>two words here</ins> after");
        assert_eq!(
            tokens,
            vec![
                MarkupToken::Plain("before".to_string()),
                tagged_token("ins", "two words here"),
                MarkupToken::Plain("after".to_string()),
            ]
        );
    }

    #[test]
    fn close_tag_name_is_not_verified() {
        // Permissive matching: any closing tag terminates the open run.
        let tokens = split_markup("<ins>one two</del>");
        assert_eq!(tokens, vec![tagged_token("ins", "one two")]);
    }

    #[test]
    fn unclosed_run_is_dropped() {
        let tokens = split_markup("kept <ins>never closed");
        assert_eq!(tokens, vec![MarkupToken::Plain("kept".to_string())]);
    }

    #[test]
    fn unopened_closer_stays_plain() {
        let tokens = split_markup("x</b>");
        assert_eq!(tokens, vec![MarkupToken::Plain("x</b>".to_string())]);
    }

    #[test]
    fn tag_predicates() {
        assert!(starts_with_tag("<ins>adds"));
        assert!(!starts_with_tag("adds</ins>"));
        assert!(ends_with_tag("adds</ins>"));
        assert!(ends_with_tag("<ins>"));
        assert!(!ends_with_tag("<ins>adds"));
        assert_eq!(tag_from_string("<del>gone</del>").as_deref(), Some("del"));
        assert!(has_markup("a <b>c</b>"));
        assert!(!has_markup("no tags here"));
    }
}
