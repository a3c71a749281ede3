//! Message tokenizing and issue reference detection

use chronicle_core::IssueRef;

/// Characters that separate tokens, in addition to whitespace
const SEPARATORS: &[char] = &[',', '.', ':', ';', '*', '?', '`', '!', '[', ']', '\''];

/// Check whether a character separates tokens
pub(crate) fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

/// A token and its byte span in the message it was cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Split a message into non-empty tokens
pub(crate) fn tokenize(message: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (idx, c) in message.char_indices() {
        match (is_separator(c), start) {
            (true, Some(s)) => {
                tokens.push(Token {
                    text: &message[s..idx],
                    start: s,
                    end: idx,
                });
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }

    if let Some(s) = start {
        tokens.push(Token {
            text: &message[s..],
            start: s,
            end: message.len(),
        });
    }

    tokens
}

/// Interpret a token as an issue reference.
///
/// Accepts `#12`, `repo#12` and `owner/repo#12`. Anything else, including
/// tokens with several `#` or a non-numeric id, is plain text.
pub(crate) fn parse_reference(token: &str) -> Option<IssueRef> {
    if token.len() < 2 || !token.contains('#') {
        return None;
    }

    let mut parts = token.split('#');
    let qualifier = parts.next()?;
    let id = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: u64 = id.parse().ok()?;

    let segments: Vec<&str> = qualifier.split('/').collect();
    match segments.as_slice() {
        [""] => Some(IssueRef::local(number)),
        [repo] => Some(IssueRef::in_repo(*repo, number)),
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Some(IssueRef::qualified(*owner, *repo, number))
        }
        _ => None,
    }
}
