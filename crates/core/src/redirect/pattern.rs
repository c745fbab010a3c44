//! Path templates used by redirect rules.
//!
//! A source template is a `/`-separated list of segments. Each segment is a
//! literal, `:name` (exactly one request segment) or `:name*` (one or more
//! trailing request segments). Literals are compared byte for byte: no case
//! folding and no percent-decoding, so `APIs and Tools` and
//! `APIs%20and%20Tools` are different segments.

use crate::error::SiteError;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Param(String),
    CatchAll(String),
}

/// Parsed source template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourcePattern {
    segments: Vec<Segment>,
}

/// Values captured by a successful match, keyed by capture name.
pub(crate) type Captures<'a> = HashMap<&'a str, String>;

impl SourcePattern {
    pub(crate) fn parse(source: &str) -> Result<Self, SiteError> {
        let Some(rest) = source.strip_prefix('/') else {
            return Err(SiteError::config(format!(
                "redirect source `{source}` must start with `/`"
            )));
        };

        let mut segments = Vec::new();
        if rest.is_empty() {
            return Ok(Self { segments });
        }

        let raw: Vec<&str> = rest.split('/').collect();
        for (index, part) in raw.iter().enumerate() {
            if part.is_empty() {
                return Err(SiteError::config(format!(
                    "redirect source `{source}` contains an empty segment"
                )));
            }
            let Some(capture) = part.strip_prefix(':') else {
                segments.push(Segment::Literal((*part).to_string()));
                continue;
            };

            let (name, catch_all) = match capture.strip_suffix('*') {
                Some(name) => (name, true),
                None => (capture, false),
            };
            if !is_capture_name(name) {
                return Err(SiteError::config(format!(
                    "redirect source `{source}` has an invalid capture `{part}`"
                )));
            }
            if segments.iter().any(|s| s.capture_name() == Some(name)) {
                return Err(SiteError::config(format!(
                    "redirect source `{source}` captures `{name}` twice"
                )));
            }
            if catch_all {
                if index + 1 != raw.len() {
                    return Err(SiteError::config(format!(
                        "redirect source `{source}`: `{part}` must be the last segment"
                    )));
                }
                segments.push(Segment::CatchAll(name.to_string()));
            } else {
                segments.push(Segment::Param(name.to_string()));
            }
        }

        Ok(Self { segments })
    }

    pub(crate) fn has_capture(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s.capture_name() == Some(name))
    }

    /// Matches a request path (without query string) against the template.
    pub(crate) fn matches<'p>(&'p self, path: &str) -> Option<Captures<'p>> {
        let request = split_path(path);
        let mut captures = Captures::new();
        let mut cursor = 0usize;

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    if request.get(cursor) != Some(&literal.as_str()) {
                        return None;
                    }
                    cursor += 1;
                }
                Segment::Param(name) => {
                    let value = request.get(cursor).filter(|v| !v.is_empty())?;
                    captures.insert(name.as_str(), (*value).to_string());
                    cursor += 1;
                }
                Segment::CatchAll(name) => {
                    let tail = &request[cursor.min(request.len())..];
                    if tail.is_empty() || tail.iter().any(|v| v.is_empty()) {
                        return None;
                    }
                    captures.insert(name.as_str(), tail.join("/"));
                    cursor = request.len();
                }
            }
        }

        (cursor == request.len()).then_some(captures)
    }
}

impl Segment {
    fn capture_name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Param(name) | Segment::CatchAll(name) => Some(name),
        }
    }
}

/// Splits a request path into segments. `/` is the empty list; one trailing
/// slash is ignored.
fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

fn is_capture_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DestinationToken {
    Text(String),
    Capture(String),
}

/// Parsed destination template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DestinationPattern {
    tokens: Vec<DestinationToken>,
}

impl DestinationPattern {
    pub(crate) fn parse(destination: &str) -> Result<Self, SiteError> {
        if destination.is_empty() {
            return Err(SiteError::config("redirect destination must not be empty"));
        }

        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut chars = destination.char_indices().peekable();

        while let Some((_, ch)) = chars.next() {
            let starts_capture = ch == ':'
                && chars
                    .peek()
                    .is_some_and(|(_, next)| next.is_ascii_alphabetic() || *next == '_');
            if !starts_capture {
                text.push(ch);
                continue;
            }

            let mut name = String::new();
            while let Some((_, next)) = chars.peek() {
                if next.is_ascii_alphanumeric() || *next == '_' {
                    name.push(*next);
                    chars.next();
                } else {
                    break;
                }
            }
            if chars.peek().is_some_and(|(_, next)| *next == '*') {
                chars.next();
            }
            if !text.is_empty() {
                tokens.push(DestinationToken::Text(std::mem::take(&mut text)));
            }
            tokens.push(DestinationToken::Capture(name));
        }
        if !text.is_empty() {
            tokens.push(DestinationToken::Text(text));
        }

        Ok(Self { tokens })
    }

    pub(crate) fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            DestinationToken::Capture(name) => Some(name.as_str()),
            DestinationToken::Text(_) => None,
        })
    }

    /// Substitutes captured values verbatim.
    pub(crate) fn expand(&self, captures: &Captures<'_>) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                DestinationToken::Text(text) => out.push_str(text),
                DestinationToken::Capture(name) => {
                    if let Some(value) = captures.get(name.as_str()) {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(source: &str) -> SourcePattern {
        SourcePattern::parse(source).expect("pattern should parse")
    }

    #[test]
    fn root_matches_only_root() {
        let root = pattern("/");
        assert!(root.matches("/").is_some());
        assert!(root.matches("/docs").is_none());
    }

    #[test]
    fn literal_match_is_case_sensitive() {
        let p = pattern("/docs/Quick-Start");
        assert!(p.matches("/docs/Quick-Start").is_some());
        assert!(p.matches("/docs/quick-start").is_none());
    }

    #[test]
    fn param_captures_single_segment() {
        let p = pattern("/docs/:section");
        let captures = p.matches("/docs/core-concepts").unwrap();
        assert_eq!(captures["section"], "core-concepts");
        assert!(p.matches("/docs/core-concepts/accounts").is_none());
    }

    #[test]
    fn catch_all_needs_at_least_one_segment() {
        let p = pattern("/docs/Quick-Start/:path*");
        assert!(p.matches("/docs/Quick-Start").is_none());
        let captures = p.matches("/docs/Quick-Start/a/b/c").unwrap();
        assert_eq!(captures["path"], "a/b/c");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let p = pattern("/docs/:page");
        assert_eq!(p.matches("/docs/intro/").unwrap()["page"], "intro");
    }

    #[test]
    fn encoded_and_literal_spaces_are_distinct() {
        let literal = pattern("/docs/APIs and Tools/:path*");
        let encoded = pattern("/docs/APIs%20and%20Tools/:path*");
        assert!(literal.matches("/docs/APIs and Tools/x").is_some());
        assert!(literal.matches("/docs/APIs%20and%20Tools/x").is_none());
        assert!(encoded.matches("/docs/APIs%20and%20Tools/x").is_some());
        assert!(encoded.matches("/docs/APIs and Tools/x").is_none());
    }

    #[test]
    fn rejects_malformed_sources() {
        for source in ["docs", "/docs//x", "/docs/:", "/docs/:1x", "/:a*/b", "/:a/:a"] {
            let err = SourcePattern::parse(source).unwrap_err();
            assert!(err.is_configuration(), "{source}: {err}");
        }
    }

    #[test]
    fn destination_keeps_url_scheme_and_port() {
        let dest = DestinationPattern::parse("https://example.com:8080/:path*").unwrap();
        assert_eq!(dest.capture_names().collect::<Vec<_>>(), vec!["path"]);
        let mut captures = Captures::new();
        captures.insert("path", "a/b".to_string());
        assert_eq!(dest.expand(&captures), "https://example.com:8080/a/b");
    }
}
