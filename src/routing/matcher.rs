//! Path pattern matching.
//!
//! # Responsibilities
//! - Compile a route pattern into literal and capture tokens
//! - Match a location path against the tokens
//! - Collect named parameters for the activated controller
//!
//! # Design Decisions
//! - Literal text is case-sensitive unless the route opts out
//! - `/:name` captures one non-empty segment, `/:name?` an optional one
//! - `/:name*` captures the rest of the path (slashes included), trailing only
//! - No regex: explicit backtracking over tokens and a path cursor

use std::collections::BTreeMap;
use thiserror::Error;

/// Named parameters captured while matching.
pub type Params = BTreeMap<String, String>;

/// Errors raised while compiling a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern `{0}` must start with `/`")]
    NotAbsolute(String),

    #[error("pattern `{0}` has a parameter without a name")]
    EmptyParam(String),

    #[error("pattern `{pattern}` declares parameter `{name}` more than once")]
    DuplicateParam { pattern: String, name: String },

    #[error("pattern `{0}` has a wildcard parameter before its end")]
    WildcardNotLast(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Literal text, slashes included.
    Literal(String),
    /// `/:name`
    Segment(String),
    /// `/:name?`
    Optional(String),
    /// `/:name*`
    Wildcard(String),
}

/// A compiled route pattern such as `/page/composites/:className*`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    tokens: Vec<Token>,
    case_insensitive: bool,
}

impl PathPattern {
    /// Compile a pattern. Parameters are only recognised right after a `/`.
    pub fn compile(pattern: &str, case_insensitive: bool) -> Result<Self, PatternError> {
        if !pattern.starts_with('/') {
            return Err(PatternError::NotAbsolute(pattern.to_string()));
        }

        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut names: Vec<String> = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '/' && chars.peek() == Some(&':') {
                chars.next();
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }

                let mut name = String::new();
                while let Some(&n) = chars.peek() {
                    if n.is_alphanumeric() || n == '_' {
                        name.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    return Err(PatternError::EmptyParam(pattern.to_string()));
                }
                if names.contains(&name) {
                    return Err(PatternError::DuplicateParam {
                        pattern: pattern.to_string(),
                        name,
                    });
                }
                names.push(name.clone());

                let token = match chars.peek() {
                    Some('*') => {
                        chars.next();
                        Token::Wildcard(name)
                    }
                    Some('?') => {
                        chars.next();
                        Token::Optional(name)
                    }
                    _ => Token::Segment(name),
                };
                tokens.push(token);
            } else {
                literal.push(c);
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        let wildcard_before_end = tokens
            .iter()
            .rev()
            .skip(1)
            .any(|t| matches!(t, Token::Wildcard(_)));
        if wildcard_before_end {
            return Err(PatternError::WildcardNotLast(pattern.to_string()));
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
            case_insensitive,
        })
    }

    /// The pattern as declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Length of the literal text before the first parameter.
    pub fn literal_prefix_len(&self) -> usize {
        self.tokens
            .iter()
            .take_while(|t| matches!(t, Token::Literal(_)))
            .map(|t| match t {
                Token::Literal(s) => s.len(),
                _ => 0,
            })
            .sum()
    }

    /// Total length of literal text in the pattern.
    pub fn literal_len(&self) -> usize {
        self.tokens
            .iter()
            .map(|t| match t {
                Token::Literal(s) => s.len(),
                _ => 0,
            })
            .sum()
    }

    /// Match a path, returning the captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let mut params = Params::new();
        if self.match_tokens(&self.tokens, path, &mut params) {
            Some(params)
        } else {
            None
        }
    }

    fn match_tokens(&self, tokens: &[Token], path: &str, params: &mut Params) -> bool {
        let Some((head, rest)) = tokens.split_first() else {
            return path.is_empty();
        };

        match head {
            Token::Literal(lit) => match self.strip_literal(path, lit) {
                Some(remaining) => self.match_tokens(rest, remaining, params),
                None => false,
            },
            Token::Segment(name) => {
                let Some(after) = path.strip_prefix('/') else {
                    return false;
                };
                let segment_len = after.find('/').unwrap_or(after.len());
                self.try_capture(name, &after[..segment_len], after, rest, params)
            }
            Token::Optional(name) => {
                if let Some(after) = path.strip_prefix('/') {
                    let segment_len = after.find('/').unwrap_or(after.len());
                    if self.try_capture(name, &after[..segment_len], after, rest, params) {
                        return true;
                    }
                }
                self.match_tokens(rest, path, params)
            }
            Token::Wildcard(name) => {
                let Some(after) = path.strip_prefix('/') else {
                    return false;
                };
                self.try_capture(name, after, after, rest, params)
            }
        }
    }

    /// Try every non-empty prefix of `window`, longest first, as the value of `name`.
    fn try_capture(
        &self,
        name: &str,
        window: &str,
        after: &str,
        rest: &[Token],
        params: &mut Params,
    ) -> bool {
        let ends: Vec<usize> = window
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();

        for end in ends.into_iter().rev() {
            params.insert(name.to_string(), window[..end].to_string());
            if self.match_tokens(rest, &after[end..], params) {
                return true;
            }
            params.remove(name);
        }
        false
    }

    fn strip_literal<'p>(&self, path: &'p str, lit: &str) -> Option<&'p str> {
        let head = path.get(..lit.len())?;
        let equal = if self.case_insensitive {
            head.eq_ignore_ascii_case(lit)
        } else {
            head == lit
        };
        if equal {
            Some(&path[lit.len()..])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = PathPattern::compile("/page/runner/", false).unwrap();
        assert!(pattern.matches("/page/runner/").unwrap().is_empty());
        assert!(pattern.matches("/page/runner").is_none());
        assert!(pattern.matches("/page/runner/x").is_none());
        assert!(pattern.matches("/PAGE/runner/").is_none());
    }

    #[test]
    fn test_case_insensitive_literal() {
        let pattern = PathPattern::compile("/page/runner/", true).unwrap();
        assert!(pattern.matches("/PAGE/Runner/").is_some());
    }

    #[test]
    fn test_segment_param() {
        let pattern = PathPattern::compile("/stories/:id/edit", false).unwrap();
        let params = pattern.matches("/stories/42/edit").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));

        assert!(pattern.matches("/stories//edit").is_none());
        assert!(pattern.matches("/stories/4/2/edit").is_none());
    }

    #[test]
    fn test_segment_backtracks_into_literal() {
        let pattern = PathPattern::compile("/files/:name.json", false).unwrap();
        let params = pattern.matches("/files/report.json").unwrap();
        assert_eq!(params.get("name").map(String::as_str), Some("report"));
    }

    #[test]
    fn test_optional_param() {
        let pattern = PathPattern::compile("/runner/:suite?", false).unwrap();
        assert_eq!(
            pattern.matches("/runner/smoke").unwrap().get("suite").map(String::as_str),
            Some("smoke")
        );
        assert!(pattern.matches("/runner").unwrap().is_empty());
        assert!(pattern.matches("/runner/a/b").is_none());
    }

    #[test]
    fn test_wildcard_keeps_slashes() {
        let pattern = PathPattern::compile("/page/composites/:className*", false).unwrap();
        let params = pattern.matches("/page/composites/com/example/Foo").unwrap();
        assert_eq!(
            params.get("className").map(String::as_str),
            Some("com/example/Foo")
        );

        // At least one character after the slash.
        assert!(pattern.matches("/page/composites/").is_none());
        assert!(pattern.matches("/page/composites").is_none());
    }

    #[test]
    fn test_compile_errors() {
        assert_eq!(
            PathPattern::compile("page/", false).unwrap_err(),
            PatternError::NotAbsolute("page/".into())
        );
        assert!(matches!(
            PathPattern::compile("/a/:", false),
            Err(PatternError::EmptyParam(_))
        ));
        assert!(matches!(
            PathPattern::compile("/a/:x/:x", false),
            Err(PatternError::DuplicateParam { .. })
        ));
        assert!(matches!(
            PathPattern::compile("/a/:rest*/tail", false),
            Err(PatternError::WildcardNotLast(_))
        ));
    }

    #[test]
    fn test_specificity_lengths() {
        let pattern = PathPattern::compile("/page/stories/new/:path*", false).unwrap();
        assert_eq!(pattern.literal_prefix_len(), "/page/stories/new".len());
        assert_eq!(pattern.literal_len(), "/page/stories/new".len());
    }
}
