//! Step text validation.
//!
//! A step reads `<Keyword> <text>` where the keyword is `Given`, `When` or
//! `Then` (case-sensitive), followed by one space and at least one more
//! character. Line terminators are not allowed anywhere after the keyword.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepKeyword {
    Given,
    When,
    Then,
}

impl StepKeyword {
    pub const ALL: [StepKeyword; 3] = [StepKeyword::Given, StepKeyword::When, StepKeyword::Then];

    pub fn as_str(self) -> &'static str {
        match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
        }
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Split a valid step into its keyword and the text after the space.
pub fn parse_step_text(text: &str) -> Option<(StepKeyword, &str)> {
    StepKeyword::ALL.into_iter().find_map(|keyword| {
        let rest = text.strip_prefix(keyword.as_str())?.strip_prefix(' ')?;
        if rest.is_empty() || rest.chars().any(is_line_terminator) {
            None
        } else {
            Some((keyword, rest))
        }
    })
}

pub fn is_valid_step_text(text: &str) -> bool {
    parse_step_text(text).is_some()
}
