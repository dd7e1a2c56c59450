use super::lexer::Token;
use crate::common::NonEmpty;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("error at token {position}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Index into the token sequence.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    MalformedRoll {
        found: Option<Token>,
        expected: NonEmpty<&'static str>,
    },
    UnmatchedParen {
        found: Option<Token>,
    },
    ExpectedOperand {
        found: Option<Token>,
    },
    TrailingInput {
        found: Token,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRoll { found, expected } => write!(
                f,
                "malformed roll; found {}, expected {}",
                fmt_found(found),
                expected.fmt_expected()
            ),
            Self::UnmatchedParen { found } => {
                write!(f, "unmatched parentheses; found {}", fmt_found(found))
            }
            Self::ExpectedOperand { found } => write!(
                f,
                "expected {}; found {}",
                OPERAND_STARTS.fmt_expected(),
                fmt_found(found)
            ),
            Self::TrailingInput { found } => {
                write!(f, "unexpected {} after complete expression", found.as_str())
            }
        }
    }
}

/// Tokens that can open an operand.
const OPERAND_STARTS: &[&str] = &["'('", "<integer>"];

fn fmt_found(found: &Option<Token>) -> &'static str {
    found.as_ref().map_or("end of input", Token::as_str)
}

trait FormatExpected {
    fn fmt_expected(&self) -> String;
}

impl FormatExpected for [&str] {
    fn fmt_expected(&self) -> String {
        match self {
            [] => unreachable!("expectation lists are never empty"),
            [a] => a.to_string(),
            [a, b] => format!("{} or {}", a, b),
            s => format!("{}, or {}", s[..s.len() - 1].join(", "), &s[s.len() - 1]),
        }
    }
}
