use crate::common::Int;
use crate::trace::{Level, Trace};
use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Token {
    #[token("d")]
    Dice,
    #[token("h")]
    Highest,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[regex(r"[0-9]+", |lex| lex.slice().parse())]
    Integer(Int),

    // Whitespace is deliberately not skipped.
    #[error]
    Error,
}

impl Token {
    pub fn as_str(&self) -> &'static str {
        use Token::*;

        match self {
            Dice => "'d'",
            Highest => "'h'",
            LeftParen => "'('",
            RightParen => "')'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Integer(_) => "<integer>",
            Error => "<error>",
        }
    }

    pub fn as_binary_op(&self) -> Option<BinaryOperator> {
        use BinaryOperator::*;
        Some(match self {
            Self::Plus => Add,
            Self::Minus => Sub,
            Self::Star => Mul,
            Self::Slash => Div,
            _ => return None,
        })
    }
}

/// Canonical source text of the token.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Token::*;

        match self {
            Dice => f.write_str("d"),
            Highest => f.write_str("h"),
            LeftParen => f.write_str("("),
            RightParen => f.write_str(")"),
            Plus => f.write_str("+"),
            Minus => f.write_str("-"),
            Star => f.write_str("*"),
            Slash => f.write_str("/"),
            Integer(x) => fmt::Display::fmt(x, f),
            Error => f.write_str("<error>"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Sub => "minus",
            Self::Mul => "times",
            Self::Div => "divided by",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("unknown token {found:?} at index {at_index}")]
pub struct TokenizeError {
    /// Byte offset of the first character no rule matched.
    pub at_index: usize,
    pub found: String,
}

pub fn tokenize(input: &str, trace: &mut Trace) -> Result<Vec<Token>, TokenizeError> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        if token == Token::Error {
            let at_index = lexer.span().start;
            trace.log(
                format!("Unknown token at index: {}", at_index),
                Level::Error,
            );
            return Err(TokenizeError {
                at_index,
                found: lexer.slice().to_string(),
            });
        }
        trace.log(lexer.slice(), Level::Tokenizer);
        tokens.push(token);
    }

    Ok(tokens)
}

/// Renders tokens back into source text that tokenizes to the same sequence.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}
