pub mod ast;
mod error;
mod lexer;
mod parser;

use crate::trace::Trace;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::{render, tokenize, BinaryOperator, Token, TokenizeError};
pub use parser::Parser;

pub fn parse(tokens: &[Token], trace: &mut Trace) -> Result<ast::Expression, ParseError> {
    Parser::new(tokens, trace).parse()
}
