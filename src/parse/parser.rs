use super::ast::*;
use super::error::{ParseError, ParseErrorKind};
use super::lexer::Token;
use crate::common::*;
use crate::trace::{Level, Trace};

type PResult<T = Expression> = Result<T, ParseError>;

/// Recursive-descent parser over an already tokenized input.
///
/// ```text
/// add_sub -> mul_div (('+' | '-') add_sub)?
/// mul_div -> atom (('*' | '/') mul_div)?
/// atom    -> '(' add_sub ')' | INT ('d' INT ('h' INT)?)?
/// ```
///
/// Both binary levels recurse into themselves for the right operand, so
/// `10-3-2` groups as `10-(3-2)`.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    trace: &'a mut Trace,
}

impl<'a> Parser<'a> {
    const ADDITION_OPS: &'static [Token] = &[Token::Plus, Token::Minus];

    const MULTIPLICATION_OPS: &'static [Token] = &[Token::Star, Token::Slash];

    pub fn new(tokens: &'a [Token], trace: &'a mut Trace) -> Self {
        Self {
            tokens,
            pos: 0,
            trace,
        }
    }

    pub fn parse(mut self) -> PResult {
        let expr = self.parse_add_sub()?;
        match self.peek() {
            None => Ok(expr),
            Some(found) => self.error(
                ParseErrorKind::TrailingInput { found },
                "Unexpected input after expression",
            ),
        }
    }

    /// The next token, or `None` once every token has been consumed.
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    /// Moves past the current token. Does nothing at the end of input.
    fn consume(&mut self) {
        if let Some(token) = self.peek() {
            self.trace
                .log(format!("Consumed {}", token.as_str()), Level::Parser);
            self.pos += 1;
        }
    }

    fn matches(&self, kind: Token) -> bool {
        self.peek() == Some(kind)
    }

    fn match_op(&self, options: &[Token]) -> Option<BinaryOperator> {
        self.peek()
            .filter(|peeked| options.contains(peeked))
            .and_then(|peeked| peeked.as_binary_op())
    }

    fn error<T>(&mut self, kind: ParseErrorKind, msg: &str) -> PResult<T> {
        self.trace.log(msg, Level::Error);
        Err(ParseError {
            kind,
            position: self.pos,
        })
    }

    fn expect_integer(&mut self) -> PResult<Int> {
        match self.peek() {
            Some(Token::Integer(x)) => {
                self.consume();
                Ok(x)
            }
            found => self.error(
                ParseErrorKind::MalformedRoll {
                    found,
                    expected: vec1![Token::Integer(0).as_str()],
                },
                "Malformed roll",
            ),
        }
    }

    /// Wraps a grammar rule in the `{ ... }` block of the parser trace.
    fn rule(&mut self, body: fn(&mut Self) -> PResult) -> PResult {
        self.trace.log("{", Level::Parser);
        self.trace.indent();
        let ret = body(self);
        self.trace.unindent();
        self.trace.log("}", Level::Parser);
        ret
    }

    fn parse_add_sub(&mut self) -> PResult {
        self.rule(|this| {
            let lhs = this.parse_mul_div()?;
            match this.match_op(Self::ADDITION_OPS) {
                Some(op) => this.parse_rhs(op, lhs, Self::parse_add_sub),
                None => Ok(lhs),
            }
        })
    }

    fn parse_mul_div(&mut self) -> PResult {
        self.rule(|this| {
            let lhs = this.parse_atom()?;
            match this.match_op(Self::MULTIPLICATION_OPS) {
                Some(op) => this.parse_rhs(op, lhs, Self::parse_mul_div),
                None => Ok(lhs),
            }
        })
    }

    fn parse_rhs(
        &mut self,
        op: BinaryOperator,
        lhs: Expression,
        parse_rest: fn(&mut Self) -> PResult,
    ) -> PResult {
        self.consume();
        self.trace.log(op.name(), Level::Parser);
        let rhs = parse_rest(self)?;
        Ok(Expression::new_binary(op, lhs, rhs))
    }

    fn parse_atom(&mut self) -> PResult {
        match self.peek() {
            Some(Token::LeftParen) => self.parse_parens(),
            Some(Token::Integer(x)) => {
                self.consume();
                self.parse_integer(x)
            }
            found => self.error(
                ParseErrorKind::ExpectedOperand { found },
                "Expected number or parenthesis",
            ),
        }
    }

    fn parse_parens(&mut self) -> PResult {
        self.consume();
        self.trace.log("Parsing parenthetical", Level::Parser);
        let inner = self.parse_add_sub()?;
        if self.matches(Token::RightParen) {
            self.consume();
            Ok(inner)
        } else {
            let found = self.peek();
            self.error(
                ParseErrorKind::UnmatchedParen { found },
                "Unmatched parentheses",
            )
        }
    }

    /// Continues an atom that started with the integer `count`.
    fn parse_integer(&mut self, count: Int) -> PResult {
        if !self.matches(Token::Dice) {
            self.trace.log(format!("Num({})", count), Level::Parser);
            return Ok(Expression::new_literal(count));
        }

        self.consume();
        let sides = self.expect_integer()?;
        let keep_highest = if self.matches(Token::Highest) {
            self.consume();
            self.expect_integer()?
        } else {
            0
        };
        self.trace.log(
            format!("Roll({},{},{})", count, sides, keep_highest),
            Level::Parser,
        );
        Ok(Expression::Roll(Roll::new(
            count,
            sides,
            keep_highest,
            self.trace,
        )))
    }
}
