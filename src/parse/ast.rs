use crate::common::*;
use crate::roll::Evaluate;
use crate::trace::{Level, Trace};
use std::fmt;

pub use super::lexer::BinaryOperator;

#[derive(Debug, Clone, Eq, PartialEq)]
#[enum_dispatch::enum_dispatch(Evaluate)]
pub enum Expression {
    Literal(Literal),
    Binary(Binary),
    Roll(Roll),
}

impl Expression {
    pub fn new_literal(value: Int) -> Self {
        Self::Literal(Literal { value })
    }

    pub fn new_binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Self::Binary(Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Literal {
    pub value: Int,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Binary {
    pub op: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// `count` dice with `sides` faces, summing only the highest `keep_highest`
/// of them unless it is zero.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Roll {
    pub count: Int,
    pub sides: Int,
    pub keep_highest: Int,
}

impl Roll {
    /// Degenerate parameters are reported but still accepted.
    pub fn new(count: Int, sides: Int, keep_highest: Int, trace: &Trace) -> Self {
        if count <= 0 {
            trace.log("Can't roll fewer than 1 dice!", Level::Error);
        }
        if count > 0 && keep_highest >= count {
            trace.log(
                format!(
                    "Can't keep the highest {} rolls when only {} dice are rolled!",
                    keep_highest, count
                ),
                Level::Error,
            );
        }
        Self {
            count,
            sides,
            keep_highest,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => fmt::Display::fmt(&lit.value, f),
            Self::Binary(bin) => write!(f, "({}{}{})", bin.left, bin.op, bin.right),
            Self::Roll(roll) => fmt::Display::fmt(roll, f),
        }
    }
}

/// Written in the notation the parser reads back.
impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.keep_highest > 0 {
            write!(f, "h{}", self.keep_highest)?;
        }
        Ok(())
    }
}
