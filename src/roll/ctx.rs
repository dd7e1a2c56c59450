use super::{error::RollError, roller::Roller, Evaluate, RResult};
use crate::common::Int;
use crate::parse::ast;
use crate::trace::Trace;

/// Upper bound on dice drawn for a single evaluation unless configured otherwise.
pub const DEFAULT_MAX_ROLLS: usize = 100_000;

pub struct RollContext<'t, R> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
    pub(crate) trace: &'t Trace,
}

impl<'t, R: Roller> RollContext<'t, R> {
    pub fn new(max_rolls: Option<usize>, roller: R, trace: &'t Trace) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
            trace,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R, trace: &'t Trace) -> Self {
        Self::new(Some(max_rolls), roller, trace)
    }

    pub fn new_unbounded(roller: R, trace: &'t Trace) -> Self {
        Self::new(None, roller, trace)
    }

    /// Dice drawn so far.
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    fn count_rolls(&mut self, n: usize) -> RResult<()> {
        self.rolls = self.rolls.saturating_add(n);
        if self.max_rolls.map_or(false, |max| self.rolls > max) {
            Err(RollError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    /// Draws `num` dice with `sides` faces; `sides` must be positive.
    pub fn roll(&mut self, num: usize, sides: Int) -> RResult<impl Iterator<Item = Int> + '_> {
        self.count_rolls(num)?;
        Ok(self.roller.roll_iter(num, sides))
    }

    /// Draws a single die with `sides` faces.
    pub fn roll_one(&mut self, sides: Int) -> RResult<Int> {
        self.count_rolls(1)?;
        Ok(self.roller.roll(sides))
    }

    pub fn eval(&mut self, expr: &ast::Expression) -> RResult<Int> {
        expr.eval(self)
    }
}
