use super::{error::RollError, roller::Roller, RResult, RollContext};
use crate::common::Int;
use crate::parse::ast::{Binary, BinaryOperator, Literal, Roll};
use crate::trace::Level;

// Paths are spelled out in full because `enum_dispatch` pastes this
// signature into the module that defines `Expression`.
#[enum_dispatch::enum_dispatch]
pub trait Evaluate {
    fn eval<R: crate::roll::Roller>(
        &self,
        ctx: &mut crate::roll::RollContext<'_, R>,
    ) -> Result<crate::common::Int, crate::roll::RollError>;
}

impl Evaluate for Literal {
    fn eval<R: Roller>(&self, ctx: &mut RollContext<'_, R>) -> RResult<Int> {
        ctx.trace.log(format!("Passing {}", self.value), Level::Eval);
        Ok(self.value)
    }
}

impl Evaluate for Binary {
    fn eval<R: Roller>(&self, ctx: &mut RollContext<'_, R>) -> RResult<Int> {
        let l = self.left.eval(ctx)?;
        let r = self.right.eval(ctx)?;
        let value = self.op.apply(l, r)?;
        ctx.trace
            .log(format!("{}{}{}={}", l, self.op, r, value), Level::Eval);
        Ok(value)
    }
}

impl BinaryOperator {
    /// Checked integer arithmetic; division truncates toward zero.
    pub fn apply(&self, l: Int, r: Int) -> RResult<Int> {
        use BinaryOperator::*;

        let value = match self {
            Add => l.checked_add(r),
            Sub => l.checked_sub(r),
            Mul => l.checked_mul(r),
            Div if r == 0 => return Err(RollError::ZeroDivision),
            Div => l.checked_div(r),
        };
        value.ok_or(RollError::Overflow)
    }
}

impl Evaluate for Roll {
    fn eval<R: Roller>(&self, ctx: &mut RollContext<'_, R>) -> RResult<Int> {
        // A die without faces is a flat bonus of `count`.
        if self.sides <= 0 {
            ctx.trace.log(
                format!("Rolling {}d{}: flat {}", self.count, self.sides, self.count),
                Level::Eval,
            );
            return Ok(self.count);
        }

        let num = usize::try_from(self.count).unwrap_or(0);
        if num == 1 {
            // A lone die is kept whatever the keep count.
            let value = ctx.roll_one(self.sides)?;
            self.trace_total(ctx, value);
            return Ok(value);
        }

        let mut rolls: Vec<Int> = ctx.roll(num, self.sides)?.collect();

        if self.keep_highest > 0 {
            let keep = usize::try_from(self.keep_highest).map_or(num, |k| k.min(num));
            let drop = num - keep;
            if drop > 0 {
                rolls.select_nth_unstable(drop - 1);
                rolls[..drop].fill(0);
            }
        }

        let sum = rolls
            .iter()
            .try_fold(0 as Int, |a, &b| a.checked_add(b))
            .ok_or(RollError::Overflow)?;

        self.trace_total(ctx, sum);
        Ok(sum)
    }
}

impl Roll {
    fn trace_total<R: Roller>(&self, ctx: &RollContext<'_, R>, total: Int) {
        ctx.trace.log(
            format!(
                "Rolling {}d{}h{}: {}",
                self.count, self.sides, self.keep_highest, total
            ),
            Level::Eval,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{ast::Expression, parse, tokenize};
    use crate::roll::roller::ScriptedRoller;
    use crate::trace::Trace;
    use rand::{rngs::StdRng, SeedableRng};

    fn roll(count: Int, sides: Int, keep_highest: Int) -> Roll {
        Roll {
            count,
            sides,
            keep_highest,
        }
    }

    fn eval_with<R: Roller>(s: &str, roller: R) -> RResult<Int> {
        let mut trace = Trace::new(Level::All);
        let tokens = tokenize(s, &mut trace).unwrap();
        let expr = parse(&tokens, &mut trace).unwrap();
        RollContext::new_bounded(1000, roller, &trace).eval(&expr)
    }

    fn check(s: &str, expected: Int) {
        assert_eq!(eval_with(s, ScriptedRoller::new(vec![1])), Ok(expected));
    }

    fn check_err(s: &str, expected: RollError) {
        assert_eq!(eval_with(s, ScriptedRoller::new(vec![1])), Err(expected));
    }

    fn eval_roll(r: Roll, script: Vec<Int>) -> RResult<Int> {
        let trace = Trace::new(Level::All);
        let mut ctx = RollContext::new_bounded(1000, ScriptedRoller::new(script), &trace);
        ctx.eval(&Expression::Roll(r))
    }

    #[test]
    fn test_eval_number() {
        check("3", 3);
        check("(0)", 0);
    }

    #[test]
    fn test_eval_binary() {
        check("2+3*4", 14);
        check("(2+3)*4", 20);
        check("10-3-2", 9);
        check("8/4/2", 4);
        check("7/2", 3);
        check("2-7/2", -1);
        check("1-10/3", -2);
    }

    #[test]
    fn test_eval_errors() {
        check_err("1/0", RollError::ZeroDivision);
        check_err("5/(3-3)", RollError::ZeroDivision);
        check_err("9223372036854775807+1", RollError::Overflow);
        check_err("3037000500*3037000500", RollError::Overflow);
    }

    #[test]
    fn test_keep_highest() {
        assert_eq!(eval_roll(roll(5, 20, 3), vec![10, 1, 15, 1, 7]), Ok(32));
        assert_eq!(eval_roll(roll(5, 20, 1), vec![10, 1, 15, 1, 7]), Ok(15));
        assert_eq!(eval_roll(roll(4, 6, 2), vec![6, 6, 6, 2]), Ok(12));
    }

    #[test]
    fn test_keep_all() {
        assert_eq!(eval_roll(roll(5, 20, 0), vec![10, 1, 15, 1, 7]), Ok(34));
        // Keeping at least as many dice as were rolled keeps every die.
        assert_eq!(eval_roll(roll(3, 20, 3), vec![4, 5, 6]), Ok(15));
        assert_eq!(eval_roll(roll(3, 20, 9), vec![4, 5, 6]), Ok(15));
    }

    #[test]
    fn test_degenerate_rolls() {
        assert_eq!(eval_roll(roll(4, 0, 0), vec![9]), Ok(4));
        assert_eq!(eval_roll(roll(7, -3, 2), vec![9]), Ok(7));
        assert_eq!(eval_roll(roll(0, 6, 0), vec![9]), Ok(0));
        assert_eq!(eval_roll(roll(-2, 6, 1), vec![9]), Ok(0));
    }

    #[test]
    fn test_single_die() {
        assert_eq!(eval_roll(roll(1, 20, 0), vec![17]), Ok(17));
        assert_eq!(eval_roll(roll(1, 20, 1), vec![4]), Ok(4));
        assert_eq!(eval_roll(roll(1, 20, 5), vec![9]), Ok(9));
    }

    #[test]
    fn test_too_many_rolls() {
        assert_eq!(
            eval_roll(roll(1001, 6, 0), vec![1]),
            Err(RollError::TooManyRolls)
        );
        check_err("600d6+600d6", RollError::TooManyRolls);
    }

    #[test]
    fn test_eval_parsed_rolls() {
        // `count d sides`, optionally followed by `h keep`
        assert_eq!(eval_with("3d6", ScriptedRoller::new(vec![5])), Ok(15));
        assert_eq!(
            eval_with("4d20h2", ScriptedRoller::new(vec![3, 18, 9, 12])),
            Ok(30)
        );
        assert_eq!(
            eval_with("2d2*10", ScriptedRoller::new(vec![1, 2])),
            Ok(30)
        );
        assert_eq!(
            eval_with("2d6h1+3*(4-1)", ScriptedRoller::new(vec![2, 5])),
            Ok(14)
        );
    }

    #[test]
    fn test_left_evaluated_first() {
        assert_eq!(
            eval_with("1d6-1d6", ScriptedRoller::new(vec![5, 2])),
            Ok(3)
        );
    }

    #[test]
    fn test_seeded_range() {
        let mut seen = std::collections::HashSet::new();
        for seed in 0..200 {
            let total = eval_with("1d6", StdRng::seed_from_u64(seed)).unwrap();
            assert!((1..=6).contains(&total));
            seen.insert(total);
            let total = eval_with("2d20", StdRng::seed_from_u64(seed)).unwrap();
            assert!((2..=40).contains(&total));
            let total = eval_with("3d6h1", StdRng::seed_from_u64(seed)).unwrap();
            assert!((1..=6).contains(&total));
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_seed_reproducible() {
        let a = eval_with("8d6h3+4d20", StdRng::seed_from_u64(42));
        let b = eval_with("8d6h3+4d20", StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
