mod ctx;
mod error;
mod eval;
mod roller;

use crate::common::Int;
use crate::parse::ast;
use crate::trace::Trace;

type RResult<T> = Result<T, RollError>;

pub use ctx::{RollContext, DEFAULT_MAX_ROLLS};
pub use error::RollError;
pub use eval::Evaluate;
pub use roller::Roller;

pub fn eval<R: Roller>(
    expr: &ast::Expression,
    roller: R,
    max_rolls: Option<usize>,
    trace: &Trace,
) -> RResult<Int> {
    RollContext::new(max_rolls, roller, trace).eval(expr)
}
