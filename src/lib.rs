//! Dice-notation arithmetic: `tokenize`, `parse`, then evaluate against a [`Roller`].
//!
//! ```
//! use autoroll::{Level, Trace};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut trace = Trace::new(Level::Error);
//! let total = autoroll::roll("2+3*4", StdRng::seed_from_u64(1), None, &mut trace);
//! assert_eq!(total, Ok(14));
//! ```

pub mod common;
pub mod trace;
pub mod roll;
pub mod parse;
pub mod config;
mod error;

pub use self::config::Config;
pub use common::Int;
pub use error::Error;
pub use roll::{RollContext, RollError, Roller};
pub use trace::{Level, Trace};

/// Tokenizes, parses and evaluates `input` in one go.
pub fn roll<R: Roller>(
    input: &str,
    roller: R,
    max_rolls: Option<usize>,
    trace: &mut Trace,
) -> Result<Int, Error> {
    let tokens = parse::tokenize(input, trace)?;
    let expr = parse::parse(&tokens, trace)?;
    Ok(roll::eval(&expr, roller, max_rolls, trace)?)
}
