//! CLI command implementations.

mod check;
mod eval;

pub use check::{CheckArgs, run_check};
pub use eval::{EvalArgs, run_eval};
