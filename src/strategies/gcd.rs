use super::{branch, Flow, NextLine, Strategy};
use crate::runtime::{
    error::{TraceError, TraceResult},
    frame::Line,
    state::VariableState,
};

/// Euclid's algorithm.
///
/// ```text
/// 1 while b ≠ 0 do
/// 2   t ← b
/// 3   b ← a mod b
/// 4   a ← t
/// 5 end while
/// 6 return a
/// ```
pub struct Gcd;

impl Strategy for Gcd {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            2 => {
                let b = state.int("b")?;
                state.set("t", b);
            }
            3 => {
                let remainder = state
                    .int("a")?
                    .checked_rem_euclid(state.int("b")?)
                    .ok_or_else(|| TraceError::Arithmetic {
                        message: "modulo by zero".into(),
                    })?;
                state.set("b", remainder);
            }
            4 => {
                let t = state.int("t")?;
                state.set("a", t);
            }
            6 => {
                let a = state.int("a")?;
                state.set("result", a);
                return Ok(Flow::Halt);
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        Ok(match line {
            1 => branch(state.int("b")? != 0, 2, 6),
            4 => NextLine::Goto(1),
            _ => NextLine::Defer,
        })
    }
}
