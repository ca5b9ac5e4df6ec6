use super::{advance_counter, branch, Flow, NextLine, Strategy};
use crate::runtime::{
    error::{TraceError, TraceResult},
    frame::Line,
    state::VariableState,
};

/// Iterative Fibonacci; `result` holds F(n) with F(0) = 0.
pub struct Fibonacci;

impl Strategy for Fibonacci {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            1 => state.set("a", 0),
            2 => state.set("b", 1),
            3 => advance_counter(state, "i", 1)?,
            4 => {
                let sum = state
                    .int("a")?
                    .checked_add(state.int("b")?)
                    .ok_or_else(|| TraceError::overflow("a + b"))?;
                state.set("t", sum);
            }
            5 => {
                let b = state.int("b")?;
                state.set("a", b);
            }
            6 => {
                let t = state.int("t")?;
                state.set("b", t);
            }
            8 => {
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
            3 => branch(state.int("i")? <= state.int("n")?, 4, 8),
            6 => NextLine::Goto(3),
            _ => NextLine::Defer,
        })
    }
}
