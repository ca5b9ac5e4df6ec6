//! Recursive factorial.
//!
//! ```text
//! 1 result ← factorial(n)
//! 2 print result
//! 3 function factorial(n)
//! 4   if n ≤ 1 then
//! 5     return 1
//! 6   end if
//! 7   sub ← factorial(n - 1)
//! 8   return n × sub
//! 9 end function
//! ```
//!
//! Every activation sees only its own `n` and `sub`; the value returned by a
//! call lands in the caller's `sub` (or `result` for the outermost call).

use super::{branch, Flow, NextLine, Strategy};
use crate::runtime::{
    error::{TraceError, TraceResult},
    frame::{Invocation, Line},
    state::VariableState,
    value::Value,
};

pub struct Factorial;

const ENTRY: Line = 3;

impl Strategy for Factorial {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            1 => {
                let n = state.int("n")?;
                return Ok(Flow::Call(invoke(n).returning_into("result")));
            }
            2 => {
                let result = state.get("result")?.printed();
                state.print(result);
            }
            5 => return Ok(Flow::Return(Some(Value::Integer(1)))),
            7 => {
                let n = state.int("n")?;
                return Ok(Flow::Call(invoke(n - 1).returning_into("sub")));
            }
            8 => {
                let product = state
                    .int("n")?
                    .checked_mul(state.int("sub")?)
                    .ok_or_else(|| TraceError::overflow("n × sub"))?;
                return Ok(Flow::Return(Some(Value::Integer(product))));
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        Ok(match line {
            2 => NextLine::End,
            4 => branch(state.int("n")? <= 1, 5, 7),
            _ => NextLine::Defer,
        })
    }
}

fn invoke(n: i64) -> Invocation {
    Invocation::new(ENTRY)
        .arg("n", n)
        .arg("sub", Value::Undefined)
}
