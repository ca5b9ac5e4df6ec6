use super::{Flow, Strategy};
use crate::runtime::{error::TraceResult, frame::Line, state::VariableState};

/// Three-way rotation written without a temporary, so one value is lost:
///
/// ```text
/// 1 x ← y
/// 2 y ← z
/// 3 z ← x
/// ```
pub struct VariableSwap;

impl Strategy for VariableSwap {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            1 => assign(state, "x", "y")?,
            2 => assign(state, "y", "z")?,
            3 => assign(state, "z", "x")?,
            _ => {}
        }
        Ok(Flow::Continue)
    }
}

fn assign(state: &mut VariableState, target: &str, source: &str) -> TraceResult<()> {
    let value = state.get(source)?.clone();
    state.set(target, value);
    Ok(())
}
