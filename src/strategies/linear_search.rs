use super::{branch, Flow, NextLine, Strategy};
use crate::runtime::{error::TraceResult, frame::Line, state::VariableState};

pub struct LinearSearch;

impl Strategy for LinearSearch {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            1 => state.set("found", false),
            2 => state.set("i", 1),
            5 => state.set("found", true),
            6 => {
                let i = state.int("i")?;
                state.set("result", i);
                return Ok(Flow::Halt);
            }
            8 => {
                let i = state.int("i")?;
                state.set("i", i + 1);
            }
            10 => {
                state.set("result", -1);
                return Ok(Flow::Halt);
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        Ok(match line {
            3 => branch(state.int("i")? <= state.len("data")?, 4, 10),
            4 => {
                let i = state.int("i")?;
                branch(state.element("data", i)? == state.get("target")?, 5, 8)
            }
            8 => NextLine::Goto(3),
            _ => NextLine::Defer,
        })
    }
}
