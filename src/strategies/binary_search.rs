//! Binary search over a sorted, 1-indexed `data` array.
//!
//! ```text
//! 1  low ← 1
//! 2  high ← length(data)
//! 3  while low ≤ high do
//! 4    mid ← (low + high) div 2
//! 5    if data[mid] = target then
//! 6      return mid
//! 7    else if data[mid] < target then
//! 8      low ← mid + 1
//! 9    else
//! 10     high ← mid - 1
//! 11   end if
//! 12 end while
//! 13 return -1
//! ```
//!
//! [`BuggyBinarySearch`] replaces line 8 with `low ← mid`. Whenever the
//! target sits to the right of `mid` while `low + 1 = high`, `mid` never
//! moves again and the loop spins forever. The exercise asks learners to find
//! that cycle, so the engine must reproduce it faithfully.

use super::{branch, Flow, NextLine, Strategy};
use crate::runtime::{error::TraceResult, frame::Line, state::VariableState};

pub struct BinarySearch;

pub struct BuggyBinarySearch;

impl Strategy for BinarySearch {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        search_step(line, state, 1)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        search_next(line, state)
    }
}

impl Strategy for BuggyBinarySearch {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        search_step(line, state, 0)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        search_next(line, state)
    }
}

fn search_step(line: Line, state: &mut VariableState, low_offset: i64) -> TraceResult<Flow> {
    match line {
        1 => state.set("low", 1),
        2 => {
            let len = state.len("data")?;
            state.set("high", len);
        }
        4 => {
            let mid = (state.int("low")? + state.int("high")?).div_euclid(2);
            state.set("mid", mid);
        }
        6 => {
            let mid = state.int("mid")?;
            state.set("result", mid);
            return Ok(Flow::Halt);
        }
        8 => {
            let mid = state.int("mid")?;
            state.set("low", mid + low_offset);
        }
        10 => {
            let mid = state.int("mid")?;
            state.set("high", mid - 1);
        }
        13 => {
            state.set("result", -1);
            return Ok(Flow::Halt);
        }
        _ => {}
    }
    Ok(Flow::Continue)
}

fn search_next(line: Line, state: &VariableState) -> TraceResult<NextLine> {
    Ok(match line {
        3 => branch(state.int("low")? <= state.int("high")?, 4, 13),
        5 => {
            let probe = state.int_at("data", state.int("mid")?)?;
            branch(probe == state.int("target")?, 6, 7)
        }
        7 => {
            let probe = state.int_at("data", state.int("mid")?)?;
            branch(probe < state.int("target")?, 8, 10)
        }
        8 | 10 => NextLine::Goto(3),
        _ => NextLine::Defer,
    })
}
