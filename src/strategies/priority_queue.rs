//! Array-backed binary min-heap: insert `value`, then extract the minimum.
//!
//! ```text
//! 1  append value to pq
//! 2  i ← length(pq)
//! 3  while i > 1 and pq[i div 2] > pq[i] do
//! 4    swap pq[i div 2] and pq[i]
//! 5    i ← i div 2
//! 6  end while
//! 7  top ← pq[1]
//! 8  pq[1] ← pq[length(pq)]
//! 9  remove last element of pq
//! 10 i ← 1
//! 11 while 2 × i ≤ length(pq) do
//! 12   child ← 2 × i
//! 13   if child + 1 ≤ length(pq) and pq[child + 1] < pq[child] then
//! 14     child ← child + 1
//! 15   end if
//! 16   if pq[i] ≤ pq[child] then
//! 17     break
//! 18   end if
//! 19   swap pq[i] and pq[child]
//! 20   i ← child
//! 21 end while
//! 22 print top
//! ```

use super::{branch, Flow, NextLine, Strategy};
use crate::runtime::{error::TraceResult, frame::Line, state::VariableState};

pub struct PriorityQueue;

const PRINT_TOP: Line = 22;

impl Strategy for PriorityQueue {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            1 => {
                let value = state.get("value")?.clone();
                state.push_element("pq", value)?;
            }
            2 => {
                let len = state.len("pq")?;
                state.set("i", len);
            }
            4 => {
                let i = state.int("i")?;
                state.swap_elements("pq", i / 2, i)?;
            }
            5 => {
                let i = state.int("i")?;
                state.set("i", i / 2);
            }
            7 => {
                let top = state.element("pq", 1)?.clone();
                state.set("top", top);
            }
            8 => {
                let last = state.element("pq", state.len("pq")?)?.clone();
                state.set_element("pq", 1, last)?;
            }
            9 => {
                state.pop_element("pq")?;
            }
            10 => state.set("i", 1),
            12 => {
                let i = state.int("i")?;
                state.set("child", 2 * i);
            }
            14 => {
                let child = state.int("child")?;
                state.set("child", child + 1);
            }
            19 => {
                let (i, child) = (state.int("i")?, state.int("child")?);
                state.swap_elements("pq", i, child)?;
            }
            20 => {
                let child = state.int("child")?;
                state.set("i", child);
            }
            22 => {
                let top = state.get("top")?.printed();
                state.print(top);
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        Ok(match line {
            3 => {
                let i = state.int("i")?;
                let climbs = i > 1 && state.int_at("pq", i / 2)? > state.int_at("pq", i)?;
                branch(climbs, 4, 7)
            }
            5 => NextLine::Goto(3),
            11 => branch(2 * state.int("i")? <= state.len("pq")?, 12, PRINT_TOP),
            13 => {
                let child = state.int("child")?;
                let right_smaller = child + 1 <= state.len("pq")?
                    && state.int_at("pq", child + 1)? < state.int_at("pq", child)?;
                branch(right_smaller, 14, 16)
            }
            14 => NextLine::Goto(16),
            16 => {
                let (i, child) = (state.int("i")?, state.int("child")?);
                branch(state.int_at("pq", i)? <= state.int_at("pq", child)?, 17, 19)
            }
            17 => NextLine::Goto(PRINT_TOP),
            20 => NextLine::Goto(11),
            _ => NextLine::Defer,
        })
    }
}
