use super::{advance_counter, branch, Flow, NextLine, Strategy};
use crate::runtime::{error::TraceResult, frame::Line, state::VariableState, value::Value};

/// Bubble sort with an early-exit `swapped` flag.
///
/// ```text
/// 1  n ← length(arr)
/// 2  repeat
/// 3    swapped ← false
/// 4    for j ← 1 to n - 1 do
/// 5      if arr[j] > arr[j + 1] then
/// 6        swap arr[j] and arr[j + 1]
/// 7        swapped ← true
/// 8      end if
/// 9    end for
/// 10   n ← n - 1
/// 11 until not swapped
/// ```
pub struct BubbleSort;

impl Strategy for BubbleSort {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            1 => {
                let len = state.len("arr")?;
                state.set("n", len);
            }
            3 => {
                state.set("swapped", false);
                state.set("j", Value::Undefined);
            }
            4 => advance_counter(state, "j", 1)?,
            6 => {
                let j = state.int("j")?;
                state.swap_elements("arr", j, j + 1)?;
            }
            7 => state.set("swapped", true),
            10 => {
                let n = state.int("n")?;
                state.set("n", n - 1);
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        Ok(match line {
            4 => branch(state.int("j")? <= state.int("n")? - 1, 5, 10),
            5 => {
                let j = state.int("j")?;
                branch(state.int_at("arr", j)? > state.int_at("arr", j + 1)?, 6, 4)
            }
            7 => NextLine::Goto(4),
            11 => {
                if state.boolean("swapped")? {
                    NextLine::Goto(2)
                } else {
                    NextLine::End
                }
            }
            _ => NextLine::Defer,
        })
    }
}
