//! Recursive quicksort with a Lomuto partition.
//!
//! ```text
//! 1  arr ← quicksort(arr, 1, length(arr))
//! 2  print arr
//! 3  procedure quicksort(arr, low, high)
//! 4    if low < high then
//! 5      pivot ← arr[high]
//! 6      i ← low - 1
//! 7      for j ← low to high - 1 do
//! 8        if arr[j] ≤ pivot then
//! 9          i ← i + 1
//! 10         swap arr[i] and arr[j]
//! 11       end if
//! 12     end for
//! 13     swap arr[i + 1] and arr[high]
//! 14     p ← i + 1
//! 15     arr ← quicksort(arr, low, p - 1)
//! 16     arr ← quicksort(arr, p + 1, high)
//! 17   end if
//! 18   return arr
//! 19 end procedure
//! ```
//!
//! Frames hold values, not aliases, so the array travels into each call as an
//! argument and comes back as the return value.

use super::{advance_counter, branch, Flow, NextLine, Strategy};
use crate::runtime::{
    error::TraceResult,
    frame::{Invocation, Line},
    state::VariableState,
    value::Value,
};

pub struct QuickSort;

const ENTRY: Line = 3;

impl Strategy for QuickSort {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            1 => {
                let high = state.len("arr")?;
                return Ok(Flow::Call(invoke(state, 1, high)?));
            }
            2 => {
                let arr = state.get("arr")?.printed();
                state.print(arr);
            }
            5 => {
                let pivot = state.element("arr", state.int("high")?)?.clone();
                state.set("pivot", pivot);
            }
            6 => {
                let low = state.int("low")?;
                state.set("i", low - 1);
            }
            7 => {
                let low = state.int("low")?;
                advance_counter(state, "j", low)?;
            }
            9 => {
                let i = state.int("i")?;
                state.set("i", i + 1);
            }
            10 => {
                let (i, j) = (state.int("i")?, state.int("j")?);
                state.swap_elements("arr", i, j)?;
            }
            13 => {
                let (i, high) = (state.int("i")?, state.int("high")?);
                state.swap_elements("arr", i + 1, high)?;
            }
            14 => {
                let i = state.int("i")?;
                state.set("p", i + 1);
            }
            15 => {
                let (low, p) = (state.int("low")?, state.int("p")?);
                return Ok(Flow::Call(invoke(state, low, p - 1)?));
            }
            16 => {
                let (p, high) = (state.int("p")?, state.int("high")?);
                return Ok(Flow::Call(invoke(state, p + 1, high)?));
            }
            18 => return Ok(Flow::Return(Some(state.get("arr")?.clone()))),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        Ok(match line {
            2 => NextLine::End,
            4 => branch(state.int("low")? < state.int("high")?, 5, 18),
            7 => branch(state.int("j")? <= state.int("high")? - 1, 8, 13),
            8 => {
                let j = state.int("j")?;
                branch(state.int_at("arr", j)? <= state.int("pivot")?, 9, 7)
            }
            10 => NextLine::Goto(7),
            _ => NextLine::Defer,
        })
    }
}

fn invoke(state: &VariableState, low: i64, high: i64) -> TraceResult<Invocation> {
    let arr = state.get("arr")?.clone();
    Ok(Invocation::new(ENTRY)
        .arg("arr", arr)
        .arg("low", low)
        .arg("high", high)
        .arg("pivot", Value::Undefined)
        .arg("i", Value::Undefined)
        .arg("j", Value::Undefined)
        .arg("p", Value::Undefined)
        .returning_into("arr"))
}
