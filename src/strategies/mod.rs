//! Per-algorithm transition tables.
//!
//! Each logic type is a tiny machine: [`Strategy::step`] applies the effect of
//! one pseudocode line to the variable state, and [`Strategy::next_line`]
//! inspects the resulting state to pick the line that runs next. Branches and
//! loops are nothing more than `next_line` arms returning a different target;
//! calls and returns are signalled through [`Flow`] and carried out by the
//! session, which owns the call stack.

pub mod binary_search;
pub mod bubble_sort;
pub mod factorial;
pub mod fibonacci;
pub mod fizzbuzz;
pub mod gcd;
pub mod inorder;
pub mod linear_search;
pub mod linked_list;
pub mod priority_queue;
pub mod quicksort;
pub mod swap;

use crate::runtime::{
    error::TraceResult,
    frame::{Invocation, Line},
    state::VariableState,
    value::Value,
};

/// What a line asks the session to do after its effect has been applied.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    /// Ordinary line; the next line comes from [`Strategy::next_line`].
    Continue,
    /// Enter a simulated procedure.
    Call(Invocation),
    /// Leave the current procedure, optionally handing a value to the caller.
    Return(Option<Value>),
    /// Top-level `return`: the whole program stops here.
    Halt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextLine {
    Goto(Line),
    End,
    /// Fall back to the program's own next-line function, else `line + 1`.
    Defer,
}

pub trait Strategy: Sync {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow>;

    fn next_line(&self, _line: Line, _state: &VariableState) -> TraceResult<NextLine> {
        Ok(NextLine::Defer)
    }
}

/// Picks `then` when `condition` holds, `otherwise` when it does not.
pub(crate) fn branch(condition: bool, then: Line, otherwise: Line) -> NextLine {
    NextLine::Goto(if condition { then } else { otherwise })
}

/// Advances a `for` counter: `undefined` on loop entry becomes `start`,
/// anything else is incremented.
pub(crate) fn advance_counter(state: &mut VariableState, name: &str, start: i64) -> TraceResult<()> {
    let next = match state.counter(name)? {
        None => start,
        Some(current) => current + 1,
    };
    state.set(name, next);
    Ok(())
}
