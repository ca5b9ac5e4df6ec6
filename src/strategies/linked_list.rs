//! Singly linked lists stored in the state's node heap. `undefined` plays
//! the role of `null`; nodes are records with `value` and `next` fields.

use super::{branch, Flow, NextLine, Strategy};
use crate::runtime::{
    error::{TraceError, TraceResult},
    frame::Line,
    state::VariableState,
    value::{NodeId, Value},
};

/// ```text
/// 1  node ← new Node(value)
/// 2  if head = null then
/// 3    head ← node
/// 4  else
/// 5    current ← head
/// 6    while current.next ≠ null do
/// 7      current ← current.next
/// 8    end while
/// 9    current.next ← node
/// 10 end if
/// ```
pub struct LinkedListAppend;

impl Strategy for LinkedListAppend {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            1 => {
                let value = state.get("value")?.clone();
                let id = state.alloc(Value::record([("value", value), ("next", Value::Undefined)]));
                state.set("node", Value::Reference(id));
            }
            3 => {
                let node = state.get("node")?.clone();
                state.set("head", node);
            }
            5 => {
                let head = state.get("head")?.clone();
                state.set("current", head);
            }
            7 => {
                let next = state.field_ref(deref(state, "current")?, "next")?;
                state.set("current", Value::reference(next));
            }
            9 => {
                let current = deref(state, "current")?;
                let node = state.get("node")?.clone();
                state.set_field(current, "next", node)?;
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        Ok(match line {
            2 => branch(state.reference("head")?.is_none(), 3, 5),
            3 => NextLine::Goto(10),
            6 => {
                let next = state.field_ref(deref(state, "current")?, "next")?;
                branch(next.is_some(), 7, 9)
            }
            7 => NextLine::Goto(6),
            _ => NextLine::Defer,
        })
    }
}

/// ```text
/// 1  if head = null then
/// 2    return
/// 3  end if
/// 4  if head.value = target then
/// 5    head ← head.next
/// 6    return
/// 7  end if
/// 8  current ← head
/// 9  while current.next ≠ null do
/// 10   if current.next.value = target then
/// 11     current.next ← current.next.next
/// 12     return
/// 13   end if
/// 14   current ← current.next
/// 15 end while
/// ```
///
/// Unlinked nodes stay in the heap, unreachable from `head`.
pub struct LinkedListDelete;

impl Strategy for LinkedListDelete {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            2 | 6 | 12 => return Ok(Flow::Halt),
            5 => {
                let next = state.field_ref(deref(state, "head")?, "next")?;
                state.set("head", Value::reference(next));
            }
            8 => {
                let head = state.get("head")?.clone();
                state.set("current", head);
            }
            11 => {
                let current = deref(state, "current")?;
                let doomed = successor(state, current)?;
                let after = state.field_ref(doomed, "next")?;
                state.set_field(current, "next", Value::reference(after))?;
            }
            14 => {
                let current = deref(state, "current")?;
                let next = successor(state, current)?;
                state.set("current", Value::Reference(next));
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        Ok(match line {
            1 => branch(state.reference("head")?.is_none(), 2, 4),
            4 => {
                let head = deref(state, "head")?;
                branch(state.field(head, "value")? == state.get("target")?, 5, 8)
            }
            9 => {
                let current = deref(state, "current")?;
                if state.field_ref(current, "next")?.is_some() {
                    NextLine::Goto(10)
                } else {
                    NextLine::End
                }
            }
            10 => {
                let next = successor(state, deref(state, "current")?)?;
                branch(state.field(next, "value")? == state.get("target")?, 11, 14)
            }
            14 => NextLine::Goto(9),
            _ => NextLine::Defer,
        })
    }
}

/// Reads a pointer variable that must not be null at this line.
fn deref(state: &VariableState, name: &str) -> TraceResult<NodeId> {
    state
        .reference(name)?
        .ok_or_else(|| TraceError::type_mismatch(name, "node", "undefined"))
}

fn successor(state: &VariableState, id: NodeId) -> TraceResult<NodeId> {
    state
        .field_ref(id, "next")?
        .ok_or_else(|| TraceError::type_mismatch(&format!("@{id}.next"), "node", "undefined"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> VariableState {
        VariableState::new()
            .with("head", Value::Reference(1))
            .with("current", Value::Reference(1))
            .with("target", 7)
            .with_node(
                1,
                Value::record([("value", Value::Integer(3)), ("next", Value::Reference(2))]),
            )
            .with_node(
                2,
                Value::record([("value", Value::Integer(7)), ("next", Value::Undefined)]),
            )
    }

    #[test]
    fn delete_rewires_around_the_matching_node() {
        let mut state = list();
        assert_eq!(LinkedListDelete.next_line(10, &state), Ok(NextLine::Goto(11)));
        LinkedListDelete.step(11, &mut state).unwrap();
        assert_eq!(state.walk_list(Some(1)), Ok(vec![Value::Integer(3)]));
    }

    #[test]
    fn dereferencing_null_is_reported() {
        let state = VariableState::new().with("current", Value::Undefined);
        assert_eq!(
            LinkedListAppend.next_line(6, &state),
            Err(TraceError::type_mismatch("current", "node", "undefined"))
        );
    }
}
