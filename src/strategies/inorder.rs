use super::{branch, Flow, NextLine, Strategy};
use crate::runtime::{
    error::{TraceError, TraceResult},
    frame::{Invocation, Line},
    state::VariableState,
    value::{NodeId, Value},
};

/// Recursive in-order traversal of a binary tree kept in the node heap.
///
/// ```text
/// 1 procedure inorder(node)
/// 2   if node = null then
/// 3     return
/// 4   end if
/// 5   inorder(node.left)
/// 6   print node.value
/// 7   inorder(node.right)
/// 8 end procedure
/// 9 inorder(root)
/// ```
///
/// Execution starts on line 9, after the procedure body.
pub struct InorderTraversal;

const ENTRY: Line = 1;

impl Strategy for InorderTraversal {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            3 | 8 => return Ok(Flow::Return(None)),
            5 => return Ok(Flow::Call(visit(child(state, "left")?))),
            6 => {
                let value = state.field(current(state)?, "value")?.printed();
                state.print(value);
            }
            7 => return Ok(Flow::Call(visit(child(state, "right")?))),
            9 => return Ok(Flow::Call(visit(state.reference("root")?))),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        Ok(match line {
            2 => branch(state.reference("node")?.is_none(), 3, 5),
            _ => NextLine::Defer,
        })
    }
}

fn visit(node: Option<NodeId>) -> Invocation {
    Invocation::new(ENTRY).arg("node", Value::reference(node))
}

fn current(state: &VariableState) -> TraceResult<NodeId> {
    state
        .reference("node")?
        .ok_or_else(|| TraceError::type_mismatch("node", "node", "undefined"))
}

fn child(state: &VariableState, side: &str) -> TraceResult<Option<NodeId>> {
    state.field_ref(current(state)?, side)
}
