use crate::runtime::{state::VariableState, value::Value};

/// 1-based pseudocode line number, as displayed to the learner.
pub type Line = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct CallFrame {
    pub call_line: Line,
    pub return_line: Line,
    pub saved_state: VariableState,
    pub result_slot: Option<String>,
}

/// Active simulated procedure calls, innermost last.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn top(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    pub(crate) fn push(&mut self, frame: CallFrame) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) -> Option<CallFrame> {
        self.frames.pop()
    }
}

/// A simulated procedure call requested by a step function.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub entry: Line,
    pub args: Vec<(String, Value)>,
    pub result_slot: Option<String>,
    pub resume_at: Option<Line>,
}

impl Invocation {
    pub fn new(entry: Line) -> Self {
        Self {
            entry,
            args: Vec::new(),
            result_slot: None,
            resume_at: None,
        }
    }

    pub fn arg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.args.push((name.to_string(), value.into()));
        self
    }

    /// Caller variable that receives the callee's return value.
    pub fn returning_into(mut self, slot: &str) -> Self {
        self.result_slot = Some(slot.to_string());
        self
    }

    pub fn resume_at(mut self, line: Line) -> Self {
        self.resume_at = Some(line);
        self
    }
}
