use crate::runtime::{frame::Line, value::NodeId};
use miette::Diagnostic;
use thiserror::Error;

pub type TraceResult<T> = Result<T, TraceError>;

#[derive(Debug, Error, Diagnostic, Clone, PartialEq)]
pub enum TraceError {
    #[error("No trace strategy is registered for logic type `{logic_type}`")]
    #[diagnostic(
        code(trace::unknown_logic_type),
        help("add the logic type to the registry table and give it a strategy")
    )]
    UnknownLogicType { logic_type: String },

    #[error("Preset `{label}` is not defined for `{problem}` (available: {})", .available.join(", "))]
    #[diagnostic(code(trace::preset_not_found), help("pick one of the listed presets"))]
    PresetNotFound {
        problem: String,
        label: String,
        available: Vec<String>,
    },

    #[error("Preset `{label}` sets `{variable}`, which `{problem}` does not declare")]
    #[diagnostic(code(trace::invalid_preset))]
    InvalidPreset {
        problem: String,
        label: String,
        variable: String,
    },

    #[error("Return on line {line} with an empty call stack")]
    #[diagnostic(
        code(trace::stack_underflow),
        help("the strategy returns without a matching call; fix its step table")
    )]
    StackUnderflow { line: Line },

    #[error("Program ended on line {line} with {depth} call frame(s) still active")]
    #[diagnostic(code(trace::unbalanced_halt))]
    UnbalancedHalt { line: Line, depth: usize },

    #[error("Line {line} is outside the program (1..={last})")]
    #[diagnostic(code(trace::invalid_line))]
    InvalidLine { line: Line, last: Line },

    #[error("Unknown variable `{name}`")]
    #[diagnostic(
        code(trace::unknown_variable),
        help("declare the variable in the initial state, possibly as `undefined`")
    )]
    UnknownVariable { name: String },

    #[error("Type mismatch for `{name}`: expected {expected}, found {found}")]
    #[diagnostic(code(trace::type_mismatch))]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Index {index} is out of range for `{name}` (length {len})")]
    #[diagnostic(code(trace::index_out_of_range), help("arrays are indexed from 1"))]
    IndexOutOfRange { name: String, index: i64, len: usize },

    #[error("Reference @{id} does not point at a heap node")]
    #[diagnostic(code(trace::dangling_reference))]
    DanglingReference { id: NodeId },

    #[error("Arithmetic error: {message}")]
    #[diagnostic(code(trace::arithmetic))]
    Arithmetic { message: String },
}

impl TraceError {
    pub fn type_mismatch(name: &str, expected: &'static str, found: &'static str) -> Self {
        TraceError::TypeMismatch {
            name: name.to_string(),
            expected,
            found,
        }
    }

    pub fn overflow(operation: &str) -> Self {
        TraceError::Arithmetic {
            message: format!("integer overflow in {operation}"),
        }
    }

    /// Authoring defects that should fail loudly during integration.
    pub fn is_authoring_defect(&self) -> bool {
        !matches!(
            self,
            TraceError::PresetNotFound { .. } | TraceError::InvalidPreset { .. }
        )
    }
}
