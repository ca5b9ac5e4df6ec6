pub mod error;
pub mod frame;
pub mod preset;
pub mod registry;
pub mod session;
pub mod state;
pub mod value;

pub use error::{TraceError, TraceResult};
pub use frame::{CallFrame, CallStack, Invocation, Line};
pub use registry::LogicType;
pub use session::{StepEvent, TraceSession};
pub use state::VariableState;
pub use value::{NodeId, Value};
