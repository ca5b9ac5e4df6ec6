use crate::catalog::ProgramDescriptor;
use crate::runtime::{
    error::{TraceError, TraceResult},
    frame::{CallFrame, CallStack, Line},
    preset::load_preset,
    registry::{resolve, LogicType},
    state::VariableState,
};
use crate::strategies::{Flow, NextLine, Strategy};
use tracing::{debug, trace};

/// What a single [`TraceSession::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// Moved to another line in the same frame.
    Advanced,
    /// Entered a simulated procedure.
    Called,
    /// Returned to the caller's frame.
    Returned,
    /// This step ended the program.
    Finished,
    /// The session had already finished; nothing changed.
    Idle,
}

#[derive(Clone, Debug)]
struct Snapshot {
    current_line: Line,
    state: VariableState,
    call_stack: CallStack,
    finished: bool,
    peak_depth: usize,
}

/// Where control goes once a line's effect has been applied.
enum Target {
    Line(Line),
    End,
}

/// One learner's walk through a program, one line at a time.
///
/// The session owns its state and call stack; the descriptor is only
/// borrowed, so any number of sessions can share a catalog.
#[derive(Debug)]
pub struct TraceSession<'p> {
    program: &'p ProgramDescriptor,
    logic: LogicType,
    current_line: Line,
    state: VariableState,
    call_stack: CallStack,
    finished: bool,
    active_preset: Option<String>,
    history: Vec<Snapshot>,
    peak_depth: usize,
}

impl<'p> TraceSession<'p> {
    pub fn bind(program: &'p ProgramDescriptor) -> TraceResult<Self> {
        let logic = resolve(&program.logic_type)?;
        let last = program.last_line();
        if last > 0 && !(1..=last).contains(&program.entry_line) {
            return Err(TraceError::InvalidLine {
                line: program.entry_line,
                last,
            });
        }
        debug!(problem = %program.id, logic = %logic, "bound trace session");
        Ok(Self {
            program,
            logic,
            current_line: program.entry_line,
            state: program.initial_state.clone(),
            call_stack: CallStack::new(),
            finished: last == 0,
            active_preset: None,
            history: Vec::new(),
            peak_depth: 0,
        })
    }

    /// Executes the current line. A step that fails leaves the session
    /// exactly as it was.
    pub fn step(&mut self) -> TraceResult<StepEvent> {
        if self.finished {
            return Ok(StepEvent::Idle);
        }
        let before = self.snapshot();
        match self.advance() {
            Ok(event) => {
                self.history.push(before);
                Ok(event)
            }
            Err(error) => {
                self.restore(before);
                Err(error)
            }
        }
    }

    /// Undoes the most recent step. Returns `false` when there is nothing to undo.
    pub fn step_back(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Back to the program's own initial state, dropping any preset.
    pub fn reset(&mut self) {
        self.active_preset = None;
        self.start(self.program.initial_state.clone());
        debug!(problem = %self.program.id, "reset session");
    }

    /// Back to the start, keeping the active preset.
    pub fn restart(&mut self) -> TraceResult<()> {
        match self.active_preset.clone() {
            Some(label) => self.set_preset(&label),
            None => {
                self.reset();
                Ok(())
            }
        }
    }

    pub fn set_preset(&mut self, label: &str) -> TraceResult<()> {
        let state = load_preset(self.program, label)?;
        self.active_preset = Some(label.to_string());
        self.start(state);
        debug!(problem = %self.program.id, preset = label, "applied preset");
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_line(&self) -> Line {
        self.current_line
    }

    pub fn current_variables(&self) -> &VariableState {
        &self.state
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    pub fn depth(&self) -> usize {
        self.call_stack.depth()
    }

    pub fn peak_depth(&self) -> usize {
        self.peak_depth
    }

    pub fn steps_taken(&self) -> usize {
        self.history.len()
    }

    pub fn program(&self) -> &'p ProgramDescriptor {
        self.program
    }

    pub fn logic_type(&self) -> LogicType {
        self.logic
    }

    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    pub fn line_text(&self) -> Option<&'p str> {
        self.program.line_text(self.current_line)
    }

    fn start(&mut self, state: VariableState) {
        self.current_line = self.program.entry_line;
        self.state = state;
        self.call_stack = CallStack::new();
        self.finished = self.program.lines.is_empty();
        self.history.clear();
        self.peak_depth = 0;
    }

    fn advance(&mut self) -> TraceResult<StepEvent> {
        let line = self.current_line;
        let strategy = self.logic.strategy();
        trace!(line, text = self.program.line_text(line).unwrap_or(""), "executing line");

        let (target, event) = match strategy.step(line, &mut self.state)? {
            Flow::Continue => (self.follow(strategy, line)?, StepEvent::Advanced),
            Flow::Call(invocation) => {
                let callee = self.state.narrowed(invocation.args);
                let caller = std::mem::replace(&mut self.state, callee);
                self.call_stack.push(CallFrame {
                    call_line: line,
                    return_line: invocation.resume_at.unwrap_or(line + 1),
                    saved_state: caller,
                    result_slot: invocation.result_slot,
                });
                self.peak_depth = self.peak_depth.max(self.call_stack.depth());
                debug!(line, entry = invocation.entry, depth = self.call_stack.depth(), "call");
                (Target::Line(invocation.entry), StepEvent::Called)
            }
            Flow::Return(value) => {
                let frame = self
                    .call_stack
                    .pop()
                    .ok_or(TraceError::StackUnderflow { line })?;
                let callee = std::mem::replace(&mut self.state, frame.saved_state);
                self.state.adopt_shared(callee);
                if let (Some(slot), Some(value)) = (frame.result_slot, value) {
                    self.state.set(&slot, value);
                }
                debug!(line, resume = frame.return_line, depth = self.call_stack.depth(), "return");
                (Target::Line(frame.return_line), StepEvent::Returned)
            }
            Flow::Halt => (Target::End, StepEvent::Finished),
        };

        match target {
            Target::Line(0) => Err(TraceError::InvalidLine {
                line: 0,
                last: self.program.last_line(),
            }),
            Target::Line(next) if next <= self.program.last_line() => {
                self.current_line = next;
                Ok(event)
            }
            _ => self.finish(line),
        }
    }

    fn follow(&self, strategy: &dyn Strategy, line: Line) -> TraceResult<Target> {
        let next = match strategy.next_line(line, &self.state)? {
            NextLine::Defer => match self.program.custom_next_line {
                Some(custom) => custom(line, &self.state)?,
                None => NextLine::Defer,
            },
            decided => decided,
        };
        Ok(match next {
            NextLine::Goto(target) => Target::Line(target),
            NextLine::End => Target::End,
            NextLine::Defer => Target::Line(line + 1),
        })
    }

    fn finish(&mut self, line: Line) -> TraceResult<StepEvent> {
        if !self.call_stack.is_empty() {
            return Err(TraceError::UnbalancedHalt {
                line,
                depth: self.call_stack.depth(),
            });
        }
        self.finished = true;
        debug!(problem = %self.program.id, line, "program finished");
        Ok(StepEvent::Finished)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_line: self.current_line,
            state: self.state.clone(),
            call_stack: self.call_stack.clone(),
            finished: self.finished,
            peak_depth: self.peak_depth,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.current_line = snapshot.current_line;
        self.state = snapshot.state;
        self.call_stack = snapshot.call_stack;
        self.finished = snapshot.finished;
        self.peak_depth = snapshot.peak_depth;
    }
}
