use crate::catalog::ProgramDescriptor;
use crate::runtime::{error::TraceError, frame::Line};
use miette::{Diagnostic, Report, SourceSpan};
use thiserror::Error;

/// A step failure pointed at the pseudocode line that raised it.
#[derive(Debug, Error, Diagnostic, Clone)]
#[error("{message}")]
pub struct StepDiagnostic {
    #[source_code]
    src: String,
    #[label("{label}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    message: String,
    label: String,
}

impl StepDiagnostic {
    pub fn from_error(program: &ProgramDescriptor, line: Line, error: &TraceError) -> Self {
        Self {
            src: program.lines.join("\n"),
            span: line_span(program, line),
            help: error.help().map(|help| help.to_string()),
            message: format!("{}: {error}", program.id),
            label: format!("line {line}"),
        }
    }

    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

pub fn emit<E>(error: E)
where
    E: Diagnostic + Send + Sync + 'static,
{
    eprintln!("{:?}", Report::new(error));
}

pub fn emit_step_error(program: &ProgramDescriptor, line: Line, error: &TraceError) {
    emit(StepDiagnostic::from_error(program, line, error));
}

fn line_span(program: &ProgramDescriptor, line: Line) -> SourceSpan {
    let Some(index) = line.checked_sub(1).filter(|index| *index < program.lines.len()) else {
        return SourceSpan::from((0, 0));
    };
    let offset: usize = program.lines[..index].iter().map(|text| text.len() + 1).sum();
    SourceSpan::from((offset, program.lines[index].len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::state::VariableState;

    #[test]
    fn spans_cover_the_failing_line() {
        let program = ProgramDescriptor::new(
            "fact",
            "factorial",
            &["result ← factorial(n)", "print result"],
            VariableState::new(),
        );
        let error = TraceError::StackUnderflow { line: 2 };
        let diagnostic = StepDiagnostic::from_error(&program, 2, &error);
        let first_line_bytes = "result ← factorial(n)".len() + 1;
        assert_eq!(diagnostic.span().offset(), first_line_bytes);
        assert_eq!(diagnostic.span().len(), "print result".len());
        assert!(diagnostic.help.is_some());
        assert!(diagnostic.to_string().starts_with("fact: Return on line 2"));
    }

    #[test]
    fn lines_outside_the_program_get_an_empty_span() {
        let program = ProgramDescriptor::new("swap", "swap", &["x ← y"], VariableState::new());
        let error = TraceError::InvalidLine { line: 0, last: 1 };
        let diagnostic = StepDiagnostic::from_error(&program, 0, &error);
        assert_eq!(diagnostic.span().len(), 0);
    }
}
