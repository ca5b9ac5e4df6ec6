use crate::catalog::{Catalog, ProgramDescriptor};
use crate::runtime::{
    error::{TraceError, TraceResult},
    frame::Line,
    session::TraceSession,
    state::VariableState,
};
use std::fmt;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Finished { steps: usize },
    BudgetExhausted { budget: usize },
}

/// One point of a recorded trajectory: where the session stood and what it held.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceStep {
    pub line: Line,
    pub depth: usize,
    pub state: VariableState,
}

/// Steps until the session finishes or `budget` steps have run.
pub fn run_to_completion(session: &mut TraceSession<'_>, budget: usize) -> TraceResult<RunOutcome> {
    let mut steps = 0;
    while !session.is_finished() {
        if steps == budget {
            warn!(
                problem = %session.program().id,
                preset = session.active_preset().unwrap_or("initial"),
                budget,
                "step budget exhausted"
            );
            return Ok(RunOutcome::BudgetExhausted { budget });
        }
        session.step()?;
        steps += 1;
    }
    Ok(RunOutcome::Finished { steps })
}

/// Like [`run_to_completion`], but keeps every intermediate snapshot,
/// starting with the state before the first step.
pub fn record(session: &mut TraceSession<'_>, budget: usize) -> TraceResult<Vec<TraceStep>> {
    let mut trajectory = vec![snapshot(session)];
    while !session.is_finished() && trajectory.len() <= budget {
        session.step()?;
        trajectory.push(snapshot(session));
    }
    Ok(trajectory)
}

fn snapshot(session: &TraceSession<'_>) -> TraceStep {
    TraceStep {
        line: session.current_line(),
        depth: session.depth(),
        state: session.current_variables().clone(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CheckResult {
    Terminated { steps: usize },
    Diverged,
    Failed(TraceError),
}

/// Outcome of running one problem with one starting state.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckReport {
    pub problem: String,
    /// `None` for the program's own initial state.
    pub preset: Option<String>,
    pub expected_diverging: bool,
    pub result: CheckResult,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        match self.result {
            CheckResult::Terminated { .. } => !self.expected_diverging,
            CheckResult::Diverged => self.expected_diverging,
            CheckResult::Failed(_) => false,
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed() { "ok" } else { "failed" };
        write!(
            f,
            "check problem:{} preset:{} status:{status}",
            self.problem,
            self.preset.as_deref().unwrap_or("initial")
        )?;
        match &self.result {
            CheckResult::Terminated { steps } => write!(f, " (finished in {steps} steps)"),
            CheckResult::Diverged if self.expected_diverging => write!(f, " (diverges as intended)"),
            CheckResult::Diverged => write!(f, " (did not finish within the step budget)"),
            CheckResult::Failed(error) if error.is_authoring_defect() => {
                write!(f, " (defect in the problem or its strategy: {error})")
            }
            CheckResult::Failed(error) => write!(f, " ({error})"),
        }
    }
}

/// Runs every problem from its initial state and from each preset.
pub fn check_catalog(catalog: &Catalog, budget: usize) -> Vec<CheckReport> {
    let mut reports = Vec::new();
    for program in catalog.problems() {
        reports.push(check_run(program, None, budget));
        for preset in &program.presets {
            reports.push(check_run(program, Some(&preset.label), budget));
        }
    }
    reports
}

fn check_run(program: &ProgramDescriptor, preset: Option<&str>, budget: usize) -> CheckReport {
    let result = match start(program, preset).and_then(|mut session| run_to_completion(&mut session, budget)) {
        Ok(RunOutcome::Finished { steps }) => CheckResult::Terminated { steps },
        Ok(RunOutcome::BudgetExhausted { .. }) => CheckResult::Diverged,
        Err(error) => CheckResult::Failed(error),
    };
    CheckReport {
        problem: program.id.clone(),
        preset: preset.map(str::to_string),
        expected_diverging: program.diverges_with(preset),
        result,
    }
}

/// Binds `program` and applies `preset` when one is given.
pub fn start<'p>(program: &'p ProgramDescriptor, preset: Option<&str>) -> TraceResult<TraceSession<'p>> {
    let mut session = TraceSession::bind(program)?;
    if let Some(label) = preset {
        session.set_preset(label)?;
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gcd() -> ProgramDescriptor {
        ProgramDescriptor::new(
            "gcd",
            "gcd",
            &["while b ≠ 0 do", "  t ← b", "  b ← a mod b", "  a ← t", "end while", "return a"],
            VariableState::new()
                .with("a", 48)
                .with("b", 18)
                .with("t", 0)
                .with("result", 0),
        )
    }

    #[test]
    fn runs_report_the_steps_taken() {
        let program = gcd();
        let mut session = TraceSession::bind(&program).expect("bind");
        let outcome = run_to_completion(&mut session, 1_000).expect("run");
        assert!(matches!(outcome, RunOutcome::Finished { steps } if steps == session.steps_taken()));
        assert_eq!(session.current_variables().int("result"), Ok(6));
    }

    #[test]
    fn small_budgets_stop_early() {
        let program = gcd();
        let mut session = TraceSession::bind(&program).expect("bind");
        assert_eq!(
            run_to_completion(&mut session, 2),
            Ok(RunOutcome::BudgetExhausted { budget: 2 })
        );
        assert_eq!(session.steps_taken(), 2);
    }

    #[test]
    fn recordings_start_with_the_initial_snapshot() {
        let program = gcd();
        let mut session = TraceSession::bind(&program).expect("bind");
        let trajectory = record(&mut session, 1_000).expect("record");
        assert_eq!(trajectory[0].line, 1);
        assert_eq!(trajectory[0].state, program.initial_state);
        assert_eq!(trajectory.len(), session.steps_taken() + 1);
        assert!(trajectory.iter().all(|step| step.depth == 0));

        let mut session = TraceSession::bind(&program).expect("bind");
        assert_eq!(record(&mut session, 3).expect("record").len(), 4);
    }

    #[test]
    fn reports_render_like_test_output() {
        let report = CheckReport {
            problem: "gcd".into(),
            preset: None,
            expected_diverging: false,
            result: CheckResult::Terminated { steps: 12 },
        };
        assert!(report.passed());
        assert_eq!(
            report.to_string(),
            "check problem:gcd preset:initial status:ok (finished in 12 steps)"
        );
    }

    #[test]
    fn failures_mark_authoring_defects() {
        let program = ProgramDescriptor::new("gcd", "gcd", &["while b ≠ 0 do"], VariableState::new());
        let report = check_run(&program, None, 10);
        assert!(!report.passed());
        assert!(matches!(
            &report.result,
            CheckResult::Failed(TraceError::UnknownVariable { name }) if name == "b"
        ));
        assert!(report.to_string().contains("defect in the problem or its strategy"));

        let report = check_run(&program, Some("missing"), 10);
        assert!(matches!(report.result, CheckResult::Failed(TraceError::PresetNotFound { .. })));
        assert!(!report.to_string().contains("defect"));
    }
}
