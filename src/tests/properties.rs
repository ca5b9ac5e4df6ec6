use super::{catalog, problem, BUDGET};
use crate::runtime::{
    error::TraceError,
    session::{StepEvent, TraceSession},
};
use crate::tools::runner::{check_catalog, record, start, CheckResult, TraceStep};

/// Every starting point of every problem that is expected to terminate.
fn terminating_runs(catalog: &crate::catalog::Catalog) -> Vec<(String, Option<String>)> {
    let mut runs = Vec::new();
    for program in catalog.problems() {
        runs.push((program.id.clone(), None));
        for preset in &program.presets {
            if !program.diverges_with(Some(&preset.label)) {
                runs.push((program.id.clone(), Some(preset.label.clone())));
            }
        }
    }
    runs
}

fn trajectory(catalog: &crate::catalog::Catalog, id: &str, preset: Option<&str>) -> Vec<TraceStep> {
    let mut session = start(problem(catalog, id), preset).expect("session starts");
    record(&mut session, BUDGET).expect("trace succeeds")
}

#[test]
fn every_run_matches_its_divergence_annotation() {
    let catalog = catalog();
    let reports = check_catalog(&catalog, BUDGET);
    for report in &reports {
        assert!(report.passed(), "{report}");
    }
    let diverged = reports
        .iter()
        .filter(|report| report.result == CheckResult::Diverged)
        .count();
    assert_eq!(diverged, 2);
}

#[test]
fn traces_are_deterministic() {
    let catalog = catalog();
    for (id, preset) in terminating_runs(&catalog) {
        let first = trajectory(&catalog, &id, preset.as_deref());
        let second = trajectory(&catalog, &id, preset.as_deref());
        assert_eq!(first, second, "{id} {preset:?}");
    }
}

#[test]
fn call_stacks_balance() {
    let catalog = catalog();
    for (id, preset) in terminating_runs(&catalog) {
        let steps = trajectory(&catalog, &id, preset.as_deref());
        for pair in steps.windows(2) {
            let change = pair[1].depth.abs_diff(pair[0].depth);
            assert!(change <= 1, "{id} {preset:?} jumped {change} frames at once");
        }
        assert_eq!(steps.last().map(|step| step.depth), Some(0), "{id} {preset:?}");

        let program = problem(&catalog, &id);
        let recursive = crate::runtime::registry::resolve(&program.logic_type)
            .expect("registered")
            .is_recursive();
        let peak = steps.iter().map(|step| step.depth).max().unwrap_or(0);
        assert_eq!(peak > 0, recursive, "{id} {preset:?}");
    }
}

#[test]
fn reset_is_idempotent_and_matches_a_fresh_bind() {
    let catalog = catalog();
    for program in catalog.problems() {
        let fresh = TraceSession::bind(program).expect("bind");
        let mut session = TraceSession::bind(program).expect("bind");
        for _ in 0..5 {
            session.step().expect("step");
        }
        session.reset();
        let once = (session.current_line(), session.current_variables().clone());
        session.reset();
        assert_eq!((session.current_line(), session.current_variables().clone()), once);
        assert_eq!(session.current_line(), fresh.current_line());
        assert_eq!(session.current_variables(), fresh.current_variables());
        assert_eq!(session.depth(), 0);
        assert_eq!(session.peak_depth(), 0);
        assert!(!session.is_finished());
    }
}

#[test]
fn presets_do_not_leak_into_each_other() {
    let catalog = catalog();
    for program in catalog.problems() {
        for first in &program.presets {
            for second in &program.presets {
                let mut session = start(program, Some(&first.label)).expect("first preset");
                for _ in 0..3 {
                    session.step().expect("step");
                }
                session.set_preset(&second.label).expect("second preset");
                let direct = start(program, Some(&second.label)).expect("direct preset");
                assert_eq!(
                    session.current_variables(),
                    direct.current_variables(),
                    "{}: `{}` then `{}`",
                    program.id,
                    first.label,
                    second.label
                );
            }
        }
    }
}

#[test]
fn derived_flags_are_recomputed_for_every_preset() {
    let catalog = catalog();
    let program = problem(&catalog, "linear-search");
    for preset in &program.presets {
        let session = start(program, Some(&preset.label)).expect("preset applies");
        assert_eq!(session.current_variables().boolean("found"), Ok(false));
        assert!(session.current_variables().get("result").map(|v| v.is_undefined()) == Ok(true));
    }
}

#[test]
fn unknown_presets_leave_the_session_alone() {
    let catalog = catalog();
    let program = problem(&catalog, "fibonacci");
    let mut session = start(program, Some("n=10")).expect("preset applies");
    session.step().expect("step");
    let before = (session.current_line(), session.current_variables().clone());
    assert!(matches!(
        session.set_preset("n=99"),
        Err(TraceError::PresetNotFound { available, .. }) if available.len() == 3
    ));
    assert_eq!((session.current_line(), session.current_variables().clone()), before);
    assert_eq!(session.active_preset(), Some("n=10"));
}

#[test]
fn stepping_back_retraces_the_whole_run() {
    let catalog = catalog();
    let program = problem(&catalog, "factorial-recursive");
    let mut session = TraceSession::bind(program).expect("bind");
    let forward = record(&mut session, BUDGET).expect("trace");
    assert_eq!(session.step(), Ok(StepEvent::Idle));

    let mut backward = vec![(session.current_line(), session.depth())];
    while session.step_back() {
        backward.push((session.current_line(), session.depth()));
    }
    backward.reverse();
    let expected: Vec<_> = forward.iter().map(|step| (step.line, step.depth)).collect();
    assert_eq!(backward, expected);
    assert_eq!(session.current_variables(), &program.initial_state);
}
