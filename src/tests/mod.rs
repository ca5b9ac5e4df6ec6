mod algorithms;
mod properties;

use crate::catalog::{Catalog, ProgramDescriptor};
use crate::runtime::session::TraceSession;
use crate::tools::runner::{run_to_completion, start, RunOutcome};

const BUDGET: usize = 10_000;

fn catalog() -> Catalog {
    Catalog::builtin().expect("built-in catalog parses")
}

fn problem<'c>(catalog: &'c Catalog, id: &str) -> &'c ProgramDescriptor {
    catalog.require(id).expect("problem exists")
}

/// Runs `id` (optionally under `preset`) to completion and hands back the session.
fn finished<'c>(catalog: &'c Catalog, id: &str, preset: Option<&str>) -> TraceSession<'c> {
    let mut session = start(problem(catalog, id), preset).expect("session starts");
    let outcome = run_to_completion(&mut session, BUDGET).expect("run succeeds");
    assert!(
        matches!(outcome, RunOutcome::Finished { .. }),
        "{id} {preset:?} did not finish"
    );
    session
}
