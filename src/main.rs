use pseudotrace::{
    catalog::Catalog,
    config::EngineConfig,
    runtime::session::TraceSession,
    tools::{
        diagnostics::{emit, emit_step_error},
        runner::{check_catalog, record, start},
    },
};
use std::env;
use std::process::ExitCode;

const USAGE: &str =
    "Usage: pseudotrace [list | show <id> | trace <id> [--preset LABEL] [--max-steps N] | check [--max-steps N]]";

enum Command {
    List,
    Show { id: String },
    Trace {
        id: String,
        preset: Option<String>,
        max_steps: Option<usize>,
    },
    Check { max_steps: Option<usize> },
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let config = match EngineConfig::load() {
        Ok(config) => config,
        Err(error) => {
            emit(error);
            return ExitCode::FAILURE;
        }
    };
    if let Ok(filter) = config.env_filter() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let catalog = match config.catalog() {
        Ok(catalog) => catalog,
        Err(error) => {
            emit(error);
            return ExitCode::FAILURE;
        }
    };

    let ok = match command {
        Command::List => list(&catalog),
        Command::Show { id } => show(&catalog, &id),
        Command::Trace {
            id,
            preset,
            max_steps,
        } => trace(
            &catalog,
            &id,
            preset.as_deref(),
            max_steps.unwrap_or(config.max_steps),
        ),
        Command::Check { max_steps } => check(&catalog, max_steps.unwrap_or(config.max_steps)),
    };
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::List);
    };
    let mut positional = Vec::new();
    let mut preset = None;
    let mut max_steps = None;
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--preset" => {
                let label = iter.next().ok_or("--preset needs a label")?;
                preset = Some(label.clone());
            }
            "--max-steps" => {
                let raw = iter.next().ok_or("--max-steps needs a number")?;
                let steps = raw
                    .parse::<usize>()
                    .ok()
                    .filter(|steps| *steps > 0)
                    .ok_or_else(|| format!("invalid step budget `{raw}`"))?;
                max_steps = Some(steps);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option `{flag}`")),
            _ => positional.push(arg.clone()),
        }
    }

    let mut positional = positional.into_iter();
    let command = match name.as_str() {
        "list" => Command::List,
        "show" => Command::Show {
            id: positional.next().ok_or("show needs a problem id")?,
        },
        "trace" => Command::Trace {
            id: positional.next().ok_or("trace needs a problem id")?,
            preset,
            max_steps,
        },
        "check" => Command::Check { max_steps },
        other => return Err(format!("unknown command `{other}`")),
    };
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument `{extra}`"));
    }
    Ok(command)
}

fn list(catalog: &Catalog) -> bool {
    let width = catalog
        .problems()
        .iter()
        .map(|problem| problem.id.len())
        .max()
        .unwrap_or(0);
    for problem in catalog.problems() {
        println!(
            "{:<width$}  {} ({})",
            problem.id, problem.title, problem.logic_type
        );
    }
    true
}

fn show(catalog: &Catalog, id: &str) -> bool {
    let problem = match catalog.require(id) {
        Ok(problem) => problem,
        Err(error) => {
            emit(error);
            return false;
        }
    };
    println!("{} [{}]", problem.title, problem.logic_type);
    if !problem.description.is_empty() {
        println!("{}", problem.description);
    }
    println!();
    for (index, text) in problem.lines.iter().enumerate() {
        let marker = if index + 1 == problem.entry_line { '>' } else { ' ' };
        match problem.secondary_lines.get(index) {
            Some(secondary) => println!("{marker}{:>3}  {text:<40}  {secondary}", index + 1),
            None => println!("{marker}{:>3}  {text}", index + 1),
        }
    }
    println!();
    println!("initial: {}", problem.initial_state);
    for preset in &problem.presets {
        let note = if problem.diverges_with(Some(&preset.label)) {
            " (does not terminate)"
        } else {
            ""
        };
        println!("preset `{}`: {}{note}", preset.label, preset.values);
    }
    true
}

fn trace(catalog: &Catalog, id: &str, preset: Option<&str>, budget: usize) -> bool {
    let problem = match catalog.require(id) {
        Ok(problem) => problem,
        Err(error) => {
            emit(error);
            return false;
        }
    };
    let mut session = match start(problem, preset) {
        Ok(session) => session,
        Err(error) => {
            emit(error);
            return false;
        }
    };

    let trajectory = match record(&mut session, budget) {
        Ok(trajectory) => trajectory,
        Err(error) => {
            emit_step_error(problem, session.current_line(), &error);
            return false;
        }
    };
    for (index, step) in trajectory.iter().enumerate() {
        let text = problem.line_text(step.line).unwrap_or("").trim();
        let indent = "  ".repeat(step.depth);
        println!("{index:>5}  {:>3} {indent}{text:<32}  {}", step.line, step.state);
    }
    print_outcome(&session, budget);
    true
}

fn print_outcome(session: &TraceSession<'_>, budget: usize) {
    let output = session.current_variables().output();
    if !output.is_empty() {
        println!("output:");
        for line in output {
            println!("  {line}");
        }
    }
    if session.is_finished() {
        println!(
            "finished after {} steps (peak call depth {})",
            session.steps_taken(),
            session.peak_depth()
        );
    } else {
        println!("stopped after {budget} steps without finishing");
    }
}

fn check(catalog: &Catalog, budget: usize) -> bool {
    let reports = check_catalog(catalog, budget);
    let failures = reports.iter().filter(|report| !report.passed()).count();
    for report in &reports {
        println!("{report}");
    }
    if failures > 0 {
        println!("check result: FAILED. {failures} of {} run(s) failed", reports.len());
        false
    } else {
        println!("check result: ok. {} run(s) passed", reports.len());
        true
    }
}
