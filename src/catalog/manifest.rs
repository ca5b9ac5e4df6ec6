use crate::catalog::descriptor::{Preset, ProgramDescriptor};
use crate::parser::{parse_value, LiteralError};
use crate::runtime::{
    state::VariableState,
    value::{NodeId, Value},
};
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashSet},
    path::PathBuf,
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("Failed to read catalog {}", path.display())]
    #[diagnostic(code(catalog::io))]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("Catalog is not valid TOML: {message}")]
    #[diagnostic(code(catalog::parse))]
    Parse { message: String },
    #[error("Problem `{problem}` has an invalid literal for `{variable}`")]
    #[diagnostic(code(catalog::literal))]
    Literal {
        problem: String,
        variable: String,
        #[source]
        error: LiteralError,
    },
    #[error("Problem `{problem}`: {message}")]
    #[diagnostic(code(catalog::invalid_problem))]
    Invalid { problem: String, message: String },
    #[error("Duplicate problem id `{id}`")]
    #[diagnostic(code(catalog::duplicate_problem))]
    DuplicateProblem { id: String },
    #[error("Unknown problem `{id}`")]
    #[diagnostic(code(catalog::unknown_problem), help("run `pseudotrace list` to see problem ids"))]
    UnknownProblem { id: String },
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default, rename = "problem")]
    problems: Vec<RawProblem>,
}

#[derive(Deserialize)]
struct RawProblem {
    id: String,
    title: Option<String>,
    #[serde(default)]
    description: String,
    logic_type: String,
    lines: Vec<String>,
    #[serde(default)]
    secondary_lines: Vec<String>,
    entry: Option<usize>,
    #[serde(default)]
    initial: BTreeMap<String, toml::Value>,
    #[serde(default)]
    heap: BTreeMap<String, toml::Value>,
    #[serde(default)]
    presets: Vec<RawPreset>,
    #[serde(default)]
    derived: Vec<String>,
    #[serde(default)]
    diverging: Vec<String>,
}

#[derive(Deserialize)]
struct RawPreset {
    label: String,
    #[serde(default)]
    values: BTreeMap<String, toml::Value>,
    #[serde(default)]
    heap: BTreeMap<String, toml::Value>,
}

pub(crate) fn parse_catalog(source: &str) -> Result<Vec<ProgramDescriptor>, CatalogError> {
    let raw: RawCatalog = toml::from_str(source).map_err(|error| CatalogError::Parse {
        message: error.to_string(),
    })?;
    let mut seen = HashSet::new();
    let mut problems = Vec::with_capacity(raw.problems.len());
    for problem in raw.problems {
        if !seen.insert(problem.id.clone()) {
            return Err(CatalogError::DuplicateProblem { id: problem.id });
        }
        problems.push(build_descriptor(problem)?);
    }
    Ok(problems)
}

fn build_descriptor(raw: RawProblem) -> Result<ProgramDescriptor, CatalogError> {
    let id = raw.id;
    let invalid = |message: String| CatalogError::Invalid {
        problem: id.clone(),
        message,
    };

    if !raw.secondary_lines.is_empty() && raw.secondary_lines.len() != raw.lines.len() {
        return Err(invalid(format!(
            "secondary_lines has {} entries but lines has {}",
            raw.secondary_lines.len(),
            raw.lines.len()
        )));
    }

    let initial_state = build_state(&id, &raw.initial, &raw.heap)?;

    let mut presets: Vec<Preset> = Vec::with_capacity(raw.presets.len());
    for preset in &raw.presets {
        if presets.iter().any(|known| known.label == preset.label) {
            return Err(invalid(format!("duplicate preset `{}`", preset.label)));
        }
        presets.push(Preset {
            label: preset.label.clone(),
            values: build_state(&id, &preset.values, &preset.heap)?,
        });
    }

    for flag in &raw.derived {
        if !initial_state.contains(flag) {
            return Err(invalid(format!(
                "derived flag `{flag}` is not in the initial state"
            )));
        }
    }
    for label in &raw.diverging {
        if !presets.iter().any(|preset| &preset.label == label) {
            return Err(invalid(format!("diverging preset `{label}` does not exist")));
        }
    }

    Ok(ProgramDescriptor {
        title: raw.title.unwrap_or_else(|| id.clone()),
        description: raw.description.trim().to_string(),
        logic_type: raw.logic_type,
        lines: raw.lines,
        secondary_lines: raw.secondary_lines,
        entry_line: raw.entry.unwrap_or(1),
        initial_state,
        presets,
        derived_flags: raw.derived,
        diverging_presets: raw.diverging,
        custom_next_line: None,
        id,
    })
}

fn build_state(
    problem: &str,
    vars: &BTreeMap<String, toml::Value>,
    heap: &BTreeMap<String, toml::Value>,
) -> Result<VariableState, CatalogError> {
    let mut state = VariableState::new();
    for (name, raw) in vars {
        state.set(name, convert(problem, name, raw)?);
    }
    for (key, raw) in heap {
        let id: NodeId = key.parse().map_err(|_| CatalogError::Invalid {
            problem: problem.to_string(),
            message: format!("heap key `{key}` is not a node number"),
        })?;
        let node = convert(problem, &format!("@{key}"), raw)?;
        if !matches!(node, Value::Record(_)) {
            return Err(CatalogError::Invalid {
                problem: problem.to_string(),
                message: format!("heap node @{key} must be a record"),
            });
        }
        state = state.with_node(id, node);
    }
    Ok(state)
}

/// Native TOML scalars map directly; strings carry value literals.
fn convert(problem: &str, variable: &str, raw: &toml::Value) -> Result<Value, CatalogError> {
    Ok(match raw {
        toml::Value::String(literal) => {
            parse_value(literal).map_err(|error| CatalogError::Literal {
                problem: problem.to_string(),
                variable: variable.to_string(),
                error,
            })?
        }
        toml::Value::Integer(v) => Value::Integer(*v),
        toml::Value::Float(v) => Value::Real(*v),
        toml::Value::Boolean(v) => Value::Boolean(*v),
        toml::Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| convert(problem, variable, item))
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Table(fields) => Value::Record(
            fields
                .iter()
                .map(|(name, item)| -> Result<(String, Value), CatalogError> {
                    Ok((name.clone(), convert(problem, variable, item)?))
                })
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Datetime(_) => {
            return Err(CatalogError::Invalid {
                problem: problem.to_string(),
                message: format!("`{variable}` uses a datetime, which traces cannot hold"),
            })
        }
    })
}
