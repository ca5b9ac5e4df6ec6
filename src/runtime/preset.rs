use crate::catalog::ProgramDescriptor;
use crate::runtime::{
    error::{TraceError, TraceResult},
    state::VariableState,
};

/// Builds the starting state for `label`: the preset's partial state laid over
/// the program's initial state, with derived flags restored afterwards.
///
/// Validation happens before anything is merged, so a rejected preset never
/// leaves a half-applied state behind.
pub fn load_preset(program: &ProgramDescriptor, label: &str) -> TraceResult<VariableState> {
    let preset = program
        .preset(label)
        .ok_or_else(|| TraceError::PresetNotFound {
            problem: program.id.clone(),
            label: label.to_string(),
            available: program.preset_labels(),
        })?;

    if let Some(variable) = preset
        .values
        .vars()
        .keys()
        .find(|name| !program.initial_state.contains(name))
    {
        return Err(TraceError::InvalidPreset {
            problem: program.id.clone(),
            label: label.to_string(),
            variable: variable.clone(),
        });
    }

    let mut state = program.initial_state.clone();
    state.merge(&preset.values);
    for flag in &program.derived_flags {
        if let Ok(reset) = program.initial_state.get(flag) {
            state.set(flag, reset.clone());
        }
    }
    Ok(state)
}
