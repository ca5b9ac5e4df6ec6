use crate::runtime::{
    error::TraceResult,
    frame::Line,
    state::VariableState,
};
use crate::strategies::NextLine;
use std::fmt;

/// Next-line hook a problem can supply for strategies that defer control flow.
pub type NextLineFn = fn(Line, &VariableState) -> TraceResult<NextLine>;

#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub label: String,
    /// Partial state: only the variables and heap nodes this preset overrides.
    pub values: VariableState,
}

/// Static description of one traceable problem. Loaded once, never mutated.
#[derive(Clone)]
pub struct ProgramDescriptor {
    pub id: String,
    pub title: String,
    pub description: String,
    pub logic_type: String,
    pub lines: Vec<String>,
    pub secondary_lines: Vec<String>,
    pub entry_line: Line,
    pub initial_state: VariableState,
    pub presets: Vec<Preset>,
    pub derived_flags: Vec<String>,
    pub diverging_presets: Vec<String>,
    pub custom_next_line: Option<NextLineFn>,
}

impl fmt::Debug for ProgramDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramDescriptor")
            .field("id", &self.id)
            .field("logic_type", &self.logic_type)
            .field("lines", &self.lines.len())
            .field("entry_line", &self.entry_line)
            .field("initial_state", &self.initial_state)
            .field("presets", &self.preset_labels())
            .field("custom_next_line", &self.custom_next_line.is_some())
            .finish_non_exhaustive()
    }
}

impl ProgramDescriptor {
    pub fn new(id: &str, logic_type: &str, lines: &[&str], initial_state: VariableState) -> Self {
        Self {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            logic_type: logic_type.to_string(),
            lines: lines.iter().map(|line| line.to_string()).collect(),
            secondary_lines: Vec::new(),
            entry_line: 1,
            initial_state,
            presets: Vec::new(),
            derived_flags: Vec::new(),
            diverging_presets: Vec::new(),
            custom_next_line: None,
        }
    }

    pub fn with_preset(mut self, label: &str, values: VariableState) -> Self {
        self.presets.push(Preset {
            label: label.to_string(),
            values,
        });
        self
    }

    pub fn with_entry_line(mut self, line: Line) -> Self {
        self.entry_line = line;
        self
    }

    pub fn with_derived_flag(mut self, name: &str) -> Self {
        self.derived_flags.push(name.to_string());
        self
    }

    pub fn with_next_line(mut self, next_line: NextLineFn) -> Self {
        self.custom_next_line = Some(next_line);
        self
    }

    pub fn last_line(&self) -> Line {
        self.lines.len()
    }

    pub fn line_text(&self, line: Line) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    pub fn preset(&self, label: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.label == label)
    }

    pub fn preset_labels(&self) -> Vec<String> {
        self.presets.iter().map(|preset| preset.label.clone()).collect()
    }

    pub fn diverges_with(&self, preset: Option<&str>) -> bool {
        preset.is_some_and(|label| self.diverging_presets.iter().any(|known| known == label))
    }
}
