pub mod descriptor;
pub mod manifest;

pub use descriptor::{Preset, ProgramDescriptor};
pub use manifest::CatalogError;

use std::{fs, path::Path};
use tracing::info;

const BUILTIN: &str = include_str!("problems.toml");

/// Read-only set of problems, keyed by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    problems: Vec<ProgramDescriptor>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml(BUILTIN)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|error| CatalogError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let catalog = Self::from_toml(&content)?;
        info!(path = %path.display(), problems = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn from_toml(source: &str) -> Result<Self, CatalogError> {
        let problems = manifest::parse_catalog(source)?;
        Ok(Self { problems })
    }

    pub fn problems(&self) -> &[ProgramDescriptor] {
        &self.problems
    }

    pub fn get(&self, id: &str) -> Option<&ProgramDescriptor> {
        self.problems.iter().find(|problem| problem.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&ProgramDescriptor, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::UnknownProblem { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}
