pub mod check;
pub mod kinds;
pub mod render;
pub mod serve;

use anyhow::{Context, Result};
use packed_form::FormDefinition;
use std::path::Path;

/// Loads a definition file, attaching the path to any error
pub fn load_definition(path: &Path) -> Result<FormDefinition> {
    FormDefinition::load(path)
        .with_context(|| format!("Failed to load form definition: {}", path.display()))
}
