use anyhow::Result;
use packed_form::{FormController, RenderConfig};
use std::path::Path;
use std::sync::Arc;

use super::load_definition;

pub fn run(definition: &Path, config: &RenderConfig) -> Result<()> {
    let controller = FormController::new(Arc::new(load_definition(definition)?))?;
    println!("{}", controller.render(config).into_string());
    Ok(())
}
