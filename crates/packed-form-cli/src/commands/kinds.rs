use anyhow::Result;
use colored::Colorize;
use packed_form::{registry, FieldKind};

pub fn run() -> Result<()> {
    for tag in registry::supported_kinds() {
        let kind: FieldKind = tag.parse()?;
        let family = if kind.is_numeric() { "min / max" } else { "minLength / maxLength" };
        println!("  {:<10} {}", tag.cyan(), family.dimmed());
    }
    Ok(())
}
