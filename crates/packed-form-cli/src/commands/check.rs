use anyhow::{anyhow, bail, Result};
use colored::Colorize;
use packed_form::{assemble, FormValues, ValidationErrors, Value};
use std::path::Path;

use super::load_definition;

pub fn run(definition: &Path, pairs: &[String]) -> Result<()> {
    let form = assemble(&load_definition(definition)?)?;
    let values = parse_pairs(pairs)?;

    match form.validate(&values) {
        Ok(valid) => {
            println!("{}", serde_json::to_string_pretty(&valid)?);
            Ok(())
        }
        Err(errors) => {
            print_errors(&errors);
            bail!("{}", errors)
        }
    }
}

/// Parses `name=value` arguments; the value may be empty or contain '='
pub fn parse_pairs(pairs: &[String]) -> Result<FormValues> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) if !name.is_empty() => {
                Ok((name.to_string(), Value::from(value)))
            }
            _ => Err(anyhow!("Expected name=value, got `{}`", pair)),
        })
        .collect()
}

fn print_errors(errors: &ValidationErrors) {
    for (field, messages) in errors.iter() {
        for message in messages {
            eprintln!("  {} {}: {}", "✗".red(), field.bold(), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_pairs() {
        let values = parse_pairs(&["name=Al".into(), "age=".into(), "eq=a=b".into()]).unwrap();
        assert_eq!(values["name"], Value::from("Al"));
        assert_eq!(values["age"], Value::from(""));
        assert_eq!(values["eq"], Value::from("a=b"));
        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["name", "age", "eq"]);
    }

    #[test]
    fn test_parse_pairs_rejects_bare_words() {
        assert!(parse_pairs(&["name".into()]).is_err());
        assert!(parse_pairs(&["=value".into()]).is_err());
    }
}
