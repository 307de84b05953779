use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

/// Reads the whole input file, or stdin when no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Parses a stored trip record. Records are plain JSON; model replies go
/// through `parse` instead.
pub(crate) fn parse_record(text: &str) -> anyhow::Result<Value> {
    serde_json::from_str(text.trim()).context("input is not a JSON trip record")
}

pub(crate) fn print_json(value: &Value, compact: bool) -> anyhow::Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
