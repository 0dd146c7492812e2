use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(value: &Value, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(value)?,
    }

    Ok(())
}

/// Key/value listing of the top-level object; nested values print as
/// indented pretty JSON. Nulls render as "N/A" per the dashboard's
/// missing-field policy.
fn render_table(value: &Value) -> Result<(), CliError> {
    let Some(object) = value.as_object() else {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    };

    let width = object.keys().map(String::len).max().unwrap_or(0);
    for (key, field) in object {
        match field {
            Value::Null => println!("{key:width$} : N/A"),
            Value::Bool(b) => println!("{key:width$} : {b}"),
            Value::Number(n) => println!("{key:width$} : {n}"),
            Value::String(s) => println!("{key:width$} : {s}"),
            nested => {
                println!("{key:width$} :");
                let payload = serde_json::to_string_pretty(nested)?;
                for line in payload.lines() {
                    println!("  {line}");
                }
            }
        }
    }

    Ok(())
}
