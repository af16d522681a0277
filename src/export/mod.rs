//! Rendering and writing the generated document.

use std::io::Write;
use std::path::Path;

use crate::config::OutputFormat;
use crate::error_handling::GenerateError;
use crate::openapi::OpenApi;

/// Renders the document as YAML or pretty-printed JSON.
///
/// # Errors
///
/// Returns `GenerateError::Yaml` or `GenerateError::Json` if serialization fails.
pub fn render_document(document: &OpenApi, format: OutputFormat) -> Result<String, GenerateError> {
    let text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(document)?,
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(document)?;
            text.push('\n');
            text
        }
    };
    Ok(text)
}

/// Writes rendered text to `output`, or to stdout when no path is given.
pub fn write_document(text: &str, output: Option<&Path>) -> std::io::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            log::info!("wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
