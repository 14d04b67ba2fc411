use log::debug;
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Loan payload from `--input`, else piped stdin.
///
/// Returns `None` when no file is given and stdin is a terminal or an empty
/// pipe; the caller then builds the payload from flags.
pub fn load(path: Option<&str>) -> Result<Option<Value>, Box<dyn Error>> {
    let (source, text) = match path {
        Some(path) => {
            let path = Path::new(path);
            if !path.is_file() {
                return Err(format!("Payload file not found: {}", path.display()).into());
            }
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {e}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => {
            if atty::is(atty::Stream::Stdin) {
                return Ok(None);
            }
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            if text.trim().is_empty() {
                return Ok(None);
            }
            ("stdin".to_string(), text)
        }
    };

    debug!("read {} bytes of loan payload from {source}", text.len());
    let value = serde_json::from_str(text.trim())
        .map_err(|e| format!("Failed to parse loan payload from {source}: {e}"))?;
    Ok(Some(value))
}
