pub mod gesture;
pub mod script;

pub use gesture::{GestureEvent, GestureKind, InputEvent, Zone};
pub use script::{load_script_csv, load_script_json, ScriptedEvent};

use anyhow::{Context, Result};
use std::path::Path;

/// Gesture script format detection result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptFormat {
    Csv,
    Json,
    Unknown,
}

/// Detect the format of a gesture script from its first bytes
pub fn detect_format(data: &[u8]) -> ScriptFormat {
    let text = match std::str::from_utf8(&data[..data.len().min(500)]) {
        Ok(text) => text.trim_start(),
        Err(_) => return ScriptFormat::Unknown,
    };

    if text.starts_with('[') {
        return ScriptFormat::Json;
    }

    let looks_like_csv = text
        .lines()
        .take(5)
        .any(|line| line.chars().filter(|&c| c == ',').count() >= 2);
    if looks_like_csv {
        ScriptFormat::Csv
    } else {
        ScriptFormat::Unknown
    }
}

/// Load a gesture script, auto-detecting its format.
/// Events come back sorted by time.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<ScriptedEvent>> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read gesture script {}", path.display()))?;

    match detect_format(&data) {
        ScriptFormat::Csv => load_script_csv(data.as_slice()),
        ScriptFormat::Json => load_script_json(&data),
        ScriptFormat::Unknown => anyhow::bail!("Unknown gesture script format: {}", path.display()),
    }
}
