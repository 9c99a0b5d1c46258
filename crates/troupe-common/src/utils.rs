//! Common utility functions used across Troupe components

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Serialize `data` as pretty JSON and write it to `path`, creating parent
/// directories as needed.
pub fn save_to_file<T: Serialize>(data: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Load JSON data previously written with [`save_to_file`].
pub fn load_from_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let data = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(data)
}

/// Truncate a response to `max_length` characters, appending a marker when
/// content was cut.
pub fn format_response(response: &str, max_length: usize) -> String {
    let chars: Vec<char> = response.chars().collect();
    if chars.len() > max_length {
        let mut truncated: String = chars[..max_length].iter().collect();
        truncated.push_str("\n[内容已截断]");
        truncated
    } else {
        response.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state.json");

        let data = json!({"city": "北京", "visits": 3});
        save_to_file(&data, &path).unwrap();

        let loaded: serde_json::Value = load_from_file(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<serde_json::Value> = load_from_file(dir.path().join("absent.json"));
        assert!(result.is_err());
    }

    #[test]
    fn format_response_truncates_long_text() {
        let long = "抱".repeat(50);
        let formatted = format_response(&long, 10);
        assert!(formatted.ends_with("[内容已截断]"));
        assert!(formatted.chars().count() < long.chars().count());

        let short = "ok";
        assert_eq!(format_response(short, 10), "ok");
    }
}
