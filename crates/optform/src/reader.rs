//! Settings file reader.
//!
//! Loads a `key = value` text file into an insertion-ordered map of raw
//! strings. Lines without exactly one `=` are dropped without
//! diagnostics -- comments and malformed rows never abort a load.

use indexmap::IndexMap;
use optform_core::prelude::*;
use std::path::Path;

/// Raw entries in file order. Duplicate keys keep their first position
/// with the last value winning.
pub type SettingsMap = IndexMap<String, String>;

/// Read a settings file into a [`SettingsMap`].
///
/// Fails with [`Error::InvalidPath`] when the path does not exist or
/// does not carry the `txt` suffix. Everything else is lenient: only
/// lines containing exactly one `=` become entries, with key and value
/// trimmed.
pub fn read_entries(path: &Path) -> Result<SettingsMap> {
    if !path.exists() || !has_txt_suffix(path) {
        return Err(Error::invalid_path(path));
    }

    let content = std::fs::read_to_string(path)?;
    let map = parse_entries(&content);
    debug!("Loaded {} entries from {:?}", map.len(), path);
    Ok(map)
}

/// Split text content into trimmed key/value pairs.
pub fn parse_entries(content: &str) -> SettingsMap {
    let mut map = SettingsMap::new();
    for line in content.lines() {
        if line.matches('=').count() != 1 {
            continue;
        }
        // Exactly one '=' guaranteed above.
        if let Some((key, value)) = line.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

/// The settings format's historical suffix check: the last three
/// characters of the final dot segment must equal `txt`, byte for byte.
/// `notes.txt` and `notes.mytxt` pass, `NOTES.TXT` does not.
fn has_txt_suffix(path: &Path) -> bool {
    let name = path.to_string_lossy();
    let last_segment = name.rsplit('.').next().unwrap_or(&name);
    last_segment.ends_with("txt")
}
