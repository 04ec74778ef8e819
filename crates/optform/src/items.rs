//! Setting item enumeration.
//!
//! Builds the list of editable setting items handed to whatever renders
//! them, and converts edited items back into a typed map for
//! re-encoding. The codec never inspects a control; this is the whole
//! hand-off surface.

use std::path::{Path, PathBuf};

use optform_core::prelude::*;

use crate::codec::{self, TypedMap};
use crate::value::TypedValue;

/// A single setting item for display/editing
#[derive(Debug, Clone)]
pub struct SettingItem {
    /// Settings file key
    pub key: String,
    /// Display label (defaults to the key)
    pub label: String,
    /// Current value
    pub value: TypedValue,
    /// Default value, when a defaults file is known
    pub default: Option<TypedValue>,
    /// Whether this setting is read-only
    pub readonly: bool,
    /// Category/section for grouping
    pub section: String,
}

impl SettingItem {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            value: TypedValue::Text(String::new()),
            default: None,
            readonly: false,
            section: String::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn value(mut self, value: TypedValue) -> Self {
        self.value = value;
        self
    }

    pub fn default(mut self, value: TypedValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn is_modified(&self) -> bool {
        match &self.default {
            Some(default) => *default != self.value,
            None => false,
        }
    }
}

/// Build one item per typed entry, in map order.
pub fn items_from_map(values: &TypedMap) -> Vec<SettingItem> {
    values
        .iter()
        .map(|(key, value)| SettingItem::new(key.clone()).value(value.clone()))
        .collect()
}

/// Collect edited items back into a typed map, in item order.
pub fn map_from_items(items: &[SettingItem]) -> TypedMap {
    items
        .iter()
        .map(|item| (item.key.clone(), item.value.clone()))
        .collect()
}

/// Load setting items, preferring the user file over the defaults file.
///
/// When a defaults file is given as well, each item carries its default
/// value so modified items can be detected and reset. Fails when
/// neither path is provided.
pub fn load_items(
    user_path: Option<&Path>,
    default_path: Option<&Path>,
) -> Result<Vec<SettingItem>> {
    let primary = user_path
        .or(default_path)
        .ok_or_else(|| Error::settings("no settings path given"))?;

    let values = codec::load(primary)?;
    // Defaults are only distinct when the user file was the source.
    let defaults = match (user_path, default_path) {
        (Some(_), Some(path)) => Some(codec::load(path)?),
        _ => None,
    };

    Ok(values
        .iter()
        .map(|(key, value)| {
            let mut item = SettingItem::new(key.clone()).value(value.clone());
            if let Some(defaults) = &defaults {
                if let Some(default) = defaults.get(key) {
                    item = item.default(default.clone());
                }
            }
            item
        })
        .collect())
}

/// Encode edited items and save them, one line per item.
pub fn save_items(path: &Path, items: &[SettingItem]) -> Result<()> {
    codec::save(path, &map_from_items(items))
}

/// Provision a per-user settings file next to the defaults file.
///
/// Derives `<defaults-stem>_<username>.txt` in the same directory and
/// copies the defaults there once, so user edits never touch the
/// shipped defaults.
pub fn ensure_user_file(default_path: &Path) -> Result<PathBuf> {
    let stem = default_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::invalid_path(default_path))?;

    let user_path = default_path.with_file_name(format!("{}_{}.txt", stem, username()));
    if !user_path.exists() {
        std::fs::copy(default_path, &user_path)?;
        info!("Created user settings file {:?}", user_path);
    }
    Ok(user_path)
}

fn username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "user".to_string())
}

/// Reload the defaults file, save its values to the user file, and
/// return the reset items (value and default both at the default).
pub fn reset_to_defaults(default_path: &Path, user_path: &Path) -> Result<Vec<SettingItem>> {
    let defaults = codec::load(default_path)?;
    codec::save(user_path, &defaults)
        .with_context(|| format!("resetting {:?} to defaults", user_path))?;

    Ok(defaults
        .iter()
        .map(|(key, value)| {
            SettingItem::new(key.clone())
                .value(value.clone())
                .default(value.clone())
        })
        .collect())
}

/// Split items into `columns` balanced groups, remainder spread over
/// the leading groups. Fewer than two columns yields a single group.
pub fn divide_items<T>(items: Vec<T>, columns: usize) -> Vec<Vec<T>> {
    if columns < 2 {
        return vec![items];
    }

    let per_column = items.len() / columns;
    let remainder = items.len() % columns;

    let mut divided = Vec::with_capacity(columns);
    let mut rest = items;
    for column in 0..columns {
        let take = per_column + usize::from(column < remainder);
        let tail = rest.split_off(take.min(rest.len()));
        divided.push(rest);
        rest = tail;
    }
    divided
}
