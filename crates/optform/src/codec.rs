//! Settings codec: typed values to `key = value` lines and back.
//!
//! [`load`] reads and classifies a whole file; [`save`] is its inverse,
//! re-serializing every typed value into the textual grammar with the
//! `(...)` and `[[...]]` structure markers restored. Saving writes a
//! temp file and renames it so a failed save never corrupts the
//! previous file.

use indexmap::IndexMap;
use optform_core::prelude::*;
use std::path::Path;

use crate::reader::read_entries;
use crate::value::{format_real, infer, Scalar, TypedValue};

/// Typed entries in file order.
pub type TypedMap = IndexMap<String, TypedValue>;

/// Load a settings file and classify every raw value.
pub fn load(path: &Path) -> Result<TypedMap> {
    let entries = read_entries(path)?;
    Ok(entries
        .into_iter()
        .map(|(key, raw)| {
            let value = infer(&raw);
            trace!("{} classified as {}", key, value.type_name());
            (key, value)
        })
        .collect())
}

/// Save typed entries back to disk, one `key = value` line per entry in
/// map order, overwriting the file entirely.
pub fn save(path: &Path, values: &TypedMap) -> Result<()> {
    let mut content = String::new();
    for (key, value) in values {
        content.push_str(&encode_line(key, value)?);
        content.push('\n');
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Atomic write: write to temp, then rename
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::invalid_path(path))?;
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    std::fs::write(&temp_path, &content)?;
    std::fs::rename(&temp_path, path)?;

    debug!("Saved {} entries to {:?}", values.len(), path);
    Ok(())
}

/// Encode one entry as a `key = value` line (without trailing newline).
pub fn encode_line(key: &str, value: &TypedValue) -> Result<String> {
    Ok(format!("{} = {}", key, encode_value(key, value)?))
}

/// Serialize a typed value into the raw textual grammar.
///
/// The inverse of [`infer`]: re-inferring the produced string yields an
/// equivalent typed value. Empty or inconsistent structured values are
/// a programming error in the caller and fail with [`Error::Encode`].
pub fn encode_value(key: &str, value: &TypedValue) -> Result<String> {
    match value {
        TypedValue::Text(s) => Ok(s.clone()),
        TypedValue::Integer(n) => Ok(n.to_string()),
        TypedValue::Real(f) => Ok(format_real(*f)),
        TypedValue::Boolean(b) => Ok(if *b { "True" } else { "False" }.to_string()),
        TypedValue::ScalarList(items) => Ok(items
            .iter()
            .map(Scalar::display)
            .collect::<Vec<_>>()
            .join(", ")),
        TypedValue::ChoiceGroup { labels, selected } => {
            if labels.is_empty() {
                return Err(Error::encode(key, "choice group has no labels"));
            }
            if *selected >= labels.len() {
                return Err(Error::encode(
                    key,
                    format!("selected index {} out of range", selected),
                ));
            }
            // Re-insert the TRUE marker right after the selected label,
            // the inverse of the position-minus-one convention.
            let mut parts: Vec<&str> = labels.iter().map(String::as_str).collect();
            parts.insert(selected + 1, "TRUE");
            Ok(format!("({})", parts.join(", ")))
        }
        TypedValue::Enumeration { items, current } => {
            if items.is_empty() {
                return Err(Error::encode(key, "enumeration has no items"));
            }
            if *current >= items.len() {
                return Err(Error::encode(
                    key,
                    format!("current index {} out of range", current),
                ));
            }
            let mut parts: Vec<String> = items.clone();
            parts.push(current.to_string());
            Ok(format!("[[{}]]", parts.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn roundtrip(raw: &str) -> TypedValue {
        let value = infer(raw);
        let encoded = encode_value("key", &value).unwrap();
        infer(&encoded)
    }

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode_value("k", &TypedValue::Text("My App".into())).unwrap(), "My App");
        assert_eq!(encode_value("k", &TypedValue::Integer(800)).unwrap(), "800");
        assert_eq!(encode_value("k", &TypedValue::Real(1.5)).unwrap(), "1.5");
        assert_eq!(encode_value("k", &TypedValue::Boolean(true)).unwrap(), "True");
        assert_eq!(encode_value("k", &TypedValue::Boolean(false)).unwrap(), "False");
    }

    #[test]
    fn test_encode_scalar_list() {
        let list = TypedValue::ScalarList(vec![Scalar::Integer(800), Scalar::Integer(600)]);
        assert_eq!(encode_value("size", &list).unwrap(), "800, 600");
    }

    #[test]
    fn test_encode_choice_group() {
        let group = TypedValue::ChoiceGroup {
            labels: vec!["fast".into(), "slow".into()],
            selected: 0,
        };
        assert_eq!(encode_value("mode", &group).unwrap(), "(fast, TRUE, slow)");

        let group = TypedValue::ChoiceGroup {
            labels: vec!["fast".into(), "slow".into()],
            selected: 1,
        };
        assert_eq!(encode_value("mode", &group).unwrap(), "(fast, slow, TRUE)");
    }

    #[test]
    fn test_encode_enumeration() {
        let value = TypedValue::Enumeration {
            items: vec!["dark".into(), "light".into()],
            current: 1,
        };
        assert_eq!(encode_value("theme", &value).unwrap(), "[[dark, light, 1]]");
    }

    #[test]
    fn test_encode_line() {
        let line = encode_line("width", &TypedValue::Integer(800)).unwrap();
        assert_eq!(line, "width = 800");
    }

    #[test]
    fn test_encode_empty_choice_group_fails() {
        let group = TypedValue::ChoiceGroup {
            labels: vec![],
            selected: 0,
        };
        let err = encode_value("mode", &group).unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
    }

    #[test]
    fn test_encode_out_of_range_selection_fails() {
        let group = TypedValue::ChoiceGroup {
            labels: vec!["a".into()],
            selected: 3,
        };
        assert!(encode_value("mode", &group).is_err());

        let value = TypedValue::Enumeration {
            items: vec!["a".into()],
            current: 1,
        };
        assert!(encode_value("theme", &value).is_err());
    }

    #[test]
    fn test_encode_empty_enumeration_fails() {
        let value = TypedValue::Enumeration {
            items: vec![],
            current: 0,
        };
        assert!(encode_value("theme", &value).is_err());
    }

    #[test]
    fn test_roundtrip_law() {
        for raw in [
            "My App",
            "800",
            "1.5",
            "TRUE",
            "False",
            "800, 600",
            "1.5, 2.0",
            "x, y, z",
            "(fast, TRUE, slow)",
            "(fast, slow, TRUE)",
            "[[dark, light, 1]]",
        ] {
            assert_eq!(roundtrip(raw), infer(raw), "round-trip failed for {:?}", raw);
        }
    }

    #[test]
    fn test_enumeration_reencodes_identically() {
        let value = infer("[[dark, light, 1]]");
        assert_eq!(encode_value("theme", &value).unwrap(), "[[dark, light, 1]]");
    }

    #[test]
    fn test_load_classifies_values() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("options.txt");
        std::fs::write(
            &path,
            "title = My App\nwidth = 800\nscale = 1.5\ndebug = TRUE\nsize = 800, 600\nmode = (fast, TRUE, slow)\ntheme = [[dark, light, 1]]\n",
        )
        .unwrap();

        let values = load(&path).unwrap();
        assert_eq!(values["title"], TypedValue::Text("My App".into()));
        assert_eq!(values["width"], TypedValue::Integer(800));
        assert_eq!(values["scale"], TypedValue::Real(1.5));
        assert_eq!(values["debug"], TypedValue::Boolean(true));
        assert_eq!(
            values["size"],
            TypedValue::ScalarList(vec![Scalar::Integer(800), Scalar::Integer(600)])
        );
        assert_eq!(
            values["mode"],
            TypedValue::ChoiceGroup {
                labels: vec!["fast".into(), "slow".into()],
                selected: 0,
            }
        );
        assert_eq!(
            values["theme"],
            TypedValue::Enumeration {
                items: vec!["dark".into(), "light".into()],
                current: 1,
            }
        );
    }

    #[test]
    fn test_save_then_load_is_identity() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("options.txt");
        std::fs::write(
            &path,
            "title = My App\ndebug = true\nmode = (fast, slow, TRUE)\n",
        )
        .unwrap();

        let values = load(&path).unwrap();
        let out = temp.path().join("saved.txt");
        save(&out, &values).unwrap();

        assert_eq!(load(&out).unwrap(), values);
    }

    #[test]
    fn test_save_is_atomic() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("options.txt");
        let mut values = TypedMap::new();
        values.insert("width".into(), TypedValue::Integer(800));

        save(&path, &values).unwrap();

        assert!(path.exists());
        assert!(!temp.path().join(".options.txt.tmp").exists());
    }

    #[test]
    fn test_failed_save_preserves_previous_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("options.txt");
        std::fs::write(&path, "width = 800\n").unwrap();

        let mut values = TypedMap::new();
        values.insert(
            "mode".into(),
            TypedValue::ChoiceGroup {
                labels: vec![],
                selected: 0,
            },
        );
        assert!(save(&path, &values).is_err());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "width = 800\n");
    }

    #[test]
    fn test_saved_content_normalizes_spacing() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("options.txt");
        std::fs::write(&path, "width=800\n").unwrap();

        let values = load(&path).unwrap();
        let out = temp.path().join("out.txt");
        save(&out, &values).unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "width = 800\n");
    }
}
