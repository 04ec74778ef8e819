//! # optform - Typed Settings Codec
//!
//! Reads simple `key = value` settings files, infers each value's
//! semantic type, and materializes the entries as editable setting
//! items that round-trip back to the text format.
//!
//! The value grammar:
//!
//! ```text
//! title = My App                  -> text
//! width = 800                     -> integer
//! scale = 1.5                     -> real
//! debug = TRUE                    -> boolean
//! size  = 800, 600                -> scalar list
//! mode  = (fast, TRUE, slow)      -> choice group, selected = 0
//! theme = [[dark, light, 1]]      -> enumeration, current = 1
//! ```
//!
//! Lines without exactly one `=` are dropped; malformed structured
//! values degrade to a less specific type instead of failing the load.
//!
//! ## Public API
//!
//! ### Reader (`reader`)
//! - [`read_entries()`] - Load a file into an ordered raw-string map
//!
//! ### Values (`value`)
//! - [`TypedValue`] - Tagged union over the seven value forms
//! - [`infer()`] - Classify a raw string via the inference cascade
//!
//! ### Codec (`codec`)
//! - [`load()`] / [`save()`] - Whole-file typed round-trip
//! - [`encode_line()`] - One typed entry back to its `key = value` line
//!
//! ### Items (`items`)
//! - [`SettingItem`] - Editable item handed to the presentation layer
//! - [`load_items()`] / [`save_items()`] - Item-list round-trip
//! - [`reset_to_defaults()`], [`ensure_user_file()`], [`divide_items()`]

pub mod codec;
pub mod items;
pub mod reader;
pub mod value;

pub use codec::{encode_line, encode_value, load, save, TypedMap};
pub use items::{
    divide_items, ensure_user_file, items_from_map, load_items, map_from_items,
    reset_to_defaults, save_items, SettingItem,
};
pub use optform_core::{Error, Result};
pub use reader::{parse_entries, read_entries, SettingsMap};
pub use value::{infer, Scalar, TypedValue};
