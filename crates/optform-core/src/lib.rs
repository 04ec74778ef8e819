//! # optform-core - Foundation Types
//!
//! Foundation crate for optform. Provides error handling and logging
//! setup shared by the settings codec crate.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (thiserror, tracing, dirs).
//!
//! ## Public API
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum covering path validation, IO, and
//!   encode contract violations
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Logging (`logging`)
//! - [`logging::init()`] - File-based tracing setup, level via `OPTFORM_LOG`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use optform_core::prelude::*;
//! ```

pub mod error;
pub mod logging;

/// Prelude for common imports used throughout the optform crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
