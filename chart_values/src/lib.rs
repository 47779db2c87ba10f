//! Core crate for merging chart values.
//!
//! Values arrive from two places: YAML values files (`-f/--values`) and
//! command-line assignment expressions (`--set-json`, `--set`,
//! `--set-string`, `--set-file` and `--set-literal`). [`ValueOptions`]
//! collects both and [`ValueOptions::merge_values`] folds them into a single
//! nested document, ready to be handed to a template renderer.
//!
//! ```rust,no_run
//! use chart_values::ValueOptions;
//!
//! # fn main() -> chart_values::ValuesResult<()> {
//! let options = ValueOptions {
//!     value_files: vec!["values.yaml".into()],
//!     values: vec!["image.tag=1.4.2,replicas=3".into()],
//!     ..ValueOptions::default()
//! };
//! let values = options.merge_values()?;
//! assert_eq!(values["replicas"], 3);
//! # Ok(())
//! # }
//! ```

mod convert;
mod document;
mod error;
mod merge;
mod options;
mod result_ext;
mod source;
pub mod strvals;

pub use serde_json;

pub use convert::from_values;
pub use document::parse_document;
pub use error::{ExpressionKind, ValuesError};
pub use merge::{merge_maps, merge_value};
pub use options::ValueOptions;
pub use result_ext::ValuesResultExt;
pub use source::{SourceReader, StdSourceReader, ValueSource};
pub use strvals::{AssignmentError, ValueShape};

/// Nested key-value document produced by merging.
pub type Values = serde_json::Map<String, serde_json::Value>;

/// Result type returned by the merging entry points.
pub type ValuesResult<T> = Result<T, ValuesError>;
