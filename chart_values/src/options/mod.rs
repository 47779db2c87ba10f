//! The values option bundle and the merge that consumes it.

use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::parse_document;
use crate::merge::merge_maps;
use crate::strvals::{self, AssignmentError};
use crate::{
    ExpressionKind, SourceReader, StdSourceReader, ValueSource, Values, ValuesError, ValuesResult,
    ValuesResultExt,
};

/// Every way values can be supplied, in the order they were given.
///
/// Derives [`clap::Args`] so a command can flatten it:
///
/// ```rust
/// use chart_values::ValueOptions;
/// use clap::Parser;
///
/// #[derive(Parser)]
/// struct Install {
///     #[command(flatten)]
///     values: ValueOptions,
/// }
///
/// let cli = Install::parse_from(["install", "-f", "a.yaml,b.yaml", "--set", "x=1"]);
/// assert_eq!(cli.values.value_files, ["a.yaml", "b.yaml"]);
/// assert_eq!(cli.values.values, ["x=1"]);
/// ```
#[derive(Args, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ValueOptions {
    /// Values files to merge, later files taking precedence. `-` reads
    /// standard input.
    #[arg(
        short = 'f',
        long = "values",
        value_name = "FILE",
        value_delimiter = ','
    )]
    pub value_files: Vec<String>,

    /// Assignments whose values are JSON documents.
    #[arg(long = "set-json", value_name = "EXPR")]
    pub json_values: Vec<String>,

    /// Assignments whose value types are inferred.
    #[arg(long = "set", value_name = "EXPR")]
    pub values: Vec<String>,

    /// Assignments whose values are always strings.
    #[arg(long = "set-string", value_name = "EXPR")]
    pub string_values: Vec<String>,

    /// Assignments whose values are read from the named files.
    #[arg(long = "set-file", value_name = "EXPR")]
    pub file_values: Vec<String>,

    /// Assignments whose values are taken verbatim.
    #[arg(long = "set-literal", value_name = "EXPR")]
    pub literal_values: Vec<String>,
}

impl ValueOptions {
    /// Merge every values file and assignment into one document.
    ///
    /// Values files are deep-merged in order. Assignments are then applied
    /// by kind, lowest precedence first: `--set-json`, `--set`,
    /// `--set-string`, `--set-file`, `--set-literal`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValuesError`] encountered; no partial document is
    /// produced.
    pub fn merge_values(&self) -> ValuesResult<Values> {
        self.merge_values_with(&StdSourceReader)
    }

    /// Like [`ValueOptions::merge_values`], performing every read through
    /// `reader`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValuesError`] encountered.
    pub fn merge_values_with<R>(&self, reader: &R) -> ValuesResult<Values>
    where
        R: SourceReader + ?Sized,
    {
        let mut base = Values::new();

        for path in &self.value_files {
            let bytes = reader
                .read_source(&ValueSource::parse(path))
                .map_err(|err| ValuesError::read(path.as_str(), err))?;
            let current = parse_document(path, &bytes)?;
            tracing::debug!(path = %path, keys = current.len(), "merging values file");
            merge_maps(&mut base, current);
        }

        for expression in &self.json_values {
            apply(ExpressionKind::Json, expression, |expr| {
                strvals::parse_json(expr, &mut base)
            })?;
        }

        for expression in &self.values {
            apply(ExpressionKind::Typed, expression, |expr| {
                strvals::parse_into(expr, &mut base)
            })?;
        }

        for expression in &self.string_values {
            apply(ExpressionKind::Text, expression, |expr| {
                strvals::parse_into_string(expr, &mut base)
            })?;
        }

        for expression in &self.file_values {
            apply(ExpressionKind::File, expression, |expr| {
                strvals::parse_into_file(expr, &mut base, |target| read_file_value(reader, target))
            })?;
        }

        for expression in &self.literal_values {
            apply(ExpressionKind::Literal, expression, |expr| {
                strvals::parse_literal_into(expr, &mut base)
            })?;
        }

        Ok(base)
    }
}

fn apply<F>(kind: ExpressionKind, expression: &str, parse: F) -> ValuesResult<()>
where
    F: FnOnce(&str) -> Result<(), AssignmentError>,
{
    tracing::debug!(flag = kind.flag(), expression, "applying assignment");
    parse(expression).with_expression(kind, expression)
}

/// Resolve a `--set-file` right-hand side to the file's text.
///
/// Contents must be UTF-8; anything else is rejected rather than rewritten.
fn read_file_value<R>(reader: &R, target: &str) -> Result<Value, AssignmentError>
where
    R: SourceReader + ?Sized,
{
    let bytes = reader
        .read_source(&ValueSource::parse(target))
        .map_err(|source| AssignmentError::Read {
            path: target.to_owned(),
            source,
        })?;
    String::from_utf8(bytes)
        .map(Value::String)
        .map_err(|source| AssignmentError::InvalidText {
            path: target.to_owned(),
            source,
        })
}
