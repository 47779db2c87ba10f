//! Constructors for `ValuesError`.

use std::error::Error;

use crate::strvals::AssignmentError;

use super::{ExpressionKind, ValuesError};

impl ValuesError {
    /// Construct a read error for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chart_values::ValuesError;
    /// let err = ValuesError::read("values.yaml", std::io::ErrorKind::NotFound.into());
    /// assert!(matches!(err, ValuesError::Read { ref path, .. } if path == "values.yaml"));
    /// ```
    #[must_use]
    pub fn read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Construct a parse error for the values file at `path`.
    #[must_use]
    pub fn parse(path: impl Into<String>, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Parse {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Attach expression context to a grammar failure.
    ///
    /// Shape conflicts surface as [`ValuesError::AssignmentConflict`]; every
    /// other failure, including `--set-file` read errors, is wrapped in
    /// [`ValuesError::Expression`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chart_values::{AssignmentError, ExpressionKind, ValuesError};
    /// let err = ValuesError::expression(
    ///     ExpressionKind::Typed,
    ///     "name",
    ///     AssignmentError::NoValue { key: "name".into() },
    /// );
    /// assert_eq!(
    ///     err.to_string(),
    ///     "failed parsing --set data 'name': key \"name\" has no value"
    /// );
    /// ```
    #[must_use]
    pub fn expression(
        kind: ExpressionKind,
        expression: impl Into<String>,
        source: AssignmentError,
    ) -> Self {
        match source {
            AssignmentError::Conflict {
                key,
                expected,
                found,
            } => Self::AssignmentConflict {
                kind,
                expression: expression.into(),
                key,
                expected,
                found,
            },
            other => Self::Expression {
                kind,
                expression: expression.into(),
                source: other,
            },
        }
    }

    /// Returns the values file or expression that caused the failure.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => Some(path),
            Self::Expression { expression, .. } | Self::AssignmentConflict { expression, .. } => {
                Some(expression)
            }
            Self::Deserialize(_) => None,
        }
    }
}
