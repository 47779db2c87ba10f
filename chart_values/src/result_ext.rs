//! Extensions for mapping errors to `ValuesResult` concisely.
//!
//! The grammar functions in [`crate::strvals`] report bare
//! [`AssignmentError`]s because they do not know which flag an expression came
//! from. [`ValuesResultExt::with_expression`] attaches that context at the call
//! site instead of repeating `.map_err(|e| ValuesError::expression(..))`.
//!
//! # Examples
//!
//! ```
//! use chart_values::{ExpressionKind, ValuesResult, ValuesResultExt, strvals};
//!
//! fn apply(expression: &str) -> ValuesResult<chart_values::Values> {
//!     strvals::parse(expression).with_expression(ExpressionKind::Typed, expression)
//! }
//!
//! assert!(apply("replicas=3").is_ok());
//! assert!(apply("replicas").is_err());
//! ```

use crate::strvals::AssignmentError;
use crate::{ExpressionKind, ValuesError, ValuesResult};

/// Converts grammar results into [`ValuesResult`]s carrying the expression.
pub trait ValuesResultExt<T> {
    /// Wrap the error, if any, with the flag and raw expression text.
    ///
    /// # Errors
    ///
    /// Propagates the original error converted by
    /// [`ValuesError::expression`].
    fn with_expression(self, kind: ExpressionKind, expression: &str) -> ValuesResult<T>;
}

impl<T> ValuesResultExt<T> for Result<T, AssignmentError> {
    fn with_expression(self, kind: ExpressionKind, expression: &str) -> ValuesResult<T> {
        self.map_err(|err| ValuesError::expression(kind, expression, err))
    }
}
