//! Where values files and `--set-file` targets are read from.

use std::fmt;
use std::io::Read;

use camino::Utf8PathBuf;

/// A readable source named on the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValueSource {
    /// `-`: everything on standard input.
    StandardInput,
    /// A local file.
    File(Utf8PathBuf),
}

impl ValueSource {
    /// Interpret a raw path argument.
    ///
    /// A value of exactly `-`, ignoring surrounding whitespace, selects
    /// standard input; anything else is used as a path unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use chart_values::ValueSource;
    ///
    /// assert_eq!(ValueSource::parse(" - "), ValueSource::StandardInput);
    /// assert_eq!(
    ///     ValueSource::parse("values.yaml"),
    ///     ValueSource::File("values.yaml".into()),
    /// );
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == "-" {
            Self::StandardInput
        } else {
            Self::File(Utf8PathBuf::from(raw))
        }
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StandardInput => f.write_str("-"),
            Self::File(path) => write!(f, "{path}"),
        }
    }
}

/// Reads the full contents of a [`ValueSource`].
pub trait SourceReader {
    /// Read every byte the source holds.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the source cannot be opened or
    /// read.
    fn read_source(&self, source: &ValueSource) -> std::io::Result<Vec<u8>>;
}

/// Reads from the process's standard input and the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdSourceReader;

impl SourceReader for StdSourceReader {
    fn read_source(&self, source: &ValueSource) -> std::io::Result<Vec<u8>> {
        match source {
            ValueSource::StandardInput => {
                let mut buf = Vec::new();
                std::io::stdin().lock().read_to_end(&mut buf)?;
                Ok(buf)
            }
            ValueSource::File(path) => std::fs::read(path),
        }
    }
}
