//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs an error kind with the regions of the input it
//! points at.
//!
//! The same error is shown two ways: as a one-line message (the [`std::fmt::Display`]
//! implementation, used in HTTP responses), and as a full [`ariadne`] report with labelled spans
//! (used by the REPL).

extern crate self as reshi_error;

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// A short, single-line description of the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Moves every span of this error `offset` bytes to the right.
    ///
    /// Used when the erroring text was a slice of a larger input, such as the right-hand side of
    /// an equation.
    pub fn shifted(mut self, offset: usize) -> Self {
        for span in &mut self.spans {
            *span = span.start + offset..span.end + offset;
        }
        self
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }

    /// Renders the full report into a string, including color codes.
    pub fn report_to_string(&self, src_id: &str, input: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(input)), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use reshi_attrs::ErrorKind;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("unknown symbol `{}`", name),
        labels = ["this name is not allowed"],
        help = "only `x`, `pi`, `e`, and the built-in functions can be used",
    )]
    struct UnknownName {
        name: String,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "division by zero", labels = ["", "this evaluates to zero"])]
    struct DivideByZero;

    #[test]
    fn display_uses_message() {
        let err = Error::new(vec![0..1], UnknownName { name: "y".to_string() });
        assert_eq!(err.to_string(), "unknown symbol `y`");
    }

    #[test]
    fn shift_spans() {
        let err = Error::new(vec![0..2, 3..4], DivideByZero).shifted(5);
        assert_eq!(err.spans, vec![5..7, 8..9]);
    }

    #[test]
    fn report_contains_labels() {
        let input = "2 + y";
        let err = Error::new(vec![4..5], UnknownName { name: "y".to_string() });
        let report = err.report_to_string("input", input).unwrap();
        let plain = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();
        assert!(plain.contains("unknown symbol `y`"));
        assert!(plain.contains("this name is not allowed"));
        assert!(plain.contains("only `x`, `pi`, `e`"));
    }
}
