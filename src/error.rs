//! Error types surfaced by the report renderer.

use std::fmt;
use std::io;
use std::path::PathBuf;

// Display prints only the message of each level; the cause is reachable through `source()`.

/// Errors raised while turning the content model into PDF bytes.
#[derive(Debug)]
pub enum PdfBuildError {
    /// No usable font family could be loaded.
    FontLoad(genpdf::error::Error),
    /// The layout engine failed to place or encode the document.
    Layout(genpdf::error::Error),
}

impl fmt::Display for PdfBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontLoad(_) => f.write_str("Failed to load fonts"),
            Self::Layout(_) => f.write_str("Failed to lay out the PDF document"),
        }
    }
}

impl std::error::Error for PdfBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FontLoad(err) | Self::Layout(err) => Some(err),
        }
    }
}

/// Errors returned by [`crate::render`] and friends.
#[derive(Debug)]
pub enum ReportError {
    /// The input text is not a JSON object.
    MalformedInput(serde_json::Error),
    /// The document could not be produced.
    Build(PdfBuildError),
    /// The rendered document could not be written to its destination.
    Io {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err)
    }
}

impl From<PdfBuildError> for ReportError {
    fn from(err: PdfBuildError) -> Self {
        Self::Build(err)
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput(_) => f.write_str("Malformed analysis report JSON"),
            Self::Build(_) => f.write_str("Failed to build PDF"),
            Self::Io { path, .. } => write!(f, "Failed to write report to {}", path.display()),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedInput(err) => Some(err),
            Self::Build(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn chain(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
        let mut messages = vec![err.to_string()];
        let mut current = err;
        while let Some(source) = current.source() {
            messages.push(source.to_string());
            current = source;
        }
        messages
    }

    fn font_error() -> ReportError {
        let cause = genpdf::error::Error::new(
            "Unable to locate a usable font family",
            io::Error::new(io::ErrorKind::NotFound, "no font family found"),
        );
        ReportError::from(PdfBuildError::FontLoad(cause))
    }

    #[test]
    fn build_errors_do_not_repeat_their_cause() {
        let messages = chain(&font_error());
        assert_eq!(messages[0], "Failed to build PDF");
        assert_eq!(messages[1], "Failed to load fonts");
        let font_lines = messages
            .iter()
            .filter(|message| message.contains("Unable to locate a usable font family"))
            .count();
        assert_eq!(font_lines, 1, "{messages:?}");
    }

    #[test]
    fn io_errors_name_the_destination_once() {
        let err = ReportError::io(
            "/tmp/out.pdf",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write report to /tmp/out.pdf");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("denied"));
    }

    #[test]
    fn malformed_input_keeps_the_parser_message_in_the_source() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = parse_error.to_string();
        let messages = chain(&ReportError::from(parse_error));
        assert_eq!(messages, ["Malformed analysis report JSON".to_owned(), expected]);
    }
}
