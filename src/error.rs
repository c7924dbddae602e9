//! Error types for oldwave

use thiserror::Error;

/// Result type alias for oldwave operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for oldwave
///
/// Parse-time errors describe why a container was rejected; the probe chain
/// treats every one of them as "not this format" and only surfaces
/// [`Error::UnrecognizedFormat`] once all candidates have refused. Errors
/// raised after a format has been accepted indicate corruption and are
/// fatal.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong magic, tag, version or id, or a structurally invalid field
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// Compression scheme the decoders cannot handle
    #[error("Unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// Channel layout the decoders cannot handle
    #[error("Unsupported layout: {0}")]
    UnsupportedLayout(String),

    /// Container whose parts contradict each other
    #[error("Inconsistent stream: {0}")]
    InconsistentStream(String),

    /// Source ended in the middle of a structure
    #[error("Truncated data: {0}")]
    Truncated(String),

    /// No registered format recognized the source
    #[error("Unrecognized audio format")]
    UnrecognizedFormat,
}

impl Error {
    /// Create a malformed header error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::MalformedHeader(msg.into())
    }

    /// Create an unsupported codec error
    pub fn unsupported_codec<S: Into<String>>(msg: S) -> Self {
        Error::UnsupportedCodec(msg.into())
    }

    /// Create an unsupported layout error
    pub fn unsupported_layout<S: Into<String>>(msg: S) -> Self {
        Error::UnsupportedLayout(msg.into())
    }

    /// Create an inconsistent stream error
    pub fn inconsistent<S: Into<String>>(msg: S) -> Self {
        Error::InconsistentStream(msg.into())
    }

    /// Create a truncated data error
    pub fn truncated<S: Into<String>>(msg: S) -> Self {
        Error::Truncated(msg.into())
    }

    /// Classify a reader failure while `what` was being read: running out of
    /// bytes is truncation, anything else stays an IO error.
    pub(crate) fn read(what: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::Truncated(what.to_string())
        } else {
            Error::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::malformed("missing RIFF tag");
        assert_eq!(err.to_string(), "Malformed header: missing RIFF tag");

        let err = Error::unsupported_codec("VOC codec 0x01");
        assert!(err.to_string().contains("VOC codec 0x01"));

        assert_eq!(
            Error::UnrecognizedFormat.to_string(),
            "Unrecognized audio format"
        );
    }

    #[test]
    fn test_read_classification() {
        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(Error::read("AUD header", eof), Error::Truncated(_)));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(Error::read("AUD header", denied), Error::Io(_)));
    }
}
