//! Error types for the feed decoder and writer.

use thiserror::Error;

/// Feed decoding and framing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Byte source ended in the middle of a record
    #[error("truncated stream: need {needed} more bytes")]
    TruncatedStream {
        /// Number of bytes still required
        needed: usize,
    },

    /// Message tag with no known decoder
    #[error("unknown message type: 0x{0:02x}")]
    UnknownType(u8),

    /// Frame length disagrees with the tag's fixed length
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length the tag table requires
        expected: usize,
        /// Length observed on the wire
        actual: usize,
    },

    /// Malformed message body
    #[error("parse error: {0}")]
    Parse(String),

    /// Underlying byte source failure
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::Io(err.to_string())
    }
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for FeedError {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(needed) => FeedError::TruncatedStream {
                needed: match needed {
                    nom::Needed::Unknown => 1,
                    nom::Needed::Size(n) => n.get(),
                },
            },
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                FeedError::Parse(format!("{} bytes from end", e.input.len()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedError::LengthMismatch {
            expected: 36,
            actual: 12,
        };
        assert_eq!(err.to_string(), "length mismatch: expected 36, got 12");

        let err = FeedError::UnknownType(b'z');
        assert_eq!(err.to_string(), "unknown message type: 0x7a");
    }
}
