// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Custom error types for packet parsing and reference identifier configuration.
//!
//! [`ParseError`] covers malformed request datagrams; it is local and
//! recoverable (the server drops the datagram and keeps serving).
//! [`RefIdError`] is a configuration-time error surfaced from
//! [`ReferenceId::from_str`](crate::protocol::ReferenceId). Both convert to
//! [`std::io::Error`] for callers working in `io::Result`.

use std::fmt;
use std::io;

/// Errors that can occur while parsing or serializing an NTP packet buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The buffer is too short for the expected data.
    BufferTooShort {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BufferTooShort { needed, available } => {
                write!(
                    f,
                    "buffer too short: needed {} bytes, got {}",
                    needed, available
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for io::Error {
    fn from(err: ParseError) -> io::Error {
        io::Error::new(io::ErrorKind::UnexpectedEof, err)
    }
}

/// Error returned when a reference identifier string cannot be parsed.
///
/// Only the dotted-quad form can fail: every segment must be a decimal
/// value in `0..=255`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefIdError {
    /// A dotted-quad segment was non-numeric or out of the `0..=255` range.
    InvalidSegment {
        /// The offending segment, verbatim.
        segment: String,
    },
}

impl fmt::Display for RefIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefIdError::InvalidSegment { segment } => {
                write!(f, "invalid reference id segment: {:?}", segment)
            }
        }
    }
}

impl std::error::Error for RefIdError {}

impl From<RefIdError> for io::Error {
    fn from(err: RefIdError) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_buffer_too_short() {
        let err = ParseError::BufferTooShort {
            needed: 48,
            available: 10,
        };
        assert_eq!(err.to_string(), "buffer too short: needed 48 bytes, got 10");
    }

    #[test]
    fn test_display_invalid_segment() {
        let err = RefIdError::InvalidSegment {
            segment: "999".into(),
        };
        assert_eq!(err.to_string(), "invalid reference id segment: \"999\"");
    }

    #[test]
    fn test_parse_error_into_io_error() {
        let parse_err = ParseError::BufferTooShort {
            needed: 48,
            available: 0,
        };
        let io_err: io::Error = parse_err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_ref_id_error_into_io_error() {
        let err = RefIdError::InvalidSegment {
            segment: "abc".into(),
        };
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }
}
