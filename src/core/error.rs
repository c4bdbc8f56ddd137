// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for rosproto.
//!
//! Provides error types for wire codec and generator operations:
//! - Malformed wire data (varint overrun, length underrun, bad wire types)
//! - Buffer exhaustion and read under-run
//! - Type registry lookups
//! - Message population protocol violations
//! - Code generation

use std::fmt;

/// Errors that can occur during codec or generator operations.
#[derive(Debug, Clone)]
pub enum CodecError {
    /// Malformed wire data or schema input
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Buffer too short for requested read
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        position: usize,
    },

    /// Fixed-capacity buffer has insufficient space to accept a write
    BufferExhausted {
        /// Bytes the write needed
        needed: usize,
        /// Total buffer capacity
        capacity: usize,
    },

    /// Type not found in the multiplexer registry
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Parse called on a message that was already populated
    AlreadyPopulated {
        /// Message type name
        message_name: String,
    },

    /// Unsupported type or feature (e.g. proto group wire types)
    Unsupported {
        /// What is not supported
        feature: String,
    },

    /// Encoding/packaging error with codec context
    EncodeError {
        /// Codec context (e.g. "proto", "ros", "zip")
        codec: String,
        /// Error message
        message: String,
    },

    /// Invariant violation (e.g. multiplexer vtable dispatched to the wrong type)
    InvariantViolation {
        /// Description of the invariant that was violated
        invariant: String,
    },

    /// Other error
    Other(String),
}

impl CodecError {
    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, position: usize) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            position,
        }
    }

    /// Create a buffer exhausted error.
    pub fn buffer_exhausted(needed: usize, capacity: usize) -> Self {
        CodecError::BufferExhausted { needed, capacity }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        CodecError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create an "already populated" error.
    pub fn already_populated(message_name: impl Into<String>) -> Self {
        CodecError::AlreadyPopulated {
            message_name: message_name.into(),
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        CodecError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::EncodeError {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create an invariant violation error.
    pub fn invariant_violation(invariant: impl Into<String>) -> Self {
        CodecError::InvariantViolation {
            invariant: invariant.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::BufferTooShort {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::BufferExhausted { needed, capacity } => vec![
                ("needed", needed.to_string()),
                ("capacity", capacity.to_string()),
            ],
            CodecError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            CodecError::AlreadyPopulated { message_name } => {
                vec![("message", message_name.clone())]
            }
            CodecError::Unsupported { feature } => vec![("feature", feature.clone())],
            CodecError::EncodeError { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
            CodecError::InvariantViolation { invariant } => {
                vec![("invariant", invariant.clone())]
            }
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            CodecError::BufferTooShort {
                requested,
                available,
                position,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {position}, but only {available} bytes available"
            ),
            CodecError::BufferExhausted { needed, capacity } => {
                write!(f, "No space in buffer: capacity {capacity}, need {needed}")
            }
            CodecError::TypeNotFound { type_name } => {
                write!(f, "Type not found: '{type_name}'")
            }
            CodecError::AlreadyPopulated { message_name } => {
                write!(f, "Message '{message_name}' has already been parsed")
            }
            CodecError::Unsupported { feature } => {
                write!(f, "Unsupported feature: '{feature}'")
            }
            CodecError::EncodeError { codec, message } => {
                write!(f, "{codec} encode error: {message}")
            }
            CodecError::InvariantViolation { invariant } => {
                write!(f, "Invariant violation: {invariant}")
            }
            CodecError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::EncodeError {
            codec: "IO".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for rosproto operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err = CodecError::parse("varint", "overran 10 byte limit");
        assert!(matches!(err, CodecError::ParseError { .. }));
        assert_eq!(
            err.to_string(),
            "Parse error in varint: overran 10 byte limit"
        );
    }

    #[test]
    fn test_buffer_too_short_error() {
        let err = CodecError::buffer_too_short(100, 50, 10);
        assert!(matches!(err, CodecError::BufferTooShort { .. }));
        assert_eq!(
            err.to_string(),
            "Buffer too short: requested 100 bytes at position 10, but only 50 bytes available"
        );
    }

    #[test]
    fn test_buffer_exhausted_error() {
        let err = CodecError::buffer_exhausted(32, 16);
        assert!(matches!(err, CodecError::BufferExhausted { .. }));
        assert_eq!(err.to_string(), "No space in buffer: capacity 16, need 32");
    }

    #[test]
    fn test_type_not_found_error() {
        let err = CodecError::type_not_found("foo.bar.Missing");
        assert!(matches!(err, CodecError::TypeNotFound { .. }));
        assert_eq!(err.to_string(), "Type not found: 'foo.bar.Missing'");
    }

    #[test]
    fn test_already_populated_error() {
        let err = CodecError::already_populated("TestMessage");
        assert!(matches!(err, CodecError::AlreadyPopulated { .. }));
        assert_eq!(
            err.to_string(),
            "Message 'TestMessage' has already been parsed"
        );
    }

    #[test]
    fn test_unsupported_error() {
        let err = CodecError::unsupported("proto groups");
        assert!(matches!(err, CodecError::Unsupported { .. }));
        assert_eq!(err.to_string(), "Unsupported feature: 'proto groups'");
    }

    #[test]
    fn test_encode_error() {
        let err = CodecError::encode("zip", "archive finalization failed");
        assert!(matches!(err, CodecError::EncodeError { .. }));
        assert_eq!(
            err.to_string(),
            "zip encode error: archive finalization failed"
        );
    }

    #[test]
    fn test_invariant_violation_error() {
        let err = CodecError::invariant_violation("vtable type mismatch");
        assert_eq!(err.to_string(), "Invariant violation: vtable type mismatch");
    }

    #[test]
    fn test_log_fields_buffer_too_short() {
        let err = CodecError::buffer_too_short(8, 3, 12);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("requested", "8".to_string()));
        assert_eq!(fields[1], ("available", "3".to_string()));
        assert_eq!(fields[2], ("position", "12".to_string()));
    }

    #[test]
    fn test_log_fields_type_not_found() {
        let err = CodecError::type_not_found("MyType");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0], ("type", "MyType".to_string()));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let codec_err: CodecError = io_err.into();
        assert!(matches!(codec_err, CodecError::EncodeError { .. }));
        assert_eq!(codec_err.to_string(), "IO encode error: file not found");
    }

    #[test]
    fn test_error_clone() {
        let err1 = CodecError::parse("tag", "bad wire type");
        let err2 = err1.clone();
        assert_eq!(err1.to_string(), err2.to_string());
    }
}
