//! Error and warning types for source scanning.
//!
//! Nothing here is fatal for a generation pass: a failed document or marker
//! only means some members are generated that a human meant to suppress.

use crate::marker::SourceLocation;
use thiserror::Error;

/// Error type for scanning one document or one marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The document is not valid Rust.
    #[error("syntax error at {location}: {message}")]
    Syntax {
        /// Where parsing failed.
        location: SourceLocation,
        /// Parser message.
        message: String,
    },

    /// A marker attribute has the wrong arguments.
    #[error("invalid marker '{marker}' at {location}: {message}")]
    InvalidMarker {
        /// Where the marker is.
        location: SourceLocation,
        /// Attribute name.
        marker: String,
        /// What is wrong with it.
        message: String,
    },
}

impl ScanError {
    /// Creates an invalid marker error.
    pub fn invalid_marker(
        location: SourceLocation,
        marker: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidMarker {
            location,
            marker: marker.into(),
            message: message.into(),
        }
    }

    /// Returns where the error occurred.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        match self {
            Self::Syntax { location, .. } | Self::InvalidMarker { location, .. } => location,
        }
    }
}

/// Non-fatal scan diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanWarning {
    /// The whole document was excluded from the marker index.
    #[error("document '{}' skipped: {error}", .error.location().document)]
    DocumentSkipped {
        /// Cause.
        error: ScanError,
    },

    /// One marker was ignored.
    #[error("marker ignored: {error}")]
    MarkerSkipped {
        /// Cause.
        error: ScanError,
    },

    /// A member marker on a type the schema does not know.
    #[error("marker at {location} targets unknown model type '{name}'")]
    UnknownType {
        /// Where the marker is.
        location: SourceLocation,
        /// Declared type name or alias.
        name: String,
    },

    /// A member marker outside any `impl` or `struct`.
    #[error("member marker '{marker}' at {location} is not inside an impl block or struct")]
    MisplacedMarker {
        /// Where the marker is.
        location: SourceLocation,
        /// Attribute name.
        marker: String,
    },
}

impl ScanWarning {
    /// Returns where the warning applies.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        match self {
            Self::DocumentSkipped { error } | Self::MarkerSkipped { error } => error.location(),
            Self::UnknownType { location, .. } | Self::MisplacedMarker { location, .. } => location,
        }
    }
}
