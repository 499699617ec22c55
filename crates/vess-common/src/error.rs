//! Unified error types for the vess workspace.
//!
//! [`VessError`] is the top-level error. Request-level compatibility failures
//! are modelled separately as [`ValidationError`] so callers can inspect the
//! offending extension and a stable [`ReasonCode`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum VessError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The declarative input file is malformed.
    #[error("invalid syntax at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// The requested extension set was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The static extension catalog violates an authoring invariant.
    #[error("invalid extension catalog: {message}")]
    Catalog {
        /// Description of the violated invariant.
        message: String,
    },

    /// An upstream stage handed on data that breaks its guarantees.
    #[error("internal contract violation: {message}")]
    Contract {
        /// Description of the broken guarantee.
        message: String,
    },

    /// Communication with the Docker Engine failed.
    #[error("docker error: {message}")]
    Docker {
        /// Description of the failure.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl VessError {
    /// Builds a [`VessError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, VessError>;

/// Stable, machine-readable classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    /// The request named no extensions.
    NoExtensions,
    /// The OS identifier is not recognized.
    UnsupportedOs,
    /// The PHP version is not recognized.
    UnsupportedVersion,
    /// An extension name is not in the catalog.
    UnknownExtension,
    /// An extension does not support the requested PHP version.
    ExtensionVersion,
    /// An extension has no installation data for the requested OS.
    ExtensionOs,
    /// Two requested extensions conflict.
    Conflict,
}

impl ReasonCode {
    /// Returns the snake-case code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoExtensions => "no_extensions",
            Self::UnsupportedOs => "unsupported_os",
            Self::UnsupportedVersion => "unsupported_version",
            Self::UnknownExtension => "unknown_extension",
            Self::ExtensionVersion => "extension_version",
            Self::ExtensionOs => "extension_os",
            Self::Conflict => "conflict",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection of a requested extension set.
///
/// Validation stops at the first violation, so one error describes exactly
/// one problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The request named no extensions.
    #[error("no extensions specified")]
    NoExtensions,

    /// The OS identifier is not recognized.
    #[error("unsupported OS: {os} (must be one of: {supported})")]
    UnsupportedOs {
        /// Identifier as given.
        os: String,
        /// Recognized identifiers, comma-separated.
        supported: String,
    },

    /// The PHP version is not recognized.
    #[error("unsupported PHP version: {version} (must be one of: {supported})")]
    UnsupportedVersion {
        /// Version as given.
        version: String,
        /// Recognized versions, comma-separated.
        supported: String,
    },

    /// An extension name is not in the catalog.
    #[error("unknown extension: {extension}")]
    UnknownExtension {
        /// The unknown name.
        extension: String,
    },

    /// An extension does not support the requested PHP version.
    #[error("extension '{extension}' does not support PHP {version} (supported: {supported})")]
    ExtensionVersion {
        /// Offending extension.
        extension: String,
        /// Requested version.
        version: String,
        /// Versions the extension declares, comma-separated.
        supported: String,
    },

    /// An extension has no installation data for the requested OS.
    #[error("extension '{extension}' does not support OS: {os}")]
    ExtensionOs {
        /// Offending extension.
        extension: String,
        /// Requested OS identifier.
        os: String,
    },

    /// Two requested extensions conflict.
    #[error("extension '{extension}' conflicts with '{conflicts_with}'")]
    Conflict {
        /// Extension declaring the conflict.
        extension: String,
        /// The other requested extension.
        conflicts_with: String,
    },
}

impl ValidationError {
    /// Returns the reason code for this failure.
    #[must_use]
    pub const fn code(&self) -> ReasonCode {
        match self {
            Self::NoExtensions => ReasonCode::NoExtensions,
            Self::UnsupportedOs { .. } => ReasonCode::UnsupportedOs,
            Self::UnsupportedVersion { .. } => ReasonCode::UnsupportedVersion,
            Self::UnknownExtension { .. } => ReasonCode::UnknownExtension,
            Self::ExtensionVersion { .. } => ReasonCode::ExtensionVersion,
            Self::ExtensionOs { .. } => ReasonCode::ExtensionOs,
            Self::Conflict { .. } => ReasonCode::Conflict,
        }
    }

    /// Returns the offending extensions, if the failure concerns any.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        match self {
            Self::NoExtensions | Self::UnsupportedOs { .. } | Self::UnsupportedVersion { .. } => {
                Vec::new()
            }
            Self::UnknownExtension { extension }
            | Self::ExtensionVersion { extension, .. }
            | Self::ExtensionOs { extension, .. } => vec![extension.as_str()],
            Self::Conflict {
                extension,
                conflicts_with,
            } => vec![extension.as_str(), conflicts_with.as_str()],
        }
    }
}
