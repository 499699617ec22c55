//! Domain primitive types used across the vess workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VessError;

/// Target operating-system family of the generated image.
///
/// Each family owns one per-OS sub-catalog and one recipe layout rule.
/// Adding a family means adding a variant here plus that pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    /// musl-based lightweight distribution (`apk`).
    Alpine,
    /// glibc-based general distribution (`apt`).
    Ubuntu,
}

impl OsFamily {
    /// Every recognized family, in identifier order.
    pub const ALL: [Self; 2] = [Self::Alpine, Self::Ubuntu];

    /// Returns the lowercase identifier (`alpine`, `ubuntu`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alpine => "alpine",
            Self::Ubuntu => "ubuntu",
        }
    }

    /// Looks up a family by its exact identifier.
    #[must_use]
    pub fn from_identifier(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|os| os.as_str() == id)
    }

    /// Comma-separated list of recognized identifiers, for messages.
    #[must_use]
    pub fn identifiers() -> String {
        Self::ALL
            .iter()
            .map(|os| os.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsFamily {
    type Err = VessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_identifier(s).ok_or_else(|| VessError::Config {
            message: format!(
                "unsupported OS: {s} (must be one of: {})",
                Self::identifiers()
            ),
        })
    }
}

/// Flavour of the official PHP base image.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageVariant {
    /// Command-line interpreter only.
    Cli,
    /// PHP-FPM process manager.
    #[default]
    Fpm,
    /// Apache httpd with `mod_php`.
    Apache,
}

impl ImageVariant {
    /// Every variant.
    pub const ALL: [Self; 3] = [Self::Cli, Self::Fpm, Self::Apache];

    /// Returns the tag component used in base-image names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Fpm => "fpm",
            Self::Apache => "apache",
        }
    }

    /// Whether an official base image of this variant exists for `os`.
    #[must_use]
    pub const fn available_on(self, os: OsFamily) -> bool {
        !matches!((self, os), (Self::Apache, OsFamily::Alpine))
    }
}

impl fmt::Display for ImageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageVariant {
    type Err = VessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| VessError::Config {
                message: format!("unsupported image type: {s} (must be one of: cli, fpm, apache)"),
            })
    }
}
