//! Global configuration model for a vess invocation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{ImageVariant, OsFamily};

/// Root configuration shared by the CLI commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VessConfig {
    /// Target OS identifier, validated by the resolver.
    pub os: String,
    /// Target PHP version, validated by the resolver.
    pub php_version: String,
    /// Base image flavour.
    pub variant: ImageVariant,
    /// Env file listing the requested extensions.
    pub env_file: PathBuf,
    /// Where the generated recipe is written.
    pub output: PathBuf,
}

impl Default for VessConfig {
    fn default() -> Self {
        Self {
            os: OsFamily::Alpine.as_str().to_owned(),
            php_version: crate::constants::DEFAULT_PHP_VERSION.to_owned(),
            variant: ImageVariant::default(),
            env_file: PathBuf::from(crate::constants::DEFAULT_ENV_FILE),
            output: PathBuf::from(crate::constants::DEFAULT_OUTPUT_FILE),
        }
    }
}
