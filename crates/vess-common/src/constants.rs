//! System-wide constants and defaults.

/// PHP runtime versions recognized by the resolver, oldest first.
///
/// Versions are discrete identifiers; no range or wildcard matching is done.
pub const SUPPORTED_PHP_VERSIONS: [&str; 5] = ["7.4", "8.0", "8.1", "8.2", "8.3"];

/// PHP version used when none is given.
pub const DEFAULT_PHP_VERSION: &str = "8.3";

/// Env-file key whose value lists the requested extensions.
pub const EXTENSIONS_KEY: &str = "PHP_EXTENSIONS";

/// Default env file read by `vess generate`.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Default path of the generated build recipe.
pub const DEFAULT_OUTPUT_FILE: &str = "Dockerfile";

/// Default path of the exported extension metadata.
pub const DEFAULT_EXPORT_FILE: &str = "extensions.json";

/// Name of the recipe entry inside a build context archive.
pub const CONTEXT_DOCKERFILE_NAME: &str = "Dockerfile";

/// Environment variable pointing at the Docker Engine API.
pub const DOCKER_HOST_ENV: &str = "DOCKER_HOST";

/// Docker Engine endpoint used when `DOCKER_HOST` is unset: the local socket.
pub const DEFAULT_DOCKER_HOST: &str = "unix:///var/run/docker.sock";

/// Application name used in CLI output and generated headers.
pub const APP_NAME: &str = "vess";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "vess";

/// Returns whether `version` is one of [`SUPPORTED_PHP_VERSIONS`].
#[must_use]
pub fn is_supported_php_version(version: &str) -> bool {
    SUPPORTED_PHP_VERSIONS.contains(&version)
}
