//! Env-file input parsing built on `nom`.
//!
//! An env file is a list of `KEY=VALUE` lines. Blank lines and `#` comments
//! are skipped. The `PHP_EXTENSIONS` key holds a comma-separated list of
//! requested extensions and may appear more than once; every other key is
//! kept as opaque metadata.

use std::collections::BTreeMap;
use std::path::Path;

use nom::{
    IResult, Parser,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::rest,
    sequence::separated_pair,
};
use vess_common::constants::EXTENSIONS_KEY;
use vess_common::error::{Result, VessError};

/// Parsed contents of an env file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Requested extensions in file order, duplicates preserved.
    pub extensions: Vec<String>,
    /// Every other key, last assignment wins.
    pub metadata: BTreeMap<String, String>,
}

/// Splits `KEY=VALUE` on the first `=`.
fn assignment(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_while1(|c: char| c != '='), char('='), rest).parse(input)
}

/// Trims whitespace, then any surrounding quote characters.
fn unquote(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// Splits a comma-separated extension list, dropping empty items.
fn split_extensions(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}

/// Parses env-file text.
///
/// # Errors
///
/// Returns `VessError::Parse` for a line that is not `KEY=VALUE`, and
/// `VessError::Config` if no extensions are requested.
pub fn parse_env_str(input: &str) -> Result<EnvConfig> {
    let mut config = EnvConfig::default();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (_, (key, value)) = assignment(line).map_err(|_| VessError::Parse {
            line: idx + 1,
            message: line.to_owned(),
        })?;
        let key = key.trim();
        let value = unquote(value);

        if key == EXTENSIONS_KEY {
            config.extensions.extend(split_extensions(value));
        } else {
            let _ = config.metadata.insert(key.to_owned(), value.to_owned());
        }
    }

    if config.extensions.is_empty() {
        return Err(VessError::Config {
            message: format!("no extensions specified in {EXTENSIONS_KEY}"),
        });
    }

    tracing::debug!(
        extensions = config.extensions.len(),
        metadata = config.metadata.len(),
        "parsed env input"
    );
    Ok(config)
}

/// Reads and parses an env file.
///
/// # Errors
///
/// Returns `VessError::Io` if the file cannot be read, otherwise any error
/// from [`parse_env_str`].
pub fn parse_env_file(path: &Path) -> Result<EnvConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| VessError::io(path, e))?;
    parse_env_str(&content)
}
