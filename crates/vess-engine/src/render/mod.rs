//! Dockerfile rendering.
//!
//! A [`Layout`] supplies the package-manager commands for one OS family.
//! [`render_with`] arranges them around the install steps in a fixed order:
//!
//! 1. layout preparation (e.g. refreshing package indexes),
//! 2. build-time packages as one group,
//! 3. every extension install command, in recipe order,
//! 4. runtime packages as one group,
//! 5. removal of the build-time group, if the layout supports it,
//! 6. layout cleanup.
//!
//! Output is a pure function of the recipe and layout.

mod alpine;
mod ubuntu;

pub use alpine::AlpineLayout;
pub use ubuntu::UbuntuLayout;

use vess_common::constants::APP_NAME;
use vess_common::error::{Result, VessError};
use vess_common::types::OsFamily;

use crate::recipe::RecipeData;

/// Indentation of a command inside the `RUN` instruction.
const STEP_INDENT: &str = "    ";

/// Indentation of a package inside a package-manager command.
const PACKAGE_INDENT: &str = "        ";

/// OS-specific package-manager commands.
///
/// Each method returns a shell command, or `None` when the step does not
/// apply to the recipe.
pub trait Layout: Sync {
    /// The OS family this layout renders for.
    fn os(&self) -> OsFamily;

    /// Runs before any package is installed.
    fn prepare(&self, _recipe: &RecipeData) -> Option<String> {
        None
    }

    /// Installs the build-time packages.
    fn install_build_deps(&self, recipe: &RecipeData) -> Option<String>;

    /// Installs the runtime packages.
    fn install_runtime_deps(&self, recipe: &RecipeData) -> Option<String>;

    /// Removes the build-time packages as one unit.
    ///
    /// Layouts whose package manager cannot do this return `None`.
    fn strip_build_deps(&self, _recipe: &RecipeData) -> Option<String> {
        None
    }

    /// Runs last, e.g. to clear caches.
    fn cleanup(&self, _recipe: &RecipeData) -> Option<String> {
        None
    }
}

/// Returns the layout for `os`.
#[must_use]
pub fn layout_for(os: OsFamily) -> &'static dyn Layout {
    match os {
        OsFamily::Alpine => &AlpineLayout,
        OsFamily::Ubuntu => &UbuntuLayout,
    }
}

/// Renders `recipe` with the layout named by `os`.
///
/// # Errors
///
/// Returns `VessError::Contract` if `os` is not a recognized identifier or
/// names a different OS than the recipe was built for.
pub fn render(recipe: &RecipeData, os: &str) -> Result<String> {
    let Some(family) = OsFamily::from_identifier(os) else {
        return Err(VessError::Contract {
            message: format!("no recipe layout for OS: {os}"),
        });
    };
    if family != recipe.os {
        return Err(VessError::Contract {
            message: format!(
                "recipe built for {} cannot be rendered with the {family} layout",
                recipe.os
            ),
        });
    }
    Ok(render_with(layout_for(family), recipe))
}

/// Renders `recipe` with the layout of its own OS.
#[must_use]
pub fn render_recipe(recipe: &RecipeData) -> String {
    render_with(layout_for(recipe.os), recipe)
}

/// Renders `recipe` with an explicit layout.
#[must_use]
pub fn render_with(layout: &dyn Layout, recipe: &RecipeData) -> String {
    let mut steps = Vec::with_capacity(recipe.extensions.len() + 5);
    steps.extend(layout.prepare(recipe));
    steps.extend(layout.install_build_deps(recipe));
    steps.extend(recipe.extensions.iter().map(|s| s.install_cmd.clone()));
    steps.extend(layout.install_runtime_deps(recipe));
    steps.extend(layout.strip_build_deps(recipe));
    steps.extend(layout.cleanup(recipe));

    let mut out = String::new();
    out.push_str(&format!("# Generated by {APP_NAME}. Do not edit by hand.\n"));
    out.push_str(&format!(
        "# PHP {} ({}) on {}\n",
        recipe.php_version,
        recipe.variant,
        layout.os()
    ));
    out.push_str(&format!(
        "# Extensions: {}\n",
        recipe.extension_names().join(", ")
    ));
    out.push_str(&format!("FROM {}\n\n", recipe.base_image));
    out.push_str(&format!("RUN set -eux; \\\n{STEP_INDENT}"));
    out.push_str(&steps.join(&format!("; \\\n{STEP_INDENT}")));
    out.push('\n');

    tracing::debug!(os = %layout.os(), bytes = out.len(), "recipe rendered");
    out
}

/// Formats a package-manager command with one package per line.
fn package_command(command: &str, packages: &[String]) -> String {
    let separator = format!(" \\\n{PACKAGE_INDENT}");
    format!("{command}{separator}{}", packages.join(&separator))
}

#[cfg(test)]
mod tests {
    use vess_catalog::Catalog;
    use vess_common::types::ImageVariant;

    use super::*;
    use crate::validator::RequestedSet;

    fn recipe(os: &str, names: &[&str]) -> RecipeData {
        let catalog = Catalog::builtin().expect("builtin catalog");
        crate::resolve(
            &catalog,
            &RequestedSet::new(os, "8.2", names.iter().copied()),
            ImageVariant::Fpm,
        )
        .expect("resolve")
    }

    #[test]
    fn package_command_puts_one_package_per_line() {
        let cmd = package_command("apk add", &["a".into(), "b".into()]);
        assert_eq!(cmd, "apk add \\\n        a \\\n        b");
    }

    #[test]
    fn render_rejects_unknown_os() {
        let err = render(&recipe("alpine", &["zip"]), "freebsd").expect_err("unknown os");
        assert!(matches!(err, VessError::Contract { .. }));
        assert!(err.to_string().contains("no recipe layout for OS: freebsd"));
    }

    #[test]
    fn render_rejects_mismatched_os() {
        let err = render(&recipe("alpine", &["zip"]), "ubuntu").expect_err("mismatch");
        assert!(err.to_string().contains("recipe built for alpine"));
    }

    #[test]
    fn render_matches_render_recipe() {
        let data = recipe("ubuntu", &["gd", "redis"]);
        assert_eq!(render(&data, "ubuntu").expect("render"), render_recipe(&data));
    }

    #[test]
    fn install_commands_keep_recipe_order_on_every_os() {
        for os in ["alpine", "ubuntu"] {
            let out = render_recipe(&recipe(os, &["zip", "bcmath", "apcu"]));
            let zip = out.find("docker-php-ext-install zip").expect("zip");
            let bcmath = out.find("docker-php-ext-install bcmath").expect("bcmath");
            let apcu = out.find("pecl install apcu").expect("apcu");
            assert!(zip < bcmath && bcmath < apcu, "{os}: {out}");
        }
    }

    #[test]
    fn header_names_extensions_and_base_image() {
        let out = render_recipe(&recipe("ubuntu", &["intl", "opcache"]));
        assert!(out.starts_with("# Generated by vess. Do not edit by hand.\n"));
        assert!(out.contains("# PHP 8.2 (fpm) on ubuntu\n"));
        assert!(out.contains("# Extensions: intl, opcache\n"));
        assert!(out.contains("FROM php:8.2-fpm\n"));
    }
}
