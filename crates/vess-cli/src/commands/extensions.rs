//! `vess extensions`: list extensions for the target OS and PHP version.

use clap::Args;
use vess_catalog::Catalog;
use vess_catalog::export::{self, ExportData};
use vess_common::config::VessConfig;

/// Arguments for the `extensions` command.
#[derive(Args, Debug)]
pub struct ExtensionsArgs {
    /// Only list PECL extensions.
    #[arg(long)]
    pub pecl: bool,
}

/// Executes the `extensions` command.
///
/// # Errors
///
/// Returns an error if the OS or PHP version is unsupported.
pub fn execute(
    args: &ExtensionsArgs,
    catalog: &Catalog,
    config: &VessConfig,
) -> anyhow::Result<()> {
    let data = export::export(catalog, &config.os, &config.php_version)?;
    println!("Extensions for PHP {} on {}:", data.php_version, data.os);
    println!();
    for line in extension_table(&data, args.pecl) {
        println!("{line}");
    }
    Ok(())
}

fn extension_table(data: &ExportData, pecl_only: bool) -> Vec<String> {
    let mut lines = vec![format!("{:<12} {:<6} {}", "NAME", "SOURCE", "DESCRIPTION")];
    for ext in data.extensions.iter().filter(|e| !pecl_only || e.pecl_install) {
        let source = if ext.pecl_install { "pecl" } else { "core" };
        lines.push(format!("{:<12} {:<6} {}", ext.name, source, ext.description));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(os: &str, version: &str) -> ExportData {
        let catalog = Catalog::builtin().expect("catalog");
        export::export(&catalog, os, version).expect("export")
    }

    #[test]
    fn table_lists_core_and_pecl() {
        let lines = extension_table(&data("alpine", "8.3"), false);
        assert!(lines.iter().any(|l| l.starts_with("redis ") && l.contains("pecl")));
        assert!(lines.iter().any(|l| l.starts_with("gd ") && l.contains("core")));
    }

    #[test]
    fn pecl_filter_drops_core_extensions() {
        let lines = extension_table(&data("ubuntu", "8.2"), true);
        assert!(lines.iter().skip(1).all(|l| l.contains(" pecl ")));
    }

    #[test]
    fn old_versions_list_xmlrpc() {
        let lines = extension_table(&data("ubuntu", "7.4"), false);
        assert!(lines.iter().any(|l| l.starts_with("xmlrpc ")));
    }
}
