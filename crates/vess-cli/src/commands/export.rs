//! `vess export`: write extension metadata as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use vess_catalog::Catalog;
use vess_catalog::export::{self, ExportSummary};
use vess_common::config::VessConfig;
use vess_common::constants::DEFAULT_EXPORT_FILE;

/// Arguments for the `export` command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Where to write the JSON.
    #[arg(short = 'f', long, default_value = DEFAULT_EXPORT_FILE)]
    pub output: PathBuf,

    /// Export every OS and PHP version instead of the selected pair.
    #[arg(long)]
    pub all: bool,

    /// Print extension counts after exporting.
    #[arg(long)]
    pub summary: bool,
}

/// Executes the `export` command.
///
/// # Errors
///
/// Returns an error if the OS or version is unsupported or the file cannot
/// be written.
pub fn execute(args: ExportArgs, catalog: &Catalog, config: &VessConfig) -> anyhow::Result<()> {
    let (json, summaries) = if args.all {
        let all = export::export_all(catalog);
        let summaries = all
            .data
            .values()
            .flat_map(|per_version| per_version.values())
            .map(|data| {
                let summary = ExportSummary::from_data(data);
                (data.os.to_string(), data.php_version.clone(), summary)
            })
            .collect::<Vec<_>>();
        (export::to_json(&all)?, summaries)
    } else {
        let data = export::export(catalog, &config.os, &config.php_version)?;
        let summary = ExportSummary::from_data(&data);
        (
            export::to_json(&data)?,
            vec![(data.os.to_string(), data.php_version.clone(), summary)],
        )
    };

    std::fs::write(&args.output, json)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    tracing::info!(output = %args.output.display(), all = args.all, "metadata exported");
    println!("Exported extension metadata to {}", args.output.display());

    if args.summary {
        println!();
        println!("{:<8} {:<6} {:>6} {:>6} {:>6}", "OS", "PHP", "TOTAL", "CORE", "PECL");
        for (os, version, summary) in &summaries {
            println!(
                "{:<8} {:<6} {:>6} {:>6} {:>6}",
                os,
                version,
                summary.total_extensions,
                summary.core_extensions,
                summary.pecl_extensions
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_selected_pair() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let out = dir.path().join("extensions.json");
        let args = ExportArgs {
            output: out.clone(),
            all: false,
            summary: true,
        };
        let catalog = Catalog::builtin().expect("catalog");
        execute(args, &catalog, &VessConfig::default()).expect("export");

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).expect("read")).expect("json");
        assert_eq!(json["os"], "alpine");
        assert_eq!(json["php_version"], "8.3");
    }

    #[test]
    fn export_all_keys_by_os_and_version() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let out = dir.path().join("all.json");
        let args = ExportArgs {
            output: out.clone(),
            all: true,
            summary: false,
        };
        let catalog = Catalog::builtin().expect("catalog");
        execute(args, &catalog, &VessConfig::default()).expect("export");

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).expect("read")).expect("json");
        assert!(json["data"]["ubuntu"]["7.4"].is_object());
    }

    #[test]
    fn export_rejects_unknown_os() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let args = ExportArgs {
            output: dir.path().join("x.json"),
            all: false,
            summary: false,
        };
        let config = VessConfig {
            os: "debian".to_owned(),
            ..VessConfig::default()
        };
        let catalog = Catalog::builtin().expect("catalog");
        assert!(execute(args, &catalog, &config).is_err());
    }
}
