//! `vess images`: list or remove images on the Docker engine.

use chrono::{DateTime, Utc};
use clap::Args;
use vess_docker::{DockerClient, ImageSummary};

use crate::output::{format_age, format_bytes};

/// Arguments for the `images` command.
#[derive(Args, Debug)]
pub struct ImagesArgs {
    /// Remove an image by ID or tag.
    #[arg(long)]
    pub remove: Option<String>,

    /// Remove even if containers use the image.
    #[arg(long, requires = "remove")]
    pub force: bool,
}

/// Executes the `images` command.
///
/// # Errors
///
/// Returns an error if the engine is unreachable or refuses the removal.
pub fn execute(args: ImagesArgs) -> anyhow::Result<()> {
    let client = DockerClient::from_env()?;

    if let Some(image) = args.remove {
        for removed in client.remove_image(&image, args.force)? {
            if let Some(tag) = removed.untagged {
                println!("Untagged: {tag}");
            }
            if let Some(id) = removed.deleted {
                println!("Deleted: {id}");
            }
        }
        return Ok(());
    }

    let images = client.list_images()?;
    if images.is_empty() {
        println!("No images found.");
        return Ok(());
    }
    for line in image_table(&images, Utc::now()) {
        println!("{line}");
    }
    Ok(())
}

fn image_table(images: &[ImageSummary], now: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<14} {:<40} {:>10} {:<16}",
        "IMAGE ID", "TAGS", "SIZE", "CREATED"
    )];
    for image in images {
        lines.push(format!(
            "{:<14} {:<40} {:>10} {:<16}",
            image.short_id(),
            image.tags().join(", "),
            format_bytes(image.size),
            format_age(image.created, now)
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_header_and_one_row_per_image() {
        let images = vec![ImageSummary {
            id: "sha256:0123456789abcdef".to_owned(),
            repo_tags: Some(vec!["app:latest".to_owned()]),
            size: 134_217_728,
            created: 0,
        }];
        let now = DateTime::from_timestamp(7_200, 0).expect("valid timestamp");
        let lines = image_table(&images, now);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("IMAGE ID"));
        assert!(lines[1].starts_with("0123456789ab "));
        assert!(lines[1].contains("app:latest"));
        assert!(lines[1].contains("128.0 MiB"));
        assert!(lines[1].contains("2 hours ago"));
    }
}
