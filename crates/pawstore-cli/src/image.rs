//! `image` sub-commands: one image per color, applied to every variant of
//! that color.

use std::path::PathBuf;

use clap::Subcommand;
use pawstore_core::{ProductDraft, VariantImage};
use pawstore_variants::images::{color_values, find_color_attribute};
use pawstore_variants::{assign_color_image, clear_color_image, MatrixSettings};

#[derive(Debug, Subcommand)]
pub enum ImageCommands {
    /// List the colors that take an image
    Colors,
    /// Attach an image to every variant of a color
    Assign {
        color: String,
        /// Already hosted image
        #[arg(long, conflicts_with = "path", required_unless_present = "path")]
        url: Option<String>,
        /// Local file still to be uploaded
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Remove the image from every variant of a color
    Clear { color: String },
}

pub(crate) fn run(
    command: ImageCommands,
    draft: &mut ProductDraft,
    settings: &MatrixSettings,
) -> anyhow::Result<bool> {
    match command {
        ImageCommands::Colors => {
            let Some(attr) = find_color_attribute(&draft.attributes, &settings.vocabulary) else {
                println!("no color attribute; per-color images are unavailable");
                return Ok(false);
            };
            for value in color_values(attr) {
                println!("{value}");
            }
            Ok(false)
        }
        ImageCommands::Assign { color, url, path } => {
            let image = match (url, path) {
                (Some(url), _) => VariantImage::Remote { url },
                (None, Some(path)) => VariantImage::Local { path },
                (None, None) => anyhow::bail!("either --url or --path is required"),
            };
            let rows = assign_color_image(draft, &settings.vocabulary, &color, &image)?;
            println!("image set on {rows} variants");
            Ok(rows > 0)
        }
        ImageCommands::Clear { color } => {
            let rows = clear_color_image(draft, &settings.vocabulary, &color)?;
            println!("image cleared on {rows} variants");
            Ok(rows > 0)
        }
    }
}
