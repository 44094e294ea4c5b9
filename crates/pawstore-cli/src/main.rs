mod attribute;
mod bulk;
mod image;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pawstore_core::{AppConfig, ProductDraft};
use pawstore_variants::{build_payload, generate_variants, validate_draft, MatrixSettings};
use tracing_subscriber::EnvFilter;

use crate::attribute::AttributeCommands;
use crate::bulk::BulkCommands;
use crate::image::ImageCommands;

#[derive(Debug, Parser)]
#[command(name = "pawstore")]
#[command(about = "Edit product variant drafts for the pet store admin")]
struct Cli {
    /// Draft file to operate on (`.json`, otherwise YAML)
    #[arg(long)]
    draft: PathBuf,

    /// Where mutating commands write the draft (defaults to --draft)
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Regenerate variant rows from the attribute definitions
    Generate,
    /// Check the draft and report the first problem
    Validate,
    /// Print the submit payload as JSON
    Payload,
    /// List variant rows with their ids
    List,
    /// Edit attribute definitions
    Attribute {
        #[command(subcommand)]
        command: AttributeCommands,
    },
    /// Edit many variant rows at once
    Bulk {
        #[command(subcommand)]
        command: BulkCommands,
    },
    /// Per-color variant images
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = pawstore_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut draft = pawstore_core::load_draft(&cli.draft)?;
    apply_config_defaults(&mut draft, &config);
    let settings = MatrixSettings::from_app_config(&config);

    let modified = match cli.command {
        Commands::Generate => run_generate(&mut draft, &settings)?,
        Commands::Validate => run_validate(&draft)?,
        Commands::Payload => run_payload(&draft, &settings)?,
        Commands::List => run_list(&draft),
        Commands::Attribute { command } => attribute::run(command, &mut draft, &settings)?,
        Commands::Bulk { command } => bulk::run(command, &mut draft),
        Commands::Image { command } => image::run(command, &mut draft, &settings)?,
    };

    if modified {
        let out = cli.out.as_ref().unwrap_or(&cli.draft);
        pawstore_core::save_draft(out, &draft)?;
        tracing::debug!(path = %out.display(), "draft saved");
    }

    Ok(())
}

/// Fills draft settings left blank with the configured defaults.
fn apply_config_defaults(draft: &mut ProductDraft, config: &AppConfig) {
    if draft.sku_pattern.trim().is_empty() {
        draft.sku_pattern.clone_from(&config.sku_pattern);
    }
}

fn run_generate(draft: &mut ProductDraft, settings: &MatrixSettings) -> anyhow::Result<bool> {
    let summary = generate_variants(draft, settings)?;
    println!(
        "{} variants ({} kept, {} created, {} dropped)",
        summary.total, summary.kept, summary.created, summary.dropped
    );
    Ok(true)
}

fn run_validate(draft: &ProductDraft) -> anyhow::Result<bool> {
    if let Err(err) = validate_draft(draft) {
        anyhow::bail!("{err}");
    }
    println!("ok");
    Ok(false)
}

fn run_payload(draft: &ProductDraft, settings: &MatrixSettings) -> anyhow::Result<bool> {
    let payload = build_payload(draft, &settings.vocabulary)?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(false)
}

fn run_list(draft: &ProductDraft) -> bool {
    if draft.variants.is_empty() {
        println!("no variants; run `generate` first");
        return false;
    }
    for row in &draft.variants {
        let attrs: Vec<String> = row
            .attributes
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        println!(
            "{}  {:<24} price={:<10} stock={:<6} {:<8} {}",
            row.id,
            row.sku,
            row.price,
            row.stock,
            row.status.to_string(),
            attrs.join(", ")
        );
    }
    false
}
