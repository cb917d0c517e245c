mod cli;
mod controller;
mod dataset;
mod panel;
mod select;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::path::PathBuf;

use crate::cli::{Cli, Commands, SourceArgs};
use crate::controller::Dashboard;
use crate::dataset::{Dataset, DatasetLoader, SubjectId};
use crate::panel::JsonPanelHost;
use crate::select::SelectorIndex;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(log_file) = cli.log_file {
        let file = File::create(log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    match cli.command {
        Commands::Names(source) => handle_names(source).await?,
        Commands::Show { source, key } => handle_show(source, key).await?,
        Commands::Render {
            source,
            subject,
            selections,
            output,
        } => handle_render(source, subject, selections, output).await?,
    }

    Ok(())
}

async fn load_dataset(args: &SourceArgs) -> Result<Dataset> {
    let source = args.to_source();
    info!("Loading dataset from {}", source);
    let loader = DatasetLoader::new();
    let dataset = loader
        .load(&source)
        .await
        .context("Failed to load dataset")?;
    Ok(dataset)
}

async fn handle_names(args: SourceArgs) -> Result<()> {
    let dataset = load_dataset(&args).await?;
    for id in &dataset.names {
        println!("{}", id);
    }
    Ok(())
}

async fn handle_show(args: SourceArgs, key: SubjectId) -> Result<()> {
    let dataset = load_dataset(&args).await?;
    let index = SelectorIndex::build(&dataset);
    let profile = index.resolve_profile(&dataset, key)?;

    for (name, value) in profile.field_pairs() {
        println!("{}: {}", name, value);
    }
    Ok(())
}

async fn handle_render(
    args: SourceArgs,
    subject: Option<SubjectId>,
    selections: Vec<SubjectId>,
    output: PathBuf,
) -> Result<()> {
    let dataset = load_dataset(&args).await?;
    let mut dashboard = Dashboard::new(dataset, JsonPanelHost::new());

    let initial = subject
        .or_else(|| dashboard.default_subject())
        .context("Dataset has no selectable subjects")?;
    dashboard.render_initial(initial)?;

    for key in selections {
        // A failed selection keeps the previously rendered panels and is
        // not retried, matching the on-page behavior.
        if let Err(e) = dashboard.update(key) {
            warn!("Skipping selection {}: {}", key, e);
        }
    }

    info!(
        "Rendered {} panels, selection = {}",
        dashboard.host().panel_count(),
        dashboard.current().map(|id| id.to_string()).unwrap_or_default()
    );

    let host = dashboard.into_host();
    host.write_to_dir(&output)?;
    println!("Dashboard written to {}", output.display());
    Ok(())
}
