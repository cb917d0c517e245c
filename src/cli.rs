use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::dataset::{DatasetSource, SubjectId};

/// The hosted belly button biodiversity dataset.
pub const DEFAULT_DATA_URL: &str = "https://2u-data-curriculum-team.s3.amazonaws.com/dataviz-classroom/v1.1/14-Interactive-Web-Visualizations/02-Homework/samples.json";

#[derive(Parser, Debug)]
#[command(author, version, about = "Belly button biodiversity sample dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to log file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the selectable subject ids
    Names(SourceArgs),

    /// Print the metadata fields for one subject
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Subject id to show
        key: SubjectId,
    },

    /// Render the dashboard panels to JSON files
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Subject to render first (defaults to the first entry in names)
        #[arg(short, long)]
        subject: Option<SubjectId>,

        /// Selection-change events to apply after the initial render, in order
        #[arg(long = "select", value_name = "KEY")]
        selections: Vec<SubjectId>,

        /// Output directory for the figure JSON files
        #[arg(short, long, default_value = "dashboard")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// URL of the samples dataset
    #[arg(long, default_value = DEFAULT_DATA_URL, conflicts_with = "file")]
    pub url: String,

    /// Load the dataset from a local JSON file instead
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn to_source(&self) -> DatasetSource {
        match &self.file {
            Some(path) => DatasetSource::File(path.clone()),
            None => DatasetSource::Url(self.url.clone()),
        }
    }
}
