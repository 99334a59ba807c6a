use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "calmspace", about = "CalmSpace operator tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print version information
    Version,

    /// Check that the environment file carries a Groq API key
    Check {
        /// Environment file to inspect
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,

        /// Template copied into place when the environment file is missing
        #[arg(long, default_value = "env_template.txt")]
        template: PathBuf,
    },

    /// Screen a message offline: crisis level, emotion, suggestions
    Classify {
        message: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Load the retrieval corpora and print their statistics as JSON
    DatasetStats {
        /// Dataset directory (defaults to CALMSPACE_DATASET_DIR or `dataset`)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}
