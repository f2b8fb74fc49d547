use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anirec", about = "Anime recommendations from pretrained embeddings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend titles similar to the given one
    Recommend {
        /// Exact catalog title
        title: String,
        /// Number of recommendations (defaults to ANIREC_TOP_K or 10)
        #[arg(long)]
        k: Option<usize>,
    },
    /// List catalog titles
    Titles {
        /// Case-insensitive substring filter
        #[arg(long)]
        contains: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show model statistics
    Info,
    /// Download the model artifact if it is not cached yet
    Fetch,
    /// Convert a JSON artifact into a SQLite artifact
    Pack {
        /// JSON file with `titles` and `embeddings`
        json: PathBuf,
        /// Output SQLite file
        out: PathBuf,
    },
}
