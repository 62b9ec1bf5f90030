use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "prospect", version, about)]
pub struct Cli {
    /// Directory for the local store (default: `PROSPECT_DATA_DIR`, else the
    /// platform data dir).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search GitHub users and repositories.
    Search {
        query: String,

        /// Search criterion: username, location, language, or profession.
        #[arg(long, default_value = "profession")]
        by: String,

        /// 1-based results page.
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show a user's profile, repositories, and language breakdown.
    User { login: String },

    /// List known languages from the local cache.
    Languages {
        /// Clear the cache; the next listing re-fetches the manifest.
        #[arg(long)]
        reset: bool,

        /// Re-fetch the manifest and refresh cached entries.
        #[arg(long, conflicts_with = "reset")]
        update: bool,
    },

    /// Manage professions (named skill bundles).
    Profession {
        #[command(subcommand)]
        action: ProfessionAction,
    },
}

#[derive(Subcommand)]
pub enum ProfessionAction {
    /// Add or replace a profession.
    Add {
        name: String,

        /// Comma-delimited skill keywords, e.g. "python, django, postgres".
        #[arg(long)]
        skills: String,
    },

    /// List stored professions.
    List,
}
