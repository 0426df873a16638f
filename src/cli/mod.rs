//! CLI Module for snipdeck
//!
//! Argument parsing plus the one-shot commands that run the same catalog
//! filter as the browser without opening the TUI.

pub mod commands;

use crate::catalog::Catalog;
use crate::config::{Config, Overrides};
use crate::models::storage::default_data_dir;
use crate::models::{FavoritesStore, FileStore, KeyValueStore, MemoryStore, snippet};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "snipdeck", version, about = "Browse, filter and copy code snippets")]
pub struct Cli {
    /// JSON or YAML dataset to browse instead of the bundled snippets
    #[arg(long, global = true, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Config file (default: <config dir>/snipdeck/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for favorites and the log file
    #[arg(long, global = true, value_name = "PATH")]
    pub storage_dir: Option<PathBuf>,

    /// Show code without syntax colors
    #[arg(long, global = true)]
    pub no_highlight: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open the interactive browser (default)
    Browse,
    /// Print the snippets matching the given filters
    #[command(alias = "ls")]
    List {
        /// Case-insensitive text matched against title, language, tags and code
        #[arg(short, long, default_value = "")]
        query: String,
        /// Exact language name, or "All"
        #[arg(short, long, default_value = crate::models::ALL_LANGUAGES)]
        language: String,
        /// Required tag; repeat to require several
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        /// Only favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// Print the available languages
    Languages,
    /// Print the available tags
    Tags,
    /// Print one snippet with its code
    #[command(alias = "cat")]
    Show {
        /// Snippet id or exact title
        snippet: String,
    },
    /// Star or unstar a snippet
    Fav {
        /// Snippet id
        id: String,
    },
    /// Copy a snippet's code to the clipboard
    Copy {
        /// Snippet id
        id: String,
    },
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            dataset: self.dataset.clone(),
            storage_dir: self.storage_dir.clone(),
            no_highlight: self.no_highlight,
        }
    }
}

/// Loads the configured dataset, or the bundled one.
pub fn load_catalog(config: &Config) -> Result<Catalog> {
    let snippets = snippet::load_dataset(config.dataset.as_deref())?;
    Ok(Catalog::new(snippets))
}

/// Directory holding favorites and logs.
pub fn storage_dir(config: &Config) -> Result<PathBuf> {
    match &config.storage_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_data_dir(),
    }
}

/// Opens the favorites store. Without a usable data directory favorites
/// still work for the session but are not saved.
pub fn open_favorites(config: &Config) -> FavoritesStore {
    let backend: Box<dyn KeyValueStore> = match storage_dir(config).and_then(FileStore::with_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Favorites will not be saved: {:#}", e);
            Box::new(MemoryStore::new())
        }
    };
    FavoritesStore::new(backend)
}
