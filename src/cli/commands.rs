use crate::catalog::Catalog;
use crate::cli::{Command, load_catalog, open_favorites};
use crate::clipboard::{self, CopyFeedback, SystemClipboard};
use crate::config::Config;
use crate::models::{FavoritesStore, FilterCriteria, Snippet};
use crate::state::{self, Action, BrowserState};
use crate::ui::browser::NO_RESULTS;
use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

/// Result of a one-shot command, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NotFound,
}

pub fn execute(command: Command, config: &Config) -> Result<Outcome> {
    let catalog = load_catalog(config)?;
    let store = open_favorites(config);
    run(command, &catalog, &store)
}

/// Runs a command against an already loaded catalog and store.
pub fn run(command: Command, catalog: &Catalog, store: &FavoritesStore) -> Result<Outcome> {
    match command {
        // Handled by the binary before it gets here.
        Command::Browse => Ok(Outcome::Success),
        Command::List {
            query,
            language,
            tags,
            favorites,
        } => {
            let criteria = FilterCriteria {
                query,
                language,
                active_tags: tags.into_iter().collect(),
                only_favorites: favorites,
            };
            list_snippets(catalog, &criteria, store);
            Ok(Outcome::Success)
        }
        Command::Languages => {
            for language in catalog.languages() {
                println!("{}", language);
            }
            Ok(Outcome::Success)
        }
        Command::Tags => {
            for tag in catalog.tags() {
                println!("{}", tag);
            }
            Ok(Outcome::Success)
        }
        Command::Show { snippet } => match catalog.find_by_id_or_title(&snippet) {
            Some(found) => {
                display_snippet_content(found, store.load().contains(&found.id));
                Ok(Outcome::Success)
            }
            None => Ok(not_found(&snippet)),
        },
        Command::Fav { id } => match catalog.find_by_id(&id) {
            Some(found) => {
                let now_favorite = toggle_favorite(store, &found.id);
                let (mark, verb) = if now_favorite {
                    ("★".bright_red(), "added to")
                } else {
                    ("☆".normal(), "removed from")
                };
                println!(
                    "{}  {} {} {} favorites",
                    "┃".bright_magenta(),
                    mark,
                    found.title.bold(),
                    verb
                );
                Ok(Outcome::Success)
            }
            None => Ok(not_found(&id)),
        },
        Command::Copy { id } => match catalog.find_by_id(&id) {
            Some(found) => {
                let mut sink = SystemClipboard::new();
                let mut feedback = CopyFeedback::new();
                let copied = clipboard::copy_snippet(
                    &mut sink,
                    &mut feedback,
                    &found.id,
                    &found.code,
                    Instant::now(),
                );
                if copied {
                    println!("{}  Copied {}", "┃".bright_magenta(), found.title.bold());
                } else {
                    eprintln!("{}  copy failed", "┃".bright_magenta());
                }
                Ok(Outcome::Success)
            }
            None => Ok(not_found(&id)),
        },
    }
}

/// Flips one favorite through the reducer and persists the result.
pub fn toggle_favorite(store: &FavoritesStore, id: &str) -> bool {
    let current = BrowserState::new(store.load());
    let next = state::update(&current, Action::ToggleFavorite(id.to_string()));
    if current.favorites_changed(&next) {
        store.persist(&next.favorites);
    }
    next.favorites.contains(id)
}

fn list_snippets(catalog: &Catalog, criteria: &FilterCriteria, store: &FavoritesStore) {
    let favorites = store.load();
    let visible = catalog.filter(criteria, &favorites);

    if visible.is_empty() {
        println!("{}  {}", "┃".bright_magenta(), NO_RESULTS.dimmed());
        return;
    }

    for snippet in visible {
        let star = if favorites.contains(&snippet.id) {
            "★".bright_red()
        } else {
            " ".normal()
        };
        println!(
            "{}  {} {:<20} {} {}  {}",
            "┃".bright_magenta(),
            star,
            snippet.id.yellow(),
            snippet.title.bright_white(),
            format!("[{}]", snippet.language).bright_blue(),
            snippet.get_tags_display_string().bright_green()
        );
    }
}

fn display_snippet_content(snippet: &Snippet, favorite: bool) {
    println!(
        "{}  {} {}{}",
        "┃".bright_magenta(),
        "SNIPPET".bright_green().bold(),
        snippet.title.bold(),
        if favorite { " ★" } else { "" }
    );
    println!("{}", "─".repeat(60).bright_magenta());
    println!("{}  {}: {}", "┃".bright_magenta(), "Id".bright_blue(), snippet.id);
    println!(
        "{}  {}: {}",
        "┃".bright_magenta(),
        "Language".bright_yellow(),
        snippet.language
    );
    if !snippet.tags.is_empty() {
        println!(
            "{}  {}: {}",
            "┃".bright_magenta(),
            "Tags".bright_green(),
            snippet.get_tags_display_string()
        );
    }
    println!("{}", "─".repeat(60).bright_magenta());
    println!("{}", snippet.code.trim_end());
}

fn not_found(needle: &str) -> Outcome {
    eprintln!(
        "{}  No snippet found with id or title: {}",
        "┃".bright_magenta(),
        needle
    );
    Outcome::NotFound
}
