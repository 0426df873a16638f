use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Bundled catalog used when no dataset file is configured.
const BUNDLED_DATASET: &str = include_str!("../../data/snippets.json");

/// A titled, tagged code sample. Records are read once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub code: String,
}

impl Snippet {
    pub fn new(id: &str, title: &str, language: &str, tags: &[&str], code: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            language: language.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            code: code.to_string(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn get_tags_display_string(&self) -> String {
        self.tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn get_line_count(&self) -> usize {
        self.code.lines().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatasetFormat {
    Json,
    Yaml,
}

impl DatasetFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(DatasetFormat::Json),
            "yaml" | "yml" => Ok(DatasetFormat::Yaml),
            other => bail!(
                "Unsupported dataset format '{}' for {} (expected .json, .yaml or .yml)",
                other,
                path.display()
            ),
        }
    }
}

/// Loads the bundled dataset.
pub fn load_bundled() -> Result<Vec<Snippet>> {
    parse_snippets(BUNDLED_DATASET, DatasetFormat::Json).context("Failed to parse bundled dataset")
}

/// Loads a dataset file, choosing the parser from the file extension.
pub fn load_dataset_file(path: &Path) -> Result<Vec<Snippet>> {
    let format = DatasetFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file {}", path.display()))?;

    parse_snippets(&content, format)
        .with_context(|| format!("Failed to parse dataset file {}", path.display()))
}

/// Loads either the given dataset file or the bundled one.
pub fn load_dataset(path: Option<&Path>) -> Result<Vec<Snippet>> {
    let snippets = match path {
        Some(path) => load_dataset_file(path)?,
        None => load_bundled()?,
    };
    log::info!("Loaded {} snippets", snippets.len());
    Ok(snippets)
}

fn parse_snippets(content: &str, format: DatasetFormat) -> Result<Vec<Snippet>> {
    let snippets: Vec<Snippet> = match format {
        DatasetFormat::Json => serde_json::from_str(content)?,
        DatasetFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(dedupe_by_id(snippets))
}

/// Keeps the first record for each id, in dataset order.
fn dedupe_by_id(snippets: Vec<Snippet>) -> Vec<Snippet> {
    let mut seen = HashSet::new();
    snippets
        .into_iter()
        .filter(|s| {
            let fresh = seen.insert(s.id.clone());
            if !fresh {
                log::warn!("Dropping duplicate snippet id '{}' ({})", s.id, s.title);
            }
            fresh
        })
        .collect()
}
