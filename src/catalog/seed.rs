//! Multilingual seed data and its expansion into per-language records.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::{CatalogError, Category, FaqRecord, Language};

/// One FAQ item as it appears in the seed file, with text per language code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedItem {
    /// Informational id from the seed file. Not used as a record id.
    #[serde(default)]
    pub id: Option<String>,
    /// Upper-case category name.
    pub category: String,
    /// Question text keyed by language code.
    pub question: HashMap<String, String>,
    /// Answer text keyed by language code.
    pub answer: HashMap<String, String>,
    /// Keywords shared by every language of this item.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Source of seed items for the one-time catalog bootstrap.
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Load every seed item.
    async fn load_seed(&self) -> Result<Vec<SeedItem>, CatalogError>;
}

/// Seed items read from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonSeedFile {
    path: PathBuf,
}

impl JsonSeedFile {
    /// Create a seed source for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeedSource for JsonSeedFile {
    async fn load_seed(&self) -> Result<Vec<SeedItem>, CatalogError> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| CatalogError::SeedRead {
                    path: self.path.display().to_string(),
                    source,
                })?;
        parse_seed(&contents)
    }
}

/// Seed items held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSeed(pub Vec<SeedItem>);

#[async_trait]
impl SeedSource for StaticSeed {
    async fn load_seed(&self) -> Result<Vec<SeedItem>, CatalogError> {
        Ok(self.0.clone())
    }
}

/// Parse a JSON array of seed items.
///
/// # Errors
///
/// Returns [`CatalogError::SeedFormat`] if the JSON does not match the seed shape.
pub fn parse_seed(json: &str) -> Result<Vec<SeedItem>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Expand seed items into one record per (item, language) pair.
///
/// A language gets a record only when both its question and answer are
/// present. Unsupported language codes are skipped.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidEnum`] if an item names an unknown category.
pub fn expand(items: &[SeedItem]) -> Result<Vec<FaqRecord>, CatalogError> {
    let mut records = Vec::new();
    for item in items {
        let category = Category::parse(item.category.trim())?;
        let keywords: Vec<String> = item
            .keywords
            .iter()
            .flat_map(|k| FaqRecord::split_keywords(k))
            .collect();

        for code in item.question.keys() {
            if Language::from_code(code).is_none() {
                debug!(seed_id = ?item.id, code, "skipping unsupported seed language");
            }
        }

        for language in Language::ALL {
            let question = lookup(&item.question, language);
            let answer = lookup(&item.answer, language);
            match (question, answer) {
                (Some(question), Some(answer)) => records.push(FaqRecord {
                    id: Uuid::new_v4().to_string(),
                    category,
                    language,
                    question: question.to_owned(),
                    answer: answer.to_owned(),
                    keywords: keywords.clone(),
                }),
                (None, None) => {}
                _ => debug!(
                    seed_id = ?item.id,
                    language = language.code(),
                    "seed item has question or answer but not both"
                ),
            }
        }
    }
    Ok(records)
}

fn lookup(texts: &HashMap<String, String>, language: Language) -> Option<&str> {
    texts
        .iter()
        .find(|(code, _)| Language::from_code(code) == Some(language))
        .map(|(_, text)| text.as_str())
        .filter(|text| !text.trim().is_empty())
}
