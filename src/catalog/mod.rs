//! FAQ catalog: records, categories, languages, and the stores behind them.
//!
//! The [`FaqRepository`] trait is the durable side (SQLite or in-memory).
//! At startup [`bootstrap::bootstrap`] seeds an empty repository once, and
//! [`Catalog::load`] takes an immutable snapshot that the search engine and the
//! conversation state machine read without locking.

pub mod bootstrap;
pub mod memory;
pub mod seed;
pub mod sqlite;

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// Supported conversation language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian. The default until a user picks a language.
    #[default]
    Ru,
    /// English.
    En,
}

impl Language {
    /// Every supported language, in picker order.
    pub const ALL: [Language; 2] = [Language::Ru, Language::En];

    /// Returns the two-letter code stored in SQLite and used in callback tokens.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }

    /// Parse a language code, case-insensitively.
    ///
    /// Returns `None` for codes outside the supported set.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ru" => Some(Self::Ru),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Closed set of FAQ topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// University admission process.
    Admission,
    /// Study visas and residence permits.
    Visa,
    /// Accommodation.
    Housing,
    /// Studying at the university itself.
    University,
    /// Grants and scholarships.
    Scholarship,
    /// Paperwork: translations, legalisation, codice fiscale.
    Documents,
    /// Everyday life.
    Life,
}

impl Category {
    /// Every category, in topic-menu order.
    pub const ALL: [Category; 7] = [
        Category::Admission,
        Category::Visa,
        Category::Housing,
        Category::University,
        Category::Scholarship,
        Category::Documents,
        Category::Life,
    ];

    /// Returns the upper-case name used in SQLite, seed files, and callback tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admission => "ADMISSION",
            Self::Visa => "VISA",
            Self::Housing => "HOUSING",
            Self::University => "UNIVERSITY",
            Self::Scholarship => "SCHOLARSHIP",
            Self::Documents => "DOCUMENTS",
            Self::Life => "LIFE",
        }
    }

    /// Parse an upper-case category name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidEnum`] if the name is not a known category.
    pub fn parse(s: &str) -> Result<Self, CatalogError> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidEnum {
                field: "category",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One language-specific question/answer entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    /// Opaque unique identifier. Never contains `:`.
    pub id: String,
    /// Topic the record belongs to.
    pub category: Category,
    /// Language of the question and answer text.
    pub language: Language,
    /// Question text as shown to users.
    pub question: String,
    /// Answer text.
    pub answer: String,
    /// Search keywords, one token per entry.
    pub keywords: Vec<String>,
}

impl FaqRecord {
    /// Keywords joined with commas, the form stored in SQLite.
    pub fn keywords_joined(&self) -> String {
        self.keywords.join(",")
    }

    /// Split a stored comma-joined keyword string back into trimmed tokens.
    pub fn split_keywords(joined: &str) -> Vec<String> {
        joined
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from catalog storage and seed loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Seed file is not valid seed JSON.
    #[error("malformed seed data: {0}")]
    SeedFormat(#[from] serde_json::Error),

    /// An invalid enum value was read from storage or seed data.
    #[error("invalid {field} value: {value:?}")]
    InvalidEnum {
        /// Which field contained the bad value.
        field: &'static str,
        /// The unexpected value.
        value: String,
    },

    /// A record id contains the callback token delimiter.
    #[error("record id {0:?} contains ':'")]
    InvalidId(String),
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Durable store behind the FAQ catalog.
#[async_trait]
pub trait FaqRepository: Send + Sync {
    /// Look up a record by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<FaqRecord>, CatalogError>;

    /// All records of a category in one language, in insertion order.
    async fn find_by_category_and_language(
        &self,
        category: Category,
        language: Language,
    ) -> Result<Vec<FaqRecord>, CatalogError>;

    /// Total number of records across all languages.
    async fn count_all(&self) -> Result<u64, CatalogError>;

    /// Persist a batch of records.
    async fn save_all(&self, records: &[FaqRecord]) -> Result<(), CatalogError>;

    /// Every record, in insertion order.
    async fn all(&self) -> Result<Vec<FaqRecord>, CatalogError>;
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Immutable in-process view of the catalog.
///
/// Built once after bootstrap and shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<FaqRecord>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build a snapshot from records in insertion order.
    ///
    /// A duplicate id keeps its first occurrence for lookups.
    pub fn new(records: Vec<FaqRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            by_id.entry(record.id.clone()).or_insert(idx);
        }
        Self { records, by_id }
    }

    /// Snapshot the full contents of a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub async fn load(repo: &dyn FaqRepository) -> Result<Self, CatalogError> {
        let records = repo.all().await?;
        info!(records = records.len(), "catalog snapshot loaded");
        Ok(Self::new(records))
    }

    /// Look up a record by id.
    pub fn find_by_id(&self, id: &str) -> Option<&FaqRecord> {
        self.by_id.get(id).and_then(|&idx| self.records.get(idx))
    }

    /// Records of a category in one language, in insertion order.
    pub fn find_by_category_and_language(
        &self,
        category: Category,
        language: Language,
    ) -> Vec<&FaqRecord> {
        self.records
            .iter()
            .filter(|r| r.category == category && r.language == language)
            .collect()
    }

    /// Every record, in insertion order.
    pub fn records(&self) -> &[FaqRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the catalog holds no records (degraded mode).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
