//! Free-text FAQ search.
//!
//! A plain recall filter: a record matches when the lowercase query occurs in
//! its question or in one of its keywords. No ranking; results keep catalog
//! order and disambiguation is left to the conversation layer.

use std::sync::Arc;

use serde::Deserialize;

use crate::catalog::{Catalog, FaqRecord, Language};

/// How the query is compared against keyword tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordMatch {
    /// Query is a substring of at least one keyword token.
    #[default]
    Substring,
    /// Query equals one keyword token.
    Token,
}

/// Search engine over an immutable catalog snapshot.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    keyword_match: KeywordMatch,
}

impl SearchEngine {
    /// Create a search engine.
    pub fn new(catalog: Arc<Catalog>, keyword_match: KeywordMatch) -> Self {
        Self {
            catalog,
            keyword_match,
        }
    }

    /// Catalog this engine searches.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Return every record in `language` matching `query`, in catalog order.
    ///
    /// An empty query matches every record of the language.
    pub fn search(&self, query: &str, language: Language) -> Vec<&FaqRecord> {
        let needle = query.to_lowercase();
        self.catalog
            .records()
            .iter()
            .filter(|r| r.language == language)
            .filter(|r| self.matches(r, &needle))
            .collect()
    }

    fn matches(&self, record: &FaqRecord, needle: &str) -> bool {
        if record.question.to_lowercase().contains(needle) {
            return true;
        }
        match self.keyword_match {
            KeywordMatch::Substring => record
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(needle)),
            KeywordMatch::Token => {
                let needle = needle.trim();
                record.keywords.iter().any(|k| k.to_lowercase() == needle)
            }
        }
    }
}
