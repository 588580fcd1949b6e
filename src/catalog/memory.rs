//! In-memory FAQ repository for tests and database-less runs.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CatalogError, Category, FaqRecord, FaqRepository, Language};

/// FAQ repository holding records in a `Vec` in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryFaqRepository {
    records: RwLock<Vec<FaqRecord>>,
}

impl InMemoryFaqRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with records.
    pub fn with_records(records: Vec<FaqRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl FaqRepository for InMemoryFaqRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<FaqRecord>, CatalogError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_category_and_language(
        &self,
        category: Category,
        language: Language,
    ) -> Result<Vec<FaqRecord>, CatalogError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.category == category && r.language == language)
            .cloned()
            .collect())
    }

    async fn count_all(&self) -> Result<u64, CatalogError> {
        let len = self.records.read().await.len();
        Ok(u64::try_from(len).unwrap_or(u64::MAX))
    }

    async fn save_all(&self, records: &[FaqRecord]) -> Result<(), CatalogError> {
        if let Some(bad) = records.iter().find(|r| r.id.contains(':')) {
            return Err(CatalogError::InvalidId(bad.id.clone()));
        }
        let mut stored = self.records.write().await;
        for record in records {
            match stored.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record.clone(),
                None => stored.push(record.clone()),
            }
        }
        Ok(())
    }

    async fn all(&self) -> Result<Vec<FaqRecord>, CatalogError> {
        Ok(self.records.read().await.clone())
    }
}
