//! SQLite-backed FAQ repository.
//!
//! Keywords are stored comma-joined in a single TEXT column and split back
//! into tokens on read. The `seq` column keeps insertion order.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::{CatalogError, Category, FaqRecord, FaqRepository, Language};

/// Schema applied by [`SqliteFaqRepository::migrate`].
const SCHEMA: &str = include_str!("../../migrations/001_faq.sql");

type FaqRow = (String, String, String, String, String, String);

/// FAQ repository over a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteFaqRepository {
    db: SqlitePool,
}

impl SqliteFaqRepository {
    /// Wrap an existing pool. The schema must already be applied.
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Open (creating if missing) the database file and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn open(path: &Path) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await?;
        let repo = Self::new(pool);
        repo.migrate().await?;
        info!(path = %path.display(), "faq database opened");
        Ok(repo)
    }

    /// Apply the catalog schema. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub async fn migrate(&self) -> Result<(), CatalogError> {
        sqlx::raw_sql(SCHEMA).execute(&self.db).await?;
        Ok(())
    }
}

fn row_to_record(row: FaqRow) -> Result<FaqRecord, CatalogError> {
    let (id, category, lang, question, answer, keywords) = row;
    let category = Category::parse(&category)?;
    let language = Language::from_code(&lang).ok_or(CatalogError::InvalidEnum {
        field: "lang",
        value: lang,
    })?;
    Ok(FaqRecord {
        id,
        category,
        language,
        question,
        answer,
        keywords: FaqRecord::split_keywords(&keywords),
    })
}

#[async_trait]
impl FaqRepository for SqliteFaqRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<FaqRecord>, CatalogError> {
        let row: Option<FaqRow> = sqlx::query_as(
            "SELECT id, category, lang, question, answer, keywords \
             FROM faq_items WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        row.map(row_to_record).transpose()
    }

    async fn find_by_category_and_language(
        &self,
        category: Category,
        language: Language,
    ) -> Result<Vec<FaqRecord>, CatalogError> {
        let rows: Vec<FaqRow> = sqlx::query_as(
            "SELECT id, category, lang, question, answer, keywords \
             FROM faq_items \
             WHERE category = ?1 AND lang = ?2 \
             ORDER BY seq ASC",
        )
        .bind(category.as_str())
        .bind(language.code())
        .fetch_all(&self.db)
        .await?;
        rows.into_iter().map(row_to_record).collect()
    }

    async fn count_all(&self) -> Result<u64, CatalogError> {
        let row: (i64,) = sqlx::query_as("SELECT count(*) FROM faq_items")
            .fetch_one(&self.db)
            .await?;
        // count(*) is never negative.
        Ok(u64::try_from(row.0).unwrap_or(0))
    }

    async fn save_all(&self, records: &[FaqRecord]) -> Result<(), CatalogError> {
        if let Some(bad) = records.iter().find(|r| r.id.contains(':')) {
            return Err(CatalogError::InvalidId(bad.id.clone()));
        }

        let mut tx = self.db.begin().await?;
        for record in records {
            sqlx::query(
                "INSERT INTO faq_items (id, category, lang, question, answer, keywords) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
                 ON CONFLICT(id) DO UPDATE SET \
                     category = excluded.category, \
                     lang = excluded.lang, \
                     question = excluded.question, \
                     answer = excluded.answer, \
                     keywords = excluded.keywords",
            )
            .bind(&record.id)
            .bind(record.category.as_str())
            .bind(record.language.code())
            .bind(&record.question)
            .bind(&record.answer)
            .bind(record.keywords_joined())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(count = records.len(), "faq records saved");
        Ok(())
    }

    async fn all(&self) -> Result<Vec<FaqRecord>, CatalogError> {
        let rows: Vec<FaqRow> = sqlx::query_as(
            "SELECT id, category, lang, question, answer, keywords \
             FROM faq_items ORDER BY seq ASC",
        )
        .fetch_all(&self.db)
        .await?;
        rows.into_iter().map(row_to_record).collect()
    }
}
