//! Tests for `src/catalog/sqlite.rs`: SQLite FAQ repository.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use faqbot::catalog::sqlite::SqliteFaqRepository;
use faqbot::catalog::{CatalogError, Category, FaqRecord, FaqRepository, Language};

async fn setup_repo() -> SqliteFaqRepository {
    let opts = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .expect("pool should connect");

    let repo = SqliteFaqRepository::new(pool);
    repo.migrate().await.expect("schema should apply");
    repo
}

fn record(id: &str, category: Category, language: Language, question: &str) -> FaqRecord {
    FaqRecord {
        id: id.to_owned(),
        category,
        language,
        question: question.to_owned(),
        answer: format!("answer to {question}"),
        keywords: vec!["alpha".to_owned(), "beta gamma".to_owned()],
    }
}

#[tokio::test]
async fn empty_repository_counts_zero() {
    let repo = setup_repo().await;
    assert_eq!(repo.count_all().await.expect("count"), 0);
    assert!(repo.all().await.expect("all").is_empty());
}

#[tokio::test]
async fn saved_records_are_found_by_id_with_keywords_intact() {
    let repo = setup_repo().await;
    let visa = record("v-ru", Category::Visa, Language::Ru, "Виза?");
    repo.save_all(std::slice::from_ref(&visa))
        .await
        .expect("save should succeed");

    let found = repo
        .find_by_id("v-ru")
        .await
        .expect("query should succeed")
        .expect("record should exist");
    assert_eq!(found, visa);
    assert!(repo.find_by_id("nope").await.expect("query").is_none());
}

#[tokio::test]
async fn category_listing_keeps_insertion_order_and_filters_language() {
    let repo = setup_repo().await;
    repo.save_all(&[
        record("c", Category::Housing, Language::En, "third inserted first"),
        record("a", Category::Housing, Language::Ru, "russian"),
        record("b", Category::Housing, Language::En, "second"),
        record("d", Category::Visa, Language::En, "other category"),
    ])
    .await
    .expect("save should succeed");

    let ids: Vec<String> = repo
        .find_by_category_and_language(Category::Housing, Language::En)
        .await
        .expect("query should succeed")
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["c".to_owned(), "b".to_owned()]);
    assert_eq!(repo.count_all().await.expect("count"), 4);
}

#[tokio::test]
async fn saving_an_existing_id_replaces_it() {
    let repo = setup_repo().await;
    repo.save_all(&[record("x", Category::Life, Language::En, "old")])
        .await
        .expect("first save");
    repo.save_all(&[record("x", Category::Life, Language::En, "new")])
        .await
        .expect("second save");

    assert_eq!(repo.count_all().await.expect("count"), 1);
    let found = repo.find_by_id("x").await.expect("query").expect("exists");
    assert_eq!(found.question, "new");
}

#[tokio::test]
async fn ids_with_token_delimiter_are_rejected() {
    let repo = setup_repo().await;
    let result = repo
        .save_all(&[record("bad:id", Category::Life, Language::En, "q")])
        .await;
    assert!(matches!(result, Err(CatalogError::InvalidId(_))));
    assert_eq!(repo.count_all().await.expect("count"), 0);
}

#[tokio::test]
async fn migrate_is_idempotent() {
    let repo = setup_repo().await;
    repo.migrate().await.expect("second migrate should succeed");
}

#[tokio::test]
async fn open_creates_database_file_and_parent_dirs() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("nested").join("faq.db");

    let repo = SqliteFaqRepository::open(&path)
        .await
        .expect("open should succeed");
    repo.save_all(&[record("f", Category::Documents, Language::Ru, "q")])
        .await
        .expect("save should succeed");

    assert!(path.exists());
    assert_eq!(repo.count_all().await.expect("count"), 1);
}
