//! One-time catalog bootstrap from seed data.
//!
//! Failures never stop the process: the bot keeps running on whatever the
//! repository already holds, possibly nothing.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info};

use super::seed::{self, SeedSource};
use super::{Catalog, CatalogError, FaqRepository};

/// Result of a bootstrap attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The repository already had records; the seed was not read.
    AlreadyPopulated {
        /// Records present in the repository.
        count: u64,
    },
    /// The repository was empty and has been filled from the seed.
    Seeded {
        /// Records written.
        count: usize,
    },
    /// Bootstrap failed; the catalog is left as it was.
    Failed {
        /// Human-readable cause.
        reason: String,
    },
}

/// Seed an empty repository.
///
/// Never returns an error: failures are logged and reported as
/// [`BootstrapOutcome::Failed`].
pub async fn bootstrap(repo: &dyn FaqRepository, source: &dyn SeedSource) -> BootstrapOutcome {
    match try_bootstrap(repo, source).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(error = %err, "catalog bootstrap failed, continuing without seed data");
            BootstrapOutcome::Failed {
                reason: err.to_string(),
            }
        }
    }
}

async fn try_bootstrap(
    repo: &dyn FaqRepository,
    source: &dyn SeedSource,
) -> Result<BootstrapOutcome, CatalogError> {
    let count = repo.count_all().await?;
    if count > 0 {
        info!(count, "catalog already populated, skipping seed");
        return Ok(BootstrapOutcome::AlreadyPopulated { count });
    }

    info!("catalog is empty, loading seed data");
    let items = source.load_seed().await?;
    let records = seed::expand(&items)?;
    repo.save_all(&records).await?;
    info!(items = items.len(), records = records.len(), "catalog seeded");
    Ok(BootstrapOutcome::Seeded {
        count: records.len(),
    })
}

/// Runs bootstrap at most once and hands out the resulting snapshot.
///
/// Concurrent callers wait for the first bootstrap to finish.
pub struct CatalogLoader {
    repo: Arc<dyn FaqRepository>,
    source: Arc<dyn SeedSource>,
    cell: OnceCell<(Arc<Catalog>, BootstrapOutcome)>,
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("loaded", &self.cell.initialized())
            .finish_non_exhaustive()
    }
}

impl CatalogLoader {
    /// Create a loader over a repository and seed source.
    pub fn new(repo: Arc<dyn FaqRepository>, source: Arc<dyn SeedSource>) -> Self {
        Self {
            repo,
            source,
            cell: OnceCell::new(),
        }
    }

    /// Bootstrap on first call, then return the shared snapshot.
    pub async fn catalog(&self) -> Arc<Catalog> {
        let (catalog, _) = self.init().await;
        Arc::clone(catalog)
    }

    /// Outcome of the bootstrap performed by the first [`catalog`](Self::catalog) call.
    pub async fn outcome(&self) -> BootstrapOutcome {
        let (_, outcome) = self.init().await;
        outcome.clone()
    }

    async fn init(&self) -> &(Arc<Catalog>, BootstrapOutcome) {
        self.cell
            .get_or_init(|| async {
                let outcome = bootstrap(self.repo.as_ref(), self.source.as_ref()).await;
                let catalog = match Catalog::load(self.repo.as_ref()).await {
                    Ok(catalog) => catalog,
                    Err(err) => {
                        error!(error = %err, "failed to load catalog snapshot, serving empty catalog");
                        Catalog::default()
                    }
                };
                (Arc::new(catalog), outcome)
            })
            .await
    }
}
