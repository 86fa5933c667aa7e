//! `import` command handler.
//!
//! The harvested file is decoded element by element so that one malformed
//! record is skipped with a warning instead of rejecting the whole batch.
//! Store failures for a single record are logged and counted, not propagated.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pokeshop_core::{HarvestedRecord, PricingConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ImportError {
    #[error("file \"{path}\" does not exist")]
    Missing { path: PathBuf },

    #[error("could not read \"{path}\": {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode JSON array from \"{path}\": {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-run counters reported at the end of an import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Reads `path` as a JSON array, leaving each element undecoded.
///
/// # Errors
///
/// Returns [`ImportError`] if the file is absent, unreadable, or not a JSON
/// array.
pub(crate) async fn load_entries(path: &Path) -> Result<Vec<serde_json::Value>, ImportError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound => ImportError::Missing {
                path: path.to_path_buf(),
            },
            _ => ImportError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

    serde_json::from_str(&text).map_err(|source| ImportError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Upserts every valid entry, pricing each through `pricing`.
pub(crate) async fn import_entries<R: Rng>(
    pool: &PgPool,
    entries: Vec<serde_json::Value>,
    pricing: &PricingConfig,
    rng: &mut R,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for (index, entry) in entries.into_iter().enumerate() {
        let record: HarvestedRecord = match serde_json::from_value(entry) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping undecodable entry");
                summary.skipped += 1;
                continue;
            }
        };

        let label = record.label();
        let item = match record.validate() {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(index, record = %label, error = %e, "skipping entry");
                summary.skipped += 1;
                continue;
            }
        };

        let price = pricing.next_price(rng);
        match pokeshop_db::upsert_product(pool, &item, price).await {
            Ok(outcome) if outcome.created => {
                tracing::info!(record = %label, %price, "created product");
                summary.created += 1;
            }
            Ok(_) => {
                tracing::info!(record = %label, %price, "updated product");
                summary.updated += 1;
            }
            Err(e) => {
                tracing::error!(record = %label, error = %e, "failed to store product");
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Loads `path` and imports its entries.
///
/// # Errors
///
/// Returns an error only when the file itself cannot be loaded.
pub(crate) async fn run_import(
    pool: &PgPool,
    path: &Path,
    pricing: &PricingConfig,
) -> anyhow::Result<ImportSummary> {
    println!("loading data from {}", path.display());
    let entries = load_entries(path).await?;
    println!("found {} entries", entries.len());

    if pricing.use_random_price() {
        tracing::info!("pricing each product randomly within the configured range");
    }

    let mut rng = StdRng::from_os_rng();
    Ok(import_entries(pool, entries, pricing, &mut rng).await)
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
