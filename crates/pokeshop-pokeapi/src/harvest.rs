//! Sequential harvest of PokéAPI records into the interchange file.
//!
//! Identifiers are fetched strictly one at a time. A failure for one
//! identifier is logged and recorded in the report; it never stops the run.

use std::path::Path;

use pokeshop_core::HarvestedRecord;
use serde::Serialize;

use crate::client::PokeApiClient;
use crate::error::PokeApiError;
use crate::normalize::normalize_pokemon;

/// How many identifiers a harvest covers when no count is given.
pub const DEFAULT_HARVEST_COUNT: u32 = 400;

/// Interchange file written by the harvester and read by the importer.
pub const DEFAULT_OUTPUT_FILE: &str = "pokemon_raw_data.json";

/// An identifier that could not be harvested.
#[derive(Debug, Clone)]
pub struct HarvestFailure {
    pub pokemon_id: i64,
    pub reason: String,
}

/// Outcome of a [`harvest`] run.
#[derive(Debug, Default)]
pub struct HarvestReport {
    /// Successfully normalized records, in identifier order.
    pub records: Vec<HarvestedRecord>,
    pub failures: Vec<HarvestFailure>,
}

/// Fetches both resources for one identifier and merges them.
///
/// # Errors
///
/// Returns the first [`PokeApiError`] from either request.
pub async fn fetch_record(
    client: &PokeApiClient,
    pokemon_id: i64,
) -> Result<HarvestedRecord, PokeApiError> {
    let pokemon = client.get_pokemon(pokemon_id).await?;
    let species = client.get_species(pokemon_id).await?;
    Ok(normalize_pokemon(&pokemon, &species))
}

/// Harvests identifiers `1..=count` in order.
pub async fn harvest(client: &PokeApiClient, count: u32) -> HarvestReport {
    let mut report = HarvestReport::default();

    for pokemon_id in 1..=i64::from(count) {
        match fetch_record(client, pokemon_id).await {
            Ok(record) => {
                tracing::info!(pokemon_id, record = %record.label(), "fetched pokemon");
                report.records.push(record);
            }
            Err(e) => {
                tracing::warn!(pokemon_id, error = %e, "skipping pokemon");
                report.failures.push(HarvestFailure {
                    pokemon_id,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

/// Writes `records` to `path` as a JSON array indented with four spaces.
/// Non-ASCII text is written as-is.
///
/// # Errors
///
/// Returns [`PokeApiError::Serialize`] or [`PokeApiError::Io`].
pub async fn write_records(path: &Path, records: &[HarvestedRecord]) -> Result<(), PokeApiError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut serializer)
        .map_err(PokeApiError::Serialize)?;

    tokio::fs::write(path, buf)
        .await
        .map_err(|source| PokeApiError::Io {
            path: path.to_path_buf(),
            source,
        })
}
