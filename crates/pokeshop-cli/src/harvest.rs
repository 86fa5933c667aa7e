//! `harvest` command handler.

use std::path::Path;

use pokeshop_pokeapi::PokeApiClient;

/// Fetches identifiers `1..=count` and writes the successful records to
/// `output`. Per-identifier failures are logged by the harvester and only
/// counted here.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the file cannot be
/// written.
pub(crate) async fn run_harvest(
    config: &pokeshop_core::HarvestConfig,
    count: u32,
    output: &Path,
) -> anyhow::Result<()> {
    let client = PokeApiClient::with_base_url(
        &config.pokeapi_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build PokéAPI client: {e}"))?;

    tracing::info!(count, base_url = %config.pokeapi_base_url, "starting harvest");
    let report = pokeshop_pokeapi::harvest(&client, count).await;

    pokeshop_pokeapi::write_records(output, &report.records).await?;

    println!(
        "harvest complete: fetched {} of {count} ({} skipped)",
        report.records.len(),
        report.failures.len()
    );
    println!("wrote {}", output.display());
    Ok(())
}
