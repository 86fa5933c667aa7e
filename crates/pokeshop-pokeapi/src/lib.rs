//! PokéAPI client and the harvest pipeline that turns PokéAPI resources into
//! the catalog interchange file.

pub mod client;
pub mod error;
pub mod harvest;
pub mod normalize;
pub mod types;

pub use client::PokeApiClient;
pub use error::PokeApiError;
pub use harvest::{
    fetch_record, harvest, write_records, HarvestFailure, HarvestReport, DEFAULT_HARVEST_COUNT,
    DEFAULT_OUTPUT_FILE,
};
pub use normalize::{capitalize, english_description, normalize_pokemon, primary_image_url};
