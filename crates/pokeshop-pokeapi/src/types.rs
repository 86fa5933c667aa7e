//! PokéAPI v2 response types.
//!
//! Only the fields the harvester reads are modelled; serde ignores the rest.
//! Keys the harvester treats as required (`id`, `name`, `types`, `stats`,
//! `abilities`) are non-optional so a response missing them fails to decode
//! and the identifier is skipped.

use serde::Deserialize;

/// A `{ "name": ..., "url": ... }` reference to another resource.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

// ---------------------------------------------------------------------------
// pokemon/{id}/
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonResponse {
    pub id: i64,
    pub name: String,
    pub sprites: Sprites,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatEntry>,
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub back_shiny: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

/// The `sprites.other` object, keyed by artwork collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkSprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub base_stat: i64,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

// ---------------------------------------------------------------------------
// pokemon-species/{id}/
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeciesResponse {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

/// One localized Pokédex entry.
#[derive(Debug, Clone, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}
