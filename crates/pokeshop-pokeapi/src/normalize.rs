//! Normalization of PokéAPI responses into [`HarvestedRecord`]s.

use indexmap::IndexMap;
use pokeshop_core::{HarvestedRecord, NO_DESCRIPTION};

use crate::types::{FlavorTextEntry, PokemonResponse, SpeciesResponse, Sprites};

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Picks the official artwork, falling back to the default front sprite.
/// Empty strings count as absent.
#[must_use]
pub fn primary_image_url(sprites: &Sprites) -> Option<String> {
    sprites
        .other
        .as_ref()
        .and_then(|other| other.official_artwork.as_ref())
        .and_then(|artwork| artwork.front_default.clone())
        .filter(|url| !url.is_empty())
        .or_else(|| sprites.front_default.clone().filter(|url| !url.is_empty()))
}

/// Returns the first English flavor text with line breaks and form feeds
/// flattened to spaces, or [`NO_DESCRIPTION`].
#[must_use]
pub fn english_description(entries: &[FlavorTextEntry]) -> String {
    entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map_or_else(
            || NO_DESCRIPTION.to_string(),
            |entry| entry.flavor_text.replace(['\n', '\x0c'], " "),
        )
}

/// Merges a pokemon and its species into one interchange record.
#[must_use]
pub fn normalize_pokemon(pokemon: &PokemonResponse, species: &SpeciesResponse) -> HarvestedRecord {
    let stats: IndexMap<String, i64> = pokemon
        .stats
        .iter()
        .map(|s| (s.stat.name.clone(), s.base_stat))
        .collect();

    HarvestedRecord {
        pokemon_id: Some(pokemon.id),
        name: Some(capitalize(&pokemon.name)),
        image_url: primary_image_url(&pokemon.sprites),
        sprite_front_default_url: pokemon.sprites.front_default.clone(),
        sprite_back_default_url: pokemon.sprites.back_default.clone(),
        sprite_front_shiny_url: pokemon.sprites.front_shiny.clone(),
        sprite_back_shiny_url: pokemon.sprites.back_shiny.clone(),
        description: Some(english_description(&species.flavor_text_entries)),
        types: pokemon.types.iter().map(|t| t.kind.name.clone()).collect(),
        stats,
        abilities: pokemon
            .abilities
            .iter()
            .map(|a| a.ability.name.clone())
            .collect(),
    }
}
