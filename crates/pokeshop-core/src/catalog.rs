//! The harvest interchange record and its validation into a catalog item.
//!
//! [`HarvestedRecord`] is the element type of `pokemon_raw_data.json`: the
//! harvester writes it and the importer reads it back. Every field is optional
//! on the way in so a single malformed element can be reported and skipped
//! instead of failing the whole file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Description used when a species has no English flavor text.
pub const NO_DESCRIPTION: &str = "No description available.";

/// One entry of the harvest interchange file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestedRecord {
    #[serde(default)]
    pub pokemon_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Official artwork, or the default front sprite when no artwork exists.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sprite_front_default_url: Option<String>,
    #[serde(default)]
    pub sprite_back_default_url: Option<String>,
    #[serde(default)]
    pub sprite_front_shiny_url: Option<String>,
    #[serde(default)]
    pub sprite_back_shiny_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    /// Base stats keyed by stat name, in source order.
    #[serde(default)]
    pub stats: IndexMap<String, i64>,
    #[serde(default)]
    pub abilities: Vec<String>,
}

/// A validated record, ready to be priced and written to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatalogItem {
    pub external_id: i64,
    pub name: String,
    pub primary_image_url: String,
    pub sprite_front_default_url: Option<String>,
    pub sprite_back_default_url: Option<String>,
    pub sprite_front_shiny_url: Option<String>,
    pub sprite_back_shiny_url: Option<String>,
    pub description: String,
    pub categories: Vec<String>,
    pub stats: IndexMap<String, i64>,
    pub abilities: Vec<String>,
}

/// Returned by [`HarvestedRecord::validate`] listing every required field
/// that was absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required data: {}", .fields.join(", "))]
pub struct MissingField {
    pub fields: Vec<&'static str>,
}

impl HarvestedRecord {
    /// Short `Name (ID: n)` label for log lines, tolerant of missing fields.
    #[must_use]
    pub fn label(&self) -> String {
        let name = self.name.as_deref().unwrap_or("N/A");
        match self.pokemon_id {
            Some(id) => format!("{name} (ID: {id})"),
            None => format!("{name} (ID: N/A)"),
        }
    }

    /// Checks the required fields and converts into a [`NewCatalogItem`].
    ///
    /// `pokemon_id` must be a positive integer; `name` and `image_url` must be
    /// present and not blank. A missing description becomes an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`MissingField`] naming each required field that failed.
    pub fn validate(self) -> Result<NewCatalogItem, MissingField> {
        let external_id = self.pokemon_id.filter(|id| *id > 0);
        let name = non_blank(self.name);
        let primary_image_url = non_blank(self.image_url);

        match (external_id, name, primary_image_url) {
            (Some(external_id), Some(name), Some(primary_image_url)) => Ok(NewCatalogItem {
                external_id,
                name,
                primary_image_url,
                sprite_front_default_url: self.sprite_front_default_url,
                sprite_back_default_url: self.sprite_back_default_url,
                sprite_front_shiny_url: self.sprite_front_shiny_url,
                sprite_back_shiny_url: self.sprite_back_shiny_url,
                description: self.description.unwrap_or_default(),
                categories: self.types,
                stats: self.stats,
                abilities: self.abilities,
            }),
            (external_id, name, primary_image_url) => {
                let mut fields = Vec::new();
                if external_id.is_none() {
                    fields.push("pokemon_id");
                }
                if name.is_none() {
                    fields.push("name");
                }
                if primary_image_url.is_none() {
                    fields.push("image_url");
                }
                Err(MissingField { fields })
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
