//! Wire models for the catalog backend.
//!
//! Field names match the JSON contract of the REST backend. Read models
//! carry server-derived counters (`composition_count`, `recording_count`),
//! payload models only carry the mutable fields accepted by create/update.

use serde::{Deserialize, Serialize};

pub type EntityId = i64;

// =============================================================================
// Composers
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Composer {
    pub id: EntityId,
    pub full_name: String,
    /// Short display name, used for sorting and every cross-reference label.
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub composition_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposerPayload {
    pub full_name: String,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub nationality: Option<String>,
    pub image_url: Option<String>,
}

// =============================================================================
// Compositions
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub id: EntityId,
    pub composer_id: EntityId,
    #[serde(default)]
    pub catalog_number: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    pub title: String,
    #[serde(default)]
    pub recording_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionPayload {
    pub composer_id: EntityId,
    pub catalog_number: Option<String>,
    pub title: String,
}

// =============================================================================
// Artists
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub recording_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistPayload {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub nationality: Option<String>,
    pub instrument: Option<String>,
}

// =============================================================================
// Recordings
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: EntityId,
    pub composition_id: EntityId,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub memo: Option<String>,
    /// Performing artists in credit order.
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingPayload {
    pub composition_id: EntityId,
    pub year: Option<i32>,
    pub memo: Option<String>,
    pub artist_ids: Vec<EntityId>,
}

// =============================================================================
// Albums
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlbumImage {
    pub id: EntityId,
    pub album_id: EntityId,
    pub image_url: String,
    /// 1 for the cover image, 0 otherwise.
    #[serde(default)]
    pub is_primary: i64,
}

impl AlbumImage {
    pub fn is_primary(&self) -> bool {
        self.is_primary == 1
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlbumCustomUrl {
    pub id: EntityId,
    pub album_id: EntityId,
    pub url_name: String,
    pub url: String,
    #[serde(default)]
    pub url_order: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: EntityId,
    /// Comma-joined type tags, e.g. `"LP,CD"`.
    pub album_type: String,
    #[serde(default)]
    pub discogs_url: Option<String>,
    #[serde(default)]
    pub goclassic_url: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    /// Recordings in track order.
    #[serde(default)]
    pub recordings: Vec<Recording>,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
    #[serde(default)]
    pub custom_urls: Vec<AlbumCustomUrl>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomUrlPayload {
    pub url_name: String,
    pub url: String,
    pub url_order: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumPayload {
    pub album_type: String,
    pub discogs_url: Option<String>,
    pub goclassic_url: Option<String>,
    pub memo: Option<String>,
    pub recording_ids: Vec<EntityId>,
    pub image_urls: Vec<String>,
    pub primary_image_index: Option<usize>,
    pub custom_urls: Vec<CustomUrlPayload>,
}

/// Combined payload of `GET /api/albums/page-data`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumsPageData {
    #[serde(default)]
    pub albums: Vec<Album>,
    #[serde(default)]
    pub recordings: Vec<Recording>,
    #[serde(default)]
    pub composers: Vec<Composer>,
    #[serde(default)]
    pub compositions: Vec<Composition>,
}

/// Response of the backend image upload endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub image_url: String,
}
