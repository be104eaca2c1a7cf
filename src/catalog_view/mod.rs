//! Client-side read model.
//!
//! Pages fetch the five resource lists independently and join them here by
//! numeric id. Lookups are plain linear scans; lists are a few hundred rows
//! at most. A reference that cannot be resolved renders as [`PLACEHOLDER`]
//! instead of failing.

mod display;

pub use display::{
    album_type_tags, artist_display, composition_display, format_life, image_preview_url,
    primary_image, sort_composers_by_name, sorted_album_types, KNOWN_ALBUM_TYPES, PLACEHOLDER,
};

use crate::api::{Album, AlbumsPageData, Artist, Composer, Composition, EntityId, Recording};

#[derive(Clone, Debug, Default)]
pub struct CatalogView {
    pub composers: Vec<Composer>,
    pub compositions: Vec<Composition>,
    pub artists: Vec<Artist>,
    pub recordings: Vec<Recording>,
    pub albums: Vec<Album>,
}

impl From<AlbumsPageData> for CatalogView {
    fn from(data: AlbumsPageData) -> Self {
        Self {
            composers: data.composers,
            compositions: data.compositions,
            artists: Vec::new(),
            recordings: data.recordings,
            albums: data.albums,
        }
    }
}

impl CatalogView {
    pub fn composer(&self, id: EntityId) -> Option<&Composer> {
        self.composers.iter().find(|c| c.id == id)
    }

    pub fn composition(&self, id: EntityId) -> Option<&Composition> {
        self.compositions.iter().find(|c| c.id == id)
    }

    pub fn artist(&self, id: EntityId) -> Option<&Artist> {
        self.artists.iter().find(|a| a.id == id)
    }

    pub fn recording(&self, id: EntityId) -> Option<&Recording> {
        self.recordings.iter().find(|r| r.id == id)
    }

    pub fn album(&self, id: EntityId) -> Option<&Album> {
        self.albums.iter().find(|a| a.id == id)
    }

    pub fn compositions_of_composer(&self, composer_id: EntityId) -> Vec<&Composition> {
        self.compositions
            .iter()
            .filter(|c| c.composer_id == composer_id)
            .collect()
    }

    /// Composer short name for a composition, via its `composer_id`.
    pub fn composer_name_for_composition(&self, composition_id: EntityId) -> String {
        self.composition(composition_id)
            .and_then(|composition| self.composer(composition.composer_id))
            .map(|composer| composer.name.clone())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn composition_label(&self, composition_id: EntityId) -> String {
        self.composition(composition_id)
            .map(|c| composition_display(c.catalog_number.as_deref(), &c.title))
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// Title and catalog number as separate columns.
    pub fn composition_title_and_catalog(
        &self,
        composition_id: EntityId,
    ) -> (String, Option<String>) {
        match self.composition(composition_id) {
            Some(c) => (
                c.title.clone(),
                c.catalog_number.clone().filter(|n| !n.is_empty()),
            ),
            None => (PLACEHOLDER.to_string(), None),
        }
    }

    /// `composer - [catalog - ]title` for a recording.
    pub fn recording_label(&self, recording_id: EntityId) -> String {
        let Some(recording) = self.recording(recording_id) else {
            return PLACEHOLDER.to_string();
        };
        let Some(composition) = self.composition(recording.composition_id) else {
            return PLACEHOLDER.to_string();
        };
        let composer_name = self
            .composer(composition.composer_id)
            .map(|c| c.name.as_str())
            .unwrap_or(PLACEHOLDER);
        format!(
            "{} - {}",
            composer_name,
            composition_display(composition.catalog_number.as_deref(), &composition.title)
        )
    }

    pub fn artist_label(&self, artist_id: EntityId) -> String {
        self.artist(artist_id)
            .map(artist_display)
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn album_count_for_recording(&self, recording_id: EntityId) -> usize {
        self.albums
            .iter()
            .filter(|album| album.recordings.iter().any(|r| r.id == recording_id))
            .count()
    }

    pub fn albums_containing_recording(&self, recording_id: EntityId) -> Vec<&Album> {
        self.albums
            .iter()
            .filter(|album| album.recordings.iter().any(|r| r.id == recording_id))
            .collect()
    }

    pub fn albums_containing_composition(&self, composition_id: EntityId) -> Vec<&Album> {
        self.albums
            .iter()
            .filter(|album| {
                album
                    .recordings
                    .iter()
                    .any(|r| r.composition_id == composition_id)
            })
            .collect()
    }

    pub fn recordings_by_composition(&self, composition_id: EntityId) -> Vec<&Recording> {
        self.recordings
            .iter()
            .filter(|r| r.composition_id == composition_id)
            .collect()
    }

    pub fn recordings_by_artist(&self, artist_id: EntityId) -> Vec<&Recording> {
        self.recordings
            .iter()
            .filter(|r| r.artists.iter().any(|a| a.id == artist_id))
            .collect()
    }
}

/// Artist names of a recording in credit order.
pub fn recording_artist_names(recording: &Recording) -> String {
    if recording.artists.is_empty() {
        return PLACEHOLDER.to_string();
    }
    recording
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
