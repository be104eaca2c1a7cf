use super::{active_query, contains_ci, Key, SearchEvent, SuggestionList};
use crate::api::{Artist, EntityId};

/// Type-ahead over artists by name or instrument.
#[derive(Clone, Debug, Default)]
pub struct ArtistSearch {
    selected: Option<EntityId>,
    query: String,
    suggestions: SuggestionList<Artist>,
}

impl ArtistSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(artist_id: Option<EntityId>) -> Self {
        Self {
            selected: artist_id,
            ..Default::default()
        }
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &SuggestionList<Artist> {
        &self.suggestions
    }

    /// Filters `artists`, skipping ids in `exclude` (already picked).
    pub fn set_query(&mut self, query: &str, artists: &[Artist], exclude: &[EntityId]) {
        self.query = query.to_string();
        self.suggestions.set_items(filter_artists(artists, query, exclude));
    }

    /// Selecting shows the artist's name in the input.
    pub fn select(&mut self, artist: &Artist) -> SearchEvent {
        self.selected = Some(artist.id);
        self.query = artist.name.clone();
        self.suggestions.clear();
        SearchEvent::ArtistSelected(artist.id)
    }

    pub fn handle_key(&mut self, key: Key) -> Option<SearchEvent> {
        self.suggestions
            .handle_key(key)
            .map(|artist| self.select(&artist))
    }

    pub fn clear(&mut self) -> SearchEvent {
        self.selected = None;
        self.query.clear();
        self.suggestions.clear();
        SearchEvent::Cleared
    }
}

/// Artists whose name or instrument contains the query, case-insensitively.
///
/// Empty for queries shorter than two characters.
pub fn filter_artists(artists: &[Artist], query: &str, exclude: &[EntityId]) -> Vec<Artist> {
    let Some(needle) = active_query(query) else {
        return Vec::new();
    };
    artists
        .iter()
        .filter(|a| !exclude.contains(&a.id))
        .filter(|a| {
            contains_ci(&a.name, &needle)
                || a.instrument
                    .as_deref()
                    .is_some_and(|i| contains_ci(i, &needle))
        })
        .cloned()
        .collect()
}
