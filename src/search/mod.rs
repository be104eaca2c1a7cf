//! Two-stage search widgets: pick a parent, then type to narrow its
//! already-loaded children.

mod artist_search;
mod composition_search;
mod recording_search;
mod suggestions;

pub use artist_search::{filter_artists, ArtistSearch};
pub use composition_search::CompositionSearch;
pub use recording_search::RecordingSearch;
pub use suggestions::{active_query, contains_ci, Key, SuggestionList, MIN_QUERY_CHARS};

use crate::api::EntityId;

/// What a widget reports back to the page that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    ComposerChanged(Option<EntityId>),
    CompositionSelected(EntityId),
    ArtistSelected(EntityId),
    /// Both levels were reset; dependent filters must be reset too.
    Cleared,
}
