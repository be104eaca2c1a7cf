//! Cross-page navigation handoff.
//!
//! A page that jumps to another one precomputes the target's filtered data
//! and stores it as a typed intent under the target's key. The target takes
//! it once on mount. Storage is best-effort: read, parse and write failures
//! are logged and behave as "no saved state".

mod store;

pub use store::{FileStateStore, MemoryStateStore, StateStore};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

use crate::api::{Album, Artist, Composition, EntityId, Recording};

pub const COMPOSITIONS_PAGE_STATE: &str = "compositions_page_state";
pub const RECORDINGS_PAGE_STATE: &str = "recordings_page_state";
pub const ALBUMS_PAGE_STATE: &str = "albums_page_state";
pub const ARTISTS_PAGE_STATE: &str = "artists_page_state";

/// A navigation intent addressed to one page.
pub trait PageState: Serialize + DeserializeOwned {
    fn key() -> &'static str;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionsPageState {
    pub selected_composer_id: Option<EntityId>,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub compositions: Vec<Composition>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingsPageState {
    pub selected_composition_id: Option<EntityId>,
    pub filter_composer_id: Option<EntityId>,
    pub filter_artist_id: Option<EntityId>,
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumsPageState {
    pub selected_recording_id: Option<EntityId>,
    pub selected_composition_id: Option<EntityId>,
    #[serde(default)]
    pub albums: Vec<Album>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistsPageState {
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

impl PageState for CompositionsPageState {
    fn key() -> &'static str {
        COMPOSITIONS_PAGE_STATE
    }
}

impl PageState for RecordingsPageState {
    fn key() -> &'static str {
        RECORDINGS_PAGE_STATE
    }
}

impl PageState for AlbumsPageState {
    fn key() -> &'static str {
        ALBUMS_PAGE_STATE
    }
}

impl PageState for ArtistsPageState {
    fn key() -> &'static str {
        ARTISTS_PAGE_STATE
    }
}

/// Stores `state` under its page key. Never fails.
pub fn save_state<S: PageState>(store: &dyn StateStore, state: &S) {
    let json = match serde_json::to_string(state) {
        Ok(json) => json,
        Err(err) => {
            warn!("Failed to serialize {}: {}", S::key(), err);
            return;
        }
    };
    if let Err(err) = store.save(S::key(), &json) {
        warn!("Failed to save {}: {:#}", S::key(), err);
    }
}

/// Consumes the saved state for a page, if any.
///
/// The key is cleared even when its content does not parse.
pub fn take_state<S: PageState>(store: &dyn StateStore) -> Option<S> {
    let raw = match store.take(S::key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!("Failed to read {}: {:#}", S::key(), err);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!("Discarding unreadable {}: {}", S::key(), err);
            None
        }
    }
}
