use super::{ArtistSearch, CompositionSearch};
use crate::api::{EntityId, Recording};

/// Finds recordings to add to an album: by composition, by artist, or both.
#[derive(Clone, Debug, Default)]
pub struct RecordingSearch {
    pub composition: CompositionSearch,
    pub artist: ArtistSearch,
}

impl RecordingSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates not already chosen, matching every active filter.
    ///
    /// Empty until a composition or an artist is selected.
    pub fn available<'a>(
        &self,
        recordings: &'a [Recording],
        exclude: &[EntityId],
    ) -> Vec<&'a Recording> {
        let composition_id = self.composition.composition_id();
        let artist_id = self.artist.selected();
        if composition_id.is_none() && artist_id.is_none() {
            return Vec::new();
        }
        recordings
            .iter()
            .filter(|r| !exclude.contains(&r.id))
            .filter(|r| composition_id.map_or(true, |id| r.composition_id == id))
            .filter(|r| artist_id.map_or(true, |id| r.artists.iter().any(|a| a.id == id)))
            .collect()
    }
}
