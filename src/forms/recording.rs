use super::{optional_text, require_selection, required_id, Draft, FormResult, OrderedSelection};
use crate::api::{Composition, EntityId, Recording, RecordingPayload};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingDraft {
    /// Scopes the composition picker; not sent to the backend.
    pub composer_id: Option<EntityId>,
    pub composition_id: Option<EntityId>,
    pub year: Option<i32>,
    pub memo: String,
    /// Credit order.
    pub artists: OrderedSelection,
}

impl RecordingDraft {
    /// Seeds an edit draft. The artist objects become ordered ids and the
    /// composer picker is resolved through the loaded compositions.
    pub fn from_recording(recording: &Recording, compositions: &[Composition]) -> Self {
        let composer_id = compositions
            .iter()
            .find(|c| c.id == recording.composition_id)
            .map(|c| c.composer_id);
        Self {
            composer_id,
            composition_id: Some(recording.composition_id),
            year: recording.year,
            memo: recording.memo.clone().unwrap_or_default(),
            artists: recording.artists.iter().map(|a| a.id).collect(),
        }
    }

    /// Changing composer drops a composition that belongs to someone else.
    pub fn select_composer(&mut self, composer_id: Option<EntityId>, compositions: &[Composition]) {
        self.composer_id = composer_id;
        let still_valid = match (composer_id, self.composition_id) {
            (Some(composer), Some(composition)) => compositions
                .iter()
                .any(|c| c.id == composition && c.composer_id == composer),
            _ => false,
        };
        if !still_valid {
            self.composition_id = None;
        }
    }
}

impl Draft for RecordingDraft {
    type Payload = RecordingPayload;

    fn to_payload(&self) -> FormResult<RecordingPayload> {
        let composition_id = required_id(self.composition_id, "Composition")?;
        require_selection(self.artists.ids(), "artist")?;
        Ok(RecordingPayload {
            composition_id,
            year: self.year,
            memo: optional_text(&self.memo),
            artist_ids: self.artists.ids().to_vec(),
        })
    }
}
