use super::{optional_text, required_id, required_text, Draft, FormResult};
use crate::api::{Composition, CompositionPayload, EntityId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompositionDraft {
    pub composer_id: Option<EntityId>,
    pub catalog_number: String,
    pub title: String,
}

impl CompositionDraft {
    /// Blank draft with the composer picker preset.
    pub fn for_composer(composer_id: Option<EntityId>) -> Self {
        Self {
            composer_id,
            ..Default::default()
        }
    }
}

impl From<&Composition> for CompositionDraft {
    fn from(composition: &Composition) -> Self {
        Self {
            composer_id: Some(composition.composer_id),
            catalog_number: composition.catalog_number.clone().unwrap_or_default(),
            title: composition.title.clone(),
        }
    }
}

impl Draft for CompositionDraft {
    type Payload = CompositionPayload;

    fn to_payload(&self) -> FormResult<CompositionPayload> {
        let title = required_text(&self.title, "Title")?;
        Ok(CompositionPayload {
            composer_id: required_id(self.composer_id, "Composer")?,
            catalog_number: optional_text(&self.catalog_number),
            title,
        })
    }
}
