use super::{optional_text, required_text, Draft, FormResult};
use crate::api::{Composer, ComposerPayload};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComposerDraft {
    pub full_name: String,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub nationality: String,
    pub image_url: String,
}

impl From<&Composer> for ComposerDraft {
    fn from(composer: &Composer) -> Self {
        Self {
            full_name: composer.full_name.clone(),
            name: composer.name.clone(),
            birth_year: composer.birth_year,
            death_year: composer.death_year,
            nationality: composer.nationality.clone().unwrap_or_default(),
            image_url: composer.image_url.clone().unwrap_or_default(),
        }
    }
}

impl Draft for ComposerDraft {
    type Payload = ComposerPayload;

    fn to_payload(&self) -> FormResult<ComposerPayload> {
        Ok(ComposerPayload {
            full_name: required_text(&self.full_name, "Full name")?,
            name: required_text(&self.name, "Name")?,
            birth_year: self.birth_year,
            death_year: self.death_year,
            nationality: optional_text(&self.nationality),
            image_url: optional_text(&self.image_url),
        })
    }
}
