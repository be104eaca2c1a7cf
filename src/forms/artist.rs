use super::{optional_text, required_text, Draft, FormResult};
use crate::api::{Artist, ArtistPayload};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArtistDraft {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub nationality: String,
    pub instrument: String,
}

impl From<&Artist> for ArtistDraft {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            birth_year: artist.birth_year,
            death_year: artist.death_year,
            nationality: artist.nationality.clone().unwrap_or_default(),
            instrument: artist.instrument.clone().unwrap_or_default(),
        }
    }
}

impl Draft for ArtistDraft {
    type Payload = ArtistPayload;

    fn to_payload(&self) -> FormResult<ArtistPayload> {
        Ok(ArtistPayload {
            name: required_text(&self.name, "Name")?,
            birth_year: self.birth_year,
            death_year: self.death_year,
            nationality: optional_text(&self.nationality),
            instrument: optional_text(&self.instrument),
        })
    }
}
