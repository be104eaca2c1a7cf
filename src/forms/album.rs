use super::{optional_text, require_selection, Draft, FormResult, ImageList, OrderedSelection};
use crate::api::{Album, AlbumPayload, CustomUrlPayload};
use crate::catalog_view::{album_type_tags, KNOWN_ALBUM_TYPES};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomUrlDraft {
    pub url_name: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlbumDraft {
    /// Selected type tags in selection order.
    pub album_types: Vec<String>,
    pub discogs_url: String,
    pub goclassic_url: String,
    pub memo: String,
    /// Track order.
    pub recordings: OrderedSelection,
    pub images: ImageList,
    pub custom_urls: Vec<CustomUrlDraft>,
}

impl AlbumDraft {
    pub fn toggle_album_type(&mut self, tag: &str) {
        if let Some(pos) = self.album_types.iter().position(|t| t == tag) {
            self.album_types.remove(pos);
        } else {
            self.album_types.push(tag.to_string());
        }
    }

    pub fn has_album_type(&self, tag: &str) -> bool {
        self.album_types.iter().any(|t| t == tag)
    }

    /// The checkbox row: known tags plus whatever the stored album carries.
    pub fn album_type_choices(&self) -> Vec<String> {
        let mut choices: Vec<String> = KNOWN_ALBUM_TYPES.iter().map(|t| t.to_string()).collect();
        for tag in &self.album_types {
            if !choices.contains(tag) {
                choices.push(tag.clone());
            }
        }
        choices
    }

    pub fn add_custom_url(&mut self) {
        self.custom_urls.push(CustomUrlDraft::default());
    }

    pub fn remove_custom_url(&mut self, index: usize) {
        if index < self.custom_urls.len() {
            self.custom_urls.remove(index);
        }
    }
}

impl From<&Album> for AlbumDraft {
    fn from(album: &Album) -> Self {
        let mut custom_urls: Vec<_> = album.custom_urls.iter().collect();
        custom_urls.sort_by_key(|cu| cu.url_order);
        Self {
            album_types: album_type_tags(&album.album_type),
            discogs_url: album.discogs_url.clone().unwrap_or_default(),
            goclassic_url: album.goclassic_url.clone().unwrap_or_default(),
            memo: album.memo.clone().unwrap_or_default(),
            recordings: album.recordings.iter().map(|r| r.id).collect(),
            images: ImageList::from_album_images(&album.images),
            custom_urls: custom_urls
                .into_iter()
                .map(|cu| CustomUrlDraft {
                    url_name: cu.url_name.clone(),
                    url: cu.url.clone(),
                })
                .collect(),
        }
    }
}

impl Draft for AlbumDraft {
    type Payload = AlbumPayload;

    fn to_payload(&self) -> FormResult<AlbumPayload> {
        require_selection(&self.album_types, "album type")?;
        require_selection(self.recordings.ids(), "recording")?;

        // Rows left completely blank are dropped; url_order follows the
        // remaining rows.
        let custom_urls = self
            .custom_urls
            .iter()
            .filter(|cu| !(cu.url_name.trim().is_empty() && cu.url.trim().is_empty()))
            .enumerate()
            .map(|(i, cu)| CustomUrlPayload {
                url_name: cu.url_name.trim().to_string(),
                url: cu.url.trim().to_string(),
                url_order: i as u32,
            })
            .collect();

        Ok(AlbumPayload {
            album_type: self.album_types.join(","),
            discogs_url: optional_text(&self.discogs_url),
            goclassic_url: optional_text(&self.goclassic_url),
            memo: optional_text(&self.memo),
            recording_ids: self.recordings.ids().to_vec(),
            image_urls: self.images.urls().to_vec(),
            primary_image_index: self.images.primary_index(),
            custom_urls,
        })
    }
}
