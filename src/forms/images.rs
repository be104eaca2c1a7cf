//! Album image list with a single optional primary index.

use futures::future::try_join_all;
use tracing::info;

use super::{FormError, FormMode, FormResult};
use crate::api::{AlbumImage, ImageFile, ImageUploader, UploadTarget};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageList {
    urls: Vec<String>,
    primary: Option<usize>,
}

impl ImageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds from a stored album; the primary is the image flagged `1`.
    pub fn from_album_images(images: &[AlbumImage]) -> Self {
        Self {
            urls: images.iter().map(|img| img.image_url.clone()).collect(),
            primary: images.iter().position(AlbumImage::is_primary),
        }
    }

    pub fn push(&mut self, url: String) {
        self.urls.push(url);
    }

    pub fn extend(&mut self, urls: impl IntoIterator<Item = String>) {
        self.urls.extend(urls);
    }

    /// Removes one image, keeping the primary pointing at the same image.
    ///
    /// Removing the primary image itself clears the primary selection.
    pub fn remove(&mut self, index: usize) -> FormResult<String> {
        if index >= self.urls.len() {
            return Err(FormError::InvalidImageIndex(index));
        }
        let removed = self.urls.remove(index);
        self.primary = match self.primary {
            Some(p) if p == index => None,
            Some(p) if p > index => Some(p - 1),
            other => other,
        };
        Ok(removed)
    }

    pub fn set_primary(&mut self, index: usize) -> FormResult<()> {
        if index >= self.urls.len() {
            return Err(FormError::InvalidImageIndex(index));
        }
        self.primary = Some(index);
        Ok(())
    }

    pub fn clear_primary(&mut self) {
        self.primary = None;
    }

    pub fn primary_index(&self) -> Option<usize> {
        self.primary
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Adds picked files to the list, in selection order.
    ///
    /// A new album has nowhere to upload to yet, so its images travel inline
    /// as data URLs. An existing album uploads each file right away and
    /// stores the returned reference. One failed upload rejects the batch.
    pub async fn intake(
        &mut self,
        files: &[ImageFile],
        mode: FormMode,
        uploader: &dyn ImageUploader,
    ) -> FormResult<usize> {
        if let Some(bad) = files.iter().find(|f| !f.is_image()) {
            return Err(FormError::ImageRejected(format!(
                "{} is not an image",
                bad.file_name
            )));
        }

        let urls: Vec<String> = match mode {
            FormMode::Create => files.iter().map(ImageFile::to_data_url).collect(),
            FormMode::Edit(album_id) => {
                let uploads = files
                    .iter()
                    .map(|file| uploader.upload_image(UploadTarget::AlbumCover, file));
                let urls = try_join_all(uploads).await?;
                info!("Uploaded {} image(s) for album {}", urls.len(), album_id);
                urls
            }
        };

        let added = files.len();
        self.extend(urls);
        Ok(added)
    }
}
