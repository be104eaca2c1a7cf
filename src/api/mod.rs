//! Transport layer: typed access to the catalog REST backend.

mod client;
mod error;
mod image_file;
mod image_host;
mod models;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::{extract_error_message, ApiError};
pub use image_file::{ImageFile, MAX_PORTRAIT_BYTES};
pub use image_host::{delivery_url, HostedImage, ImageHostClient, ImageTransform};
pub use models::*;

use async_trait::async_trait;

pub type ApiResult<T> = Result<T, ApiError>;

/// Default page size of list endpoints.
pub const DEFAULT_LIMIT: u32 = 100;

/// Pagination and free-text search shared by every list endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub skip: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

impl ListQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Sets the search term; blank text means no search.
    pub fn search(mut self, term: Option<&str>) -> Self {
        self.search = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompositionQuery {
    pub list: ListQuery,
    pub composer_id: Option<EntityId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingQuery {
    pub list: ListQuery,
    pub composition_id: Option<EntityId>,
    pub composer_id: Option<EntityId>,
    pub artist_id: Option<EntityId>,
}

impl RecordingQuery {
    pub fn is_unfiltered(&self) -> bool {
        self.composition_id.is_none() && self.composer_id.is_none() && self.artist_id.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlbumQuery {
    pub list: ListQuery,
    pub album_type: Option<String>,
}

/// Which backend upload endpoint an image belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadTarget {
    ComposerPortrait,
    AlbumCover,
}

impl UploadTarget {
    pub fn backend_path(&self) -> &'static str {
        match self {
            UploadTarget::ComposerPortrait => "/api/composers/upload-image",
            UploadTarget::AlbumCover => "/api/albums/upload-image",
        }
    }

    /// Folder used on the third-party image host.
    pub fn host_folder(&self) -> &'static str {
        match self {
            UploadTarget::ComposerPortrait => "classical-albums/composers",
            UploadTarget::AlbumCover => "classical-albums/albums",
        }
    }
}

/// Stores an image somewhere and returns a reference to it: either a
/// backend-served path or an absolute URL.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload_image(&self, target: UploadTarget, file: &ImageFile) -> ApiResult<String>;
}

/// Everything the pages need from the backend.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    // =========================================================================
    // Composers
    // =========================================================================

    async fn list_composers(&self, query: &ListQuery) -> ApiResult<Vec<Composer>>;
    async fn get_composer(&self, id: EntityId) -> ApiResult<Composer>;
    async fn create_composer(&self, payload: &ComposerPayload) -> ApiResult<Composer>;
    async fn update_composer(&self, id: EntityId, payload: &ComposerPayload) -> ApiResult<Composer>;
    async fn delete_composer(&self, id: EntityId) -> ApiResult<()>;
    async fn upload_composer_image(&self, file: &ImageFile) -> ApiResult<UploadedImage>;

    // =========================================================================
    // Compositions
    // =========================================================================

    async fn list_compositions(&self, query: &CompositionQuery) -> ApiResult<Vec<Composition>>;
    async fn get_composition(&self, id: EntityId) -> ApiResult<Composition>;
    async fn create_composition(&self, payload: &CompositionPayload) -> ApiResult<Composition>;
    async fn update_composition(
        &self,
        id: EntityId,
        payload: &CompositionPayload,
    ) -> ApiResult<Composition>;
    async fn delete_composition(&self, id: EntityId) -> ApiResult<()>;

    // =========================================================================
    // Artists
    // =========================================================================

    async fn list_artists(&self, query: &ListQuery) -> ApiResult<Vec<Artist>>;
    async fn get_artist(&self, id: EntityId) -> ApiResult<Artist>;
    async fn create_artist(&self, payload: &ArtistPayload) -> ApiResult<Artist>;
    async fn update_artist(&self, id: EntityId, payload: &ArtistPayload) -> ApiResult<Artist>;
    async fn delete_artist(&self, id: EntityId) -> ApiResult<()>;

    // =========================================================================
    // Recordings
    // =========================================================================

    async fn list_recordings(&self, query: &RecordingQuery) -> ApiResult<Vec<Recording>>;
    async fn get_recording(&self, id: EntityId) -> ApiResult<Recording>;
    async fn create_recording(&self, payload: &RecordingPayload) -> ApiResult<Recording>;
    async fn update_recording(
        &self,
        id: EntityId,
        payload: &RecordingPayload,
    ) -> ApiResult<Recording>;
    async fn delete_recording(&self, id: EntityId) -> ApiResult<()>;

    // =========================================================================
    // Albums
    // =========================================================================

    async fn list_albums(&self, query: &AlbumQuery) -> ApiResult<Vec<Album>>;
    async fn get_album(&self, id: EntityId) -> ApiResult<Album>;
    async fn create_album(&self, payload: &AlbumPayload) -> ApiResult<Album>;
    async fn update_album(&self, id: EntityId, payload: &AlbumPayload) -> ApiResult<Album>;
    async fn delete_album(&self, id: EntityId) -> ApiResult<()>;
    async fn upload_album_image(&self, file: &ImageFile) -> ApiResult<UploadedImage>;

    /// Albums, recordings, composers and compositions in one round trip.
    async fn albums_page_data(&self) -> ApiResult<AlbumsPageData>;
}
