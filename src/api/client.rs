//! HTTP client for the catalog backend.

use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::{
    Album, AlbumPayload, AlbumQuery, AlbumsPageData, ApiError, ApiResult, Artist, ArtistPayload,
    CatalogApi, Composer, ComposerPayload, Composition, CompositionPayload, CompositionQuery,
    EntityId, ImageFile, ImageUploader, ListQuery, Recording, RecordingPayload, RecordingQuery,
    UploadTarget, UploadedImage,
};

/// Default backend location when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// HTTP client for the catalog REST backend.
///
/// No retries and, unless configured, no request timeout: a failed call is
/// reported once and the caller keeps whatever state it had.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Backend root (e.g., "http://localhost:8000")
    /// * `timeout_sec` - Optional per-request timeout in seconds
    pub fn new(base_url: impl Into<String>, timeout_sec: Option<u64>) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout_sec {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Get the base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-2xx response into an [`ApiError`] carrying the body message.
    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(ApiError::from_status_body(status.as_u16(), &body))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> ApiResult<T> {
        let url = self.url(path);
        debug!(method = "GET", url = %url, "Sending request");
        let response = self.client.get(&url).query(params).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(method = %method, url = %url, "Sending request");
        let response = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_at(&self, path: &str) -> ApiResult<()> {
        let url = self.url(path);
        debug!(method = "DELETE", url = %url, "Sending request");
        let response = self.client.delete(&url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn upload_multipart(&self, path: &str, file: &ImageFile) -> ApiResult<UploadedImage> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type())?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.url(path);
        debug!(url = %url, file = %file.file_name, size = file.size(), "Uploading image");
        let response = self.client.post(&url).multipart(form).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

fn push_id(params: &mut Vec<(&'static str, String)>, key: &'static str, id: Option<EntityId>) {
    if let Some(id) = id {
        params.push((key, id.to_string()));
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn list_composers(&self, query: &ListQuery) -> ApiResult<Vec<Composer>> {
        self.get_json("/api/composers/", &query.to_params()).await
    }

    async fn get_composer(&self, id: EntityId) -> ApiResult<Composer> {
        self.get_json(&format!("/api/composers/{}", id), &[]).await
    }

    async fn create_composer(&self, payload: &ComposerPayload) -> ApiResult<Composer> {
        self.send_json(Method::POST, "/api/composers/", payload).await
    }

    async fn update_composer(
        &self,
        id: EntityId,
        payload: &ComposerPayload,
    ) -> ApiResult<Composer> {
        self.send_json(Method::PUT, &format!("/api/composers/{}", id), payload)
            .await
    }

    async fn delete_composer(&self, id: EntityId) -> ApiResult<()> {
        self.delete_at(&format!("/api/composers/{}", id)).await
    }

    async fn upload_composer_image(&self, file: &ImageFile) -> ApiResult<UploadedImage> {
        self.upload_multipart(UploadTarget::ComposerPortrait.backend_path(), file)
            .await
    }

    async fn list_compositions(&self, query: &CompositionQuery) -> ApiResult<Vec<Composition>> {
        let mut params = query.list.to_params();
        push_id(&mut params, "composer_id", query.composer_id);
        self.get_json("/api/compositions/", &params).await
    }

    async fn get_composition(&self, id: EntityId) -> ApiResult<Composition> {
        self.get_json(&format!("/api/compositions/{}", id), &[])
            .await
    }

    async fn create_composition(&self, payload: &CompositionPayload) -> ApiResult<Composition> {
        self.send_json(Method::POST, "/api/compositions/", payload)
            .await
    }

    async fn update_composition(
        &self,
        id: EntityId,
        payload: &CompositionPayload,
    ) -> ApiResult<Composition> {
        self.send_json(Method::PUT, &format!("/api/compositions/{}", id), payload)
            .await
    }

    async fn delete_composition(&self, id: EntityId) -> ApiResult<()> {
        self.delete_at(&format!("/api/compositions/{}", id)).await
    }

    async fn list_artists(&self, query: &ListQuery) -> ApiResult<Vec<Artist>> {
        self.get_json("/api/artists/", &query.to_params()).await
    }

    async fn get_artist(&self, id: EntityId) -> ApiResult<Artist> {
        self.get_json(&format!("/api/artists/{}", id), &[]).await
    }

    async fn create_artist(&self, payload: &ArtistPayload) -> ApiResult<Artist> {
        self.send_json(Method::POST, "/api/artists/", payload).await
    }

    async fn update_artist(&self, id: EntityId, payload: &ArtistPayload) -> ApiResult<Artist> {
        self.send_json(Method::PUT, &format!("/api/artists/{}", id), payload)
            .await
    }

    async fn delete_artist(&self, id: EntityId) -> ApiResult<()> {
        self.delete_at(&format!("/api/artists/{}", id)).await
    }

    async fn list_recordings(&self, query: &RecordingQuery) -> ApiResult<Vec<Recording>> {
        let mut params = query.list.to_params();
        push_id(&mut params, "composition_id", query.composition_id);
        push_id(&mut params, "composer_id", query.composer_id);
        push_id(&mut params, "artist_id", query.artist_id);
        self.get_json("/api/recordings/", &params).await
    }

    async fn get_recording(&self, id: EntityId) -> ApiResult<Recording> {
        self.get_json(&format!("/api/recordings/{}", id), &[]).await
    }

    async fn create_recording(&self, payload: &RecordingPayload) -> ApiResult<Recording> {
        self.send_json(Method::POST, "/api/recordings/", payload)
            .await
    }

    async fn update_recording(
        &self,
        id: EntityId,
        payload: &RecordingPayload,
    ) -> ApiResult<Recording> {
        self.send_json(Method::PUT, &format!("/api/recordings/{}", id), payload)
            .await
    }

    async fn delete_recording(&self, id: EntityId) -> ApiResult<()> {
        self.delete_at(&format!("/api/recordings/{}", id)).await
    }

    async fn list_albums(&self, query: &AlbumQuery) -> ApiResult<Vec<Album>> {
        let mut params = query.list.to_params();
        if let Some(album_type) = query.album_type.as_deref().filter(|t| !t.is_empty()) {
            params.push(("album_type", album_type.to_string()));
        }
        self.get_json("/api/albums/", &params).await
    }

    async fn get_album(&self, id: EntityId) -> ApiResult<Album> {
        self.get_json(&format!("/api/albums/{}", id), &[]).await
    }

    async fn create_album(&self, payload: &AlbumPayload) -> ApiResult<Album> {
        self.send_json(Method::POST, "/api/albums/", payload).await
    }

    async fn update_album(&self, id: EntityId, payload: &AlbumPayload) -> ApiResult<Album> {
        self.send_json(Method::PUT, &format!("/api/albums/{}", id), payload)
            .await
    }

    async fn delete_album(&self, id: EntityId) -> ApiResult<()> {
        self.delete_at(&format!("/api/albums/{}", id)).await
    }

    async fn upload_album_image(&self, file: &ImageFile) -> ApiResult<UploadedImage> {
        self.upload_multipart(UploadTarget::AlbumCover.backend_path(), file)
            .await
    }

    async fn albums_page_data(&self) -> ApiResult<AlbumsPageData> {
        self.get_json("/api/albums/page-data", &[]).await
    }
}

#[async_trait]
impl ImageUploader for ApiClient {
    async fn upload_image(&self, target: UploadTarget, file: &ImageFile) -> ApiResult<String> {
        let uploaded = match target {
            UploadTarget::ComposerPortrait => self.upload_composer_image(file).await?,
            UploadTarget::AlbumCover => self.upload_album_image(file).await?,
        };
        Ok(uploaded.image_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(DEFAULT_API_URL, None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_trailing_slash_removal() {
        let client = ApiClient::new("http://localhost:8000/", Some(30)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url("/api/composers/"),
            "http://localhost:8000/api/composers/"
        );
    }

    #[test]
    fn test_push_id_skips_missing_filters() {
        let mut params = Vec::new();
        push_id(&mut params, "composer_id", None);
        push_id(&mut params, "artist_id", Some(12));
        assert_eq!(params, vec![("artist_id", "12".to_string())]);
    }
}
