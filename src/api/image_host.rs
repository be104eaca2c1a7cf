//! Unsigned uploads to a third-party image CDN (Cloudinary-compatible API).

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::{debug, info};

use super::{ApiError, ApiResult, ImageFile, ImageUploader, UploadTarget};

pub const DEFAULT_UPLOAD_BASE: &str = "https://api.cloudinary.com";
const DELIVERY_BASE: &str = "https://res.cloudinary.com";

#[derive(Debug, Deserialize)]
pub struct HostedImage {
    pub secure_url: String,
    #[serde(default)]
    pub public_id: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub format: String,
}

/// Client for the image CDN's unsigned upload preset flow.
pub struct ImageHostClient {
    client: reqwest::Client,
    upload_base: String,
    cloud_name: Option<String>,
    upload_preset: Option<String>,
    /// Overrides the per-target folder when set.
    folder: Option<String>,
}

impl ImageHostClient {
    pub fn new(
        cloud_name: Option<String>,
        upload_preset: Option<String>,
        folder: Option<String>,
    ) -> Self {
        Self::with_upload_base(DEFAULT_UPLOAD_BASE, cloud_name, upload_preset, folder)
    }

    pub fn with_upload_base(
        upload_base: impl Into<String>,
        cloud_name: Option<String>,
        upload_preset: Option<String>,
        folder: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_base: upload_base.into().trim_end_matches('/').to_string(),
            cloud_name: cloud_name.filter(|s| !s.is_empty()),
            upload_preset: upload_preset.filter(|s| !s.is_empty()),
            folder: folder.filter(|s| !s.is_empty()),
        }
    }

    fn credentials(&self) -> ApiResult<(&str, &str)> {
        match (&self.cloud_name, &self.upload_preset) {
            (Some(cloud), Some(preset)) => Ok((cloud.as_str(), preset.as_str())),
            _ => Err(ApiError::Configuration(
                "Image host configuration missing: set cloud_name and upload_preset".to_string(),
            )),
        }
    }

    /// Uploads one image and returns the host's response.
    pub async fn upload(&self, file: &ImageFile, folder: Option<&str>) -> ApiResult<HostedImage> {
        let (cloud_name, preset) = self.credentials()?;

        if !file.is_image() {
            return Err(ApiError::InvalidFile("File must be an image".to_string()));
        }

        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type())?;
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", preset.to_string());
        if let Some(folder) = folder {
            form = form.text("folder", folder.to_string());
        }

        let url = format!("{}/v1_1/{}/image/upload", self.upload_base, cloud_name);
        debug!(url = %url, file = %file.file_name, "Uploading image to image host");

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(ApiError::from_status_body(status.as_u16(), &body));
        }

        let hosted: HostedImage = response.json().await?;
        info!(public_id = %hosted.public_id, "Image uploaded to image host");
        Ok(hosted)
    }

    /// Uploads all files concurrently; any failure fails the whole batch.
    pub async fn upload_many(
        &self,
        files: &[ImageFile],
        folder: Option<&str>,
    ) -> ApiResult<Vec<String>> {
        let uploads = files.iter().map(|file| self.upload(file, folder));
        let hosted = try_join_all(uploads).await?;
        Ok(hosted.into_iter().map(|h| h.secure_url).collect())
    }

    pub fn cloud_name(&self) -> Option<&str> {
        self.cloud_name.as_deref()
    }
}

#[async_trait]
impl ImageUploader for ImageHostClient {
    async fn upload_image(&self, target: UploadTarget, file: &ImageFile) -> ApiResult<String> {
        let folder = self
            .folder
            .clone()
            .unwrap_or_else(|| target.host_folder().to_string());
        Ok(self.upload(file, Some(&folder)).await?.secure_url)
    }
}

/// Delivery transformations supported by [`delivery_url`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// A number or `auto`.
    pub quality: Option<String>,
    /// One of `fill`, `fit`, `scale`, `crop`.
    pub crop: Option<String>,
}

impl ImageTransform {
    fn to_segment(&self) -> String {
        let mut parts = Vec::new();
        if let Some(w) = self.width {
            parts.push(format!("w_{}", w));
        }
        if let Some(h) = self.height {
            parts.push(format!("h_{}", h));
        }
        if let Some(q) = &self.quality {
            parts.push(format!("q_{}", q));
        }
        if let Some(c) = &self.crop {
            parts.push(format!("c_{}", c));
        }
        parts.join(",")
    }
}

/// Builds a delivery URL for an uploaded image.
pub fn delivery_url(
    cloud_name: &str,
    public_id: &str,
    transform: Option<&ImageTransform>,
) -> String {
    let base = format!("{}/{}/image/upload", DELIVERY_BASE, cloud_name);
    match transform.map(ImageTransform::to_segment) {
        Some(segment) if !segment.is_empty() => format!("{}/{}/{}", base, segment, public_id),
        _ => format!("{}/{}", base, public_id),
    }
}
