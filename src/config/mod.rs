mod file_config;

pub use file_config::{FileConfig, ImageUploadConfig};

use crate::api::DEFAULT_API_URL;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// Where uploaded images end up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ImageUploadMode {
    /// The backend's own upload endpoints.
    #[default]
    Backend,
    /// A third-party image CDN with an unsigned upload preset.
    ImageHost,
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub api_url: Option<String>,
    pub request_timeout_sec: Option<u64>,
    pub list_limit: Option<u32>,
    pub page_size: Option<u32>,
    pub state_dir: Option<PathBuf>,
    pub image_upload_mode: ImageUploadMode,
    pub cloud_name: Option<String>,
    pub upload_preset: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    /// `None` leaves requests without a timeout.
    pub request_timeout_sec: Option<u64>,
    /// Limit used when a page needs "everything" for cross-referencing.
    pub list_limit: u32,
    /// Limit used for the primary list of a page.
    pub page_size: u32,
    /// Navigation state directory; `None` keeps state in memory.
    pub state_dir: Option<PathBuf>,
    pub image_upload: ImageUploadSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUploadSettings {
    pub mode: ImageUploadMode,
    pub cloud_name: Option<String>,
    pub upload_preset: Option<String>,
    pub folder: Option<String>,
}

pub const DEFAULT_LIST_LIMIT: u32 = 1000;
pub const DEFAULT_PAGE_SIZE: u32 = 100;

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let api_url = file
            .api_url
            .or_else(|| cli.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            bail!("api_url must start with http:// or https://, got {:?}", api_url);
        }

        let request_timeout_sec = file.request_timeout_sec.or(cli.request_timeout_sec);
        if request_timeout_sec == Some(0) {
            bail!("request_timeout_sec must be greater than zero");
        }

        let list_limit = file
            .list_limit
            .or(cli.list_limit)
            .unwrap_or(DEFAULT_LIST_LIMIT);
        let page_size = file.page_size.or(cli.page_size).unwrap_or(DEFAULT_PAGE_SIZE);
        if list_limit == 0 || page_size == 0 {
            bail!("list_limit and page_size must be greater than zero");
        }

        let state_dir = file
            .state_dir
            .map(PathBuf::from)
            .or_else(|| cli.state_dir.clone());
        if let Some(dir) = &state_dir {
            if dir.exists() && !dir.is_dir() {
                bail!("state_dir is not a directory: {:?}", dir);
            }
        }

        // Image upload settings - [image_upload] section merged over CLI flags
        let upload_file = file.image_upload.unwrap_or_default();
        let mode = match upload_file.mode {
            Some(s) => match parse_upload_mode(&s) {
                Some(mode) => mode,
                None => bail!("Unknown image_upload.mode: {:?}", s),
            },
            None => cli.image_upload_mode,
        };
        let image_upload = ImageUploadSettings {
            mode,
            cloud_name: upload_file.cloud_name.or_else(|| cli.cloud_name.clone()),
            upload_preset: upload_file
                .upload_preset
                .or_else(|| cli.upload_preset.clone()),
            folder: upload_file.folder,
        };
        if image_upload.mode == ImageUploadMode::ImageHost
            && (image_upload.cloud_name.is_none() || image_upload.upload_preset.is_none())
        {
            bail!("image-host upload mode requires both cloud_name and upload_preset");
        }

        Ok(Self {
            api_url,
            request_timeout_sec,
            list_limit,
            page_size,
            state_dir,
            image_upload,
        })
    }
}

/// Parses an upload mode string using clap's ValueEnum names.
fn parse_upload_mode(s: &str) -> Option<ImageUploadMode> {
    ImageUploadMode::from_str(s, true).ok()
}
