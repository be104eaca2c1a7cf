//! Client-side wiring against a [`TestServer`](super::TestServer).

use classical_catalog_admin::api::{ApiClient, ImageHostClient, ImageUploader};
use classical_catalog_admin::nav_state::{MemoryStateStore, StateStore};
use classical_catalog_admin::pages::{AutoConfirm, PageContext};
use std::sync::Arc;

use super::constants::{IMAGE_HOST_CLOUD, IMAGE_HOST_PRESET};

pub fn api_client(base_url: &str) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(base_url, Some(5)).expect("Failed to create API client"))
}

/// Image host client whose uploads land on the mock backend.
pub fn image_host_client(base_url: &str, preset: Option<&str>) -> ImageHostClient {
    ImageHostClient::with_upload_base(
        base_url,
        Some(IMAGE_HOST_CLOUD.to_string()),
        Some(preset.unwrap_or(IMAGE_HOST_PRESET).to_string()),
        None,
    )
}

/// Pages wired to the mock backend, uploading through the backend and
/// answering every delete prompt with `confirm`.
pub fn page_context(base_url: &str, confirm: bool) -> PageContext {
    page_context_with_store(base_url, confirm, Arc::new(MemoryStateStore::new()))
}

/// Same as [`page_context`], sharing `store` so handoffs can be observed.
pub fn page_context_with_store(
    base_url: &str,
    confirm: bool,
    store: Arc<dyn StateStore>,
) -> PageContext {
    let api = api_client(base_url);
    let uploader: Arc<dyn ImageUploader> = api.clone();
    PageContext::new(api, store, uploader, Arc::new(AutoConfirm(confirm)))
}
