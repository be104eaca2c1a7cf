//! Page controllers: one per resource list.
//!
//! A page owns its lists, a status banner and the modal for its form. All
//! backend access goes through [`PageContext`], so pages run unchanged
//! against the real client or a test double.

mod albums;
mod artists;
mod composers;
mod compositions;
mod recordings;

pub use albums::{AlbumEditor, AlbumsPage};
pub use artists::ArtistsPage;
pub use composers::ComposersPage;
pub use compositions::CompositionsPage;
pub use recordings::RecordingsPage;

use async_trait::async_trait;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{ApiResult, CatalogApi, ImageUploader};
use crate::config::{DEFAULT_LIST_LIMIT, DEFAULT_PAGE_SIZE};
use crate::forms::{Draft, FormMode, Modal};
use crate::nav_state::StateStore;

/// Blocking yes/no prompt in front of destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way (`--yes`, tests).
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Where a cross-page jump lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Composers,
    Compositions,
    Artists,
    Recordings,
    Albums,
}

/// Everything a page needs from the outside world.
#[derive(Clone)]
pub struct PageContext {
    pub api: Arc<dyn CatalogApi>,
    pub store: Arc<dyn StateStore>,
    pub uploader: Arc<dyn ImageUploader>,
    pub confirm: Arc<dyn Confirm>,
    /// Limit for "load everything" requests used for cross-referencing.
    pub list_limit: u32,
    /// Limit for a page's own primary list.
    pub page_size: u32,
}

impl PageContext {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        store: Arc<dyn StateStore>,
        uploader: Arc<dyn ImageUploader>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            api,
            store,
            uploader,
            confirm,
            list_limit: DEFAULT_LIST_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_limits(mut self, list_limit: u32, page_size: u32) -> Self {
        self.list_limit = list_limit;
        self.page_size = page_size;
        self
    }
}

/// Loading flag plus the single dismissible error banner of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl PageStatus {
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn fail(&mut self, err: impl Display) {
        let message = err.to_string();
        warn!("{}", message);
        self.error = Some(message);
    }

    pub(crate) fn clear(&mut self) {
        self.error = None;
    }
}

/// Sends a validated draft to the backend.
#[async_trait]
pub(crate) trait Persist: Draft {
    async fn persist(api: &dyn CatalogApi, mode: FormMode, payload: &Self::Payload)
        -> ApiResult<()>;
}

/// Validates the open draft and saves it.
///
/// A validation failure sets the banner and never reaches the backend. On
/// success the modal closes; on a backend failure it stays open with the
/// draft intact.
pub(crate) async fn submit_modal<D: Persist>(
    api: &dyn CatalogApi,
    modal: &mut Modal<D>,
    status: &mut PageStatus,
) -> bool {
    if modal.is_submitting() {
        return false;
    }
    let (Some(mode), Some(draft)) = (modal.mode(), modal.draft()) else {
        return false;
    };
    let payload = match draft.to_payload() {
        Ok(payload) => payload,
        Err(err) => {
            status.fail(err);
            return false;
        }
    };

    modal.begin_submit();
    match D::persist(api, mode, &payload).await {
        Ok(()) => {
            info!("Saved ({:?})", mode);
            modal.finish_submit(true);
            status.clear();
            true
        }
        Err(err) => {
            modal.finish_submit(false);
            status.fail(err);
            false
        }
    }
}
