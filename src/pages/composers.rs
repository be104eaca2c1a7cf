use async_trait::async_trait;
use tracing::{info, warn};

use super::{submit_modal, PageContext, PageStatus, Persist, Route};
use crate::api::{
    ApiResult, CatalogApi, Composer, ComposerPayload, CompositionQuery, EntityId, ImageFile,
    ListQuery, UploadTarget, MAX_PORTRAIT_BYTES,
};
use crate::forms::{ComposerDraft, FormMode, Modal};
use crate::nav_state::{save_state, CompositionsPageState};

#[async_trait]
impl Persist for ComposerDraft {
    async fn persist(
        api: &dyn CatalogApi,
        mode: FormMode,
        payload: &ComposerPayload,
    ) -> ApiResult<()> {
        match mode {
            FormMode::Create => api.create_composer(payload).await.map(|_| ()),
            FormMode::Edit(id) => api.update_composer(id, payload).await.map(|_| ()),
        }
    }
}

pub struct ComposersPage {
    ctx: PageContext,
    pub status: PageStatus,
    pub composers: Vec<Composer>,
    pub search_query: String,
    pub modal: Modal<ComposerDraft>,
}

impl ComposersPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            status: PageStatus::default(),
            composers: Vec::new(),
            search_query: String::new(),
            modal: Modal::Closed,
        }
    }

    pub async fn mount(&mut self) {
        self.status.loading = true;
        self.load().await;
        self.status.loading = false;
    }

    /// Re-fetches with the current search term. Failures keep the old list.
    pub async fn load(&mut self) {
        let query =
            ListQuery::with_limit(self.ctx.page_size).search(Some(self.search_query.as_str()));
        match self.ctx.api.list_composers(&query).await {
            Ok(composers) => {
                info!("Loaded {} composers", composers.len());
                self.composers = composers;
                self.status.clear();
            }
            Err(err) => self.status.fail(err),
        }
    }

    pub async fn search(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
        self.load().await;
    }

    pub fn open_create(&mut self) {
        self.modal.open_create();
    }

    pub fn open_edit(&mut self, id: EntityId) -> bool {
        match self.composers.iter().find(|c| c.id == id) {
            Some(composer) => {
                self.modal.open_edit(id, ComposerDraft::from(composer));
                true
            }
            None => {
                self.status.fail(format!("Composer {} is not in the list", id));
                false
            }
        }
    }

    pub async fn submit(&mut self) -> bool {
        let saved = submit_modal(self.ctx.api.as_ref(), &mut self.modal, &mut self.status).await;
        if saved {
            self.load().await;
        }
        saved
    }

    /// Validates and uploads a portrait, then stores its reference in the
    /// open draft.
    pub async fn upload_portrait(&mut self, file: &ImageFile) -> bool {
        if !self.modal.is_open() {
            return false;
        }
        if let Err(err) = file.validate_for_upload(MAX_PORTRAIT_BYTES) {
            self.status.fail(err);
            return false;
        }
        let uploaded = self
            .ctx
            .uploader
            .upload_image(UploadTarget::ComposerPortrait, file)
            .await;
        match uploaded {
            Ok(reference) => {
                if let Some(draft) = self.modal.draft_mut() {
                    draft.image_url = reference;
                }
                self.status.clear();
                true
            }
            Err(err) => {
                self.status.fail(err);
                false
            }
        }
    }

    pub async fn delete(&mut self, id: EntityId) -> bool {
        let name = self
            .composers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string());
        if !self
            .ctx
            .confirm
            .confirm(&format!("Delete composer \"{}\"?", name))
        {
            return false;
        }
        match self.ctx.api.delete_composer(id).await {
            Ok(()) => {
                info!("Deleted composer {}", id);
                self.load().await;
                true
            }
            Err(err) => {
                self.status.fail(err);
                false
            }
        }
    }

    /// Precomputes the compositions list for `composer_id` and hands it to
    /// the compositions page. A failed fetch still navigates.
    pub async fn open_compositions(&self, composer_id: EntityId) -> Route {
        let query = CompositionQuery {
            list: ListQuery::with_limit(self.ctx.list_limit),
            composer_id: Some(composer_id),
        };
        match self.ctx.api.list_compositions(&query).await {
            Ok(compositions) => save_state(
                self.ctx.store.as_ref(),
                &CompositionsPageState {
                    selected_composer_id: Some(composer_id),
                    search_query: String::new(),
                    compositions,
                },
            ),
            Err(err) => warn!("Failed to preload compositions: {}", err),
        }
        Route::Compositions
    }
}
