use async_trait::async_trait;
use tracing::{info, warn};

use super::{submit_modal, PageContext, PageStatus, Persist, Route};
use crate::api::{
    ApiResult, CatalogApi, Composer, Composition, CompositionPayload, CompositionQuery, EntityId,
    ListQuery, RecordingQuery,
};
use crate::catalog_view::sort_composers_by_name;
use crate::forms::{CompositionDraft, FormMode, Modal};
use crate::nav_state::{save_state, take_state, CompositionsPageState, RecordingsPageState};

#[async_trait]
impl Persist for CompositionDraft {
    async fn persist(
        api: &dyn CatalogApi,
        mode: FormMode,
        payload: &CompositionPayload,
    ) -> ApiResult<()> {
        match mode {
            FormMode::Create => api.create_composition(payload).await.map(|_| ()),
            FormMode::Edit(id) => api.update_composition(id, payload).await.map(|_| ()),
        }
    }
}

/// Compositions of one composer at a time; nothing is listed until a
/// composer is picked.
pub struct CompositionsPage {
    ctx: PageContext,
    pub status: PageStatus,
    /// Sorted by short name, for the composer picker.
    pub composers: Vec<Composer>,
    pub compositions: Vec<Composition>,
    pub selected_composer_id: Option<EntityId>,
    pub search_query: String,
    pub modal: Modal<CompositionDraft>,
}

impl CompositionsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            status: PageStatus::default(),
            composers: Vec::new(),
            compositions: Vec::new(),
            selected_composer_id: None,
            search_query: String::new(),
            modal: Modal::Closed,
        }
    }

    /// Loads the composer picker, then picks up a handoff if one is waiting.
    pub async fn mount(&mut self) {
        self.status.loading = true;
        match self
            .ctx
            .api
            .list_composers(&ListQuery::with_limit(self.ctx.page_size))
            .await
        {
            Ok(mut composers) => {
                sort_composers_by_name(&mut composers);
                self.composers = composers;
            }
            Err(err) => self.status.fail(err),
        }

        if let Some(state) = take_state::<CompositionsPageState>(self.ctx.store.as_ref()) {
            info!(
                "Restoring compositions of composer {:?}",
                state.selected_composer_id
            );
            self.selected_composer_id = state.selected_composer_id;
            self.search_query = state.search_query;
            self.compositions = state.compositions;
        }
        self.status.loading = false;
    }

    /// Fetches for the current composer and search, then saves the view as
    /// the page's last state.
    pub async fn load(&mut self) {
        let search = Some(self.search_query.as_str());
        let Some(composer_id) = self.selected_composer_id else {
            self.compositions.clear();
            self.status.clear();
            self.save();
            return;
        };
        let query = CompositionQuery {
            list: ListQuery::with_limit(self.ctx.list_limit).search(search),
            composer_id: Some(composer_id),
        };
        match self.ctx.api.list_compositions(&query).await {
            Ok(compositions) => {
                self.compositions = compositions;
                self.status.clear();
                self.save();
            }
            Err(err) => self.status.fail(err),
        }
    }

    fn save(&self) {
        save_state(
            self.ctx.store.as_ref(),
            &CompositionsPageState {
                selected_composer_id: self.selected_composer_id,
                search_query: self.search_query.clone(),
                compositions: self.compositions.clone(),
            },
        );
    }

    pub async fn filter_by_composer(&mut self, composer_id: Option<EntityId>) {
        self.selected_composer_id = composer_id;
        self.load().await;
    }

    pub async fn search(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
        self.load().await;
    }

    /// The composer defaults to the filtered one, else the first in the picker.
    pub fn open_create(&mut self) {
        let composer_id = self
            .selected_composer_id
            .or_else(|| self.composers.first().map(|c| c.id));
        self.modal
            .open_create_with(CompositionDraft::for_composer(composer_id));
    }

    pub fn open_edit(&mut self, id: EntityId) -> bool {
        match self.compositions.iter().find(|c| c.id == id) {
            Some(composition) => {
                self.modal.open_edit(id, CompositionDraft::from(composition));
                true
            }
            None => {
                self.status.fail(format!("Composition {} is not in the list", id));
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

    pub async fn delete(&mut self, id: EntityId) -> bool {
        let title = self
            .compositions
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| id.to_string());
        if !self
            .ctx
            .confirm
            .confirm(&format!("Delete composition \"{}\"?", title))
        {
            return false;
        }
        match self.ctx.api.delete_composition(id).await {
            Ok(()) => {
                info!("Deleted composition {}", id);
                self.load().await;
                true
            }
            Err(err) => {
                self.status.fail(err);
                false
            }
        }
    }

    /// Hands the recordings of one composition to the recordings page.
    pub async fn open_recordings(&self, composition_id: EntityId) -> Route {
        let query = RecordingQuery {
            list: ListQuery::with_limit(self.ctx.list_limit),
            composition_id: Some(composition_id),
            ..Default::default()
        };
        let composer_id = self
            .compositions
            .iter()
            .find(|c| c.id == composition_id)
            .map(|c| c.composer_id)
            .or(self.selected_composer_id);
        match self.ctx.api.list_recordings(&query).await {
            Ok(recordings) => save_state(
                self.ctx.store.as_ref(),
                &RecordingsPageState {
                    selected_composition_id: Some(composition_id),
                    filter_composer_id: composer_id,
                    filter_artist_id: None,
                    recordings,
                },
            ),
            Err(err) => warn!("Failed to preload recordings: {}", err),
        }
        Route::Recordings
    }
}
