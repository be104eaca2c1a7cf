use async_trait::async_trait;
use tracing::{info, warn};

use super::{submit_modal, PageContext, PageStatus, Persist, Route};
use crate::api::{
    ApiResult, Artist, ArtistPayload, CatalogApi, EntityId, ListQuery, RecordingQuery,
};
use crate::forms::{ArtistDraft, FormMode, Modal};
use crate::nav_state::{save_state, take_state, ArtistsPageState, RecordingsPageState};

#[async_trait]
impl Persist for ArtistDraft {
    async fn persist(
        api: &dyn CatalogApi,
        mode: FormMode,
        payload: &ArtistPayload,
    ) -> ApiResult<()> {
        match mode {
            FormMode::Create => api.create_artist(payload).await.map(|_| ()),
            FormMode::Edit(id) => api.update_artist(id, payload).await.map(|_| ()),
        }
    }
}

pub struct ArtistsPage {
    ctx: PageContext,
    pub status: PageStatus,
    pub artists: Vec<Artist>,
    pub search_query: String,
    pub modal: Modal<ArtistDraft>,
}

impl ArtistsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            status: PageStatus::default(),
            artists: Vec::new(),
            search_query: String::new(),
            modal: Modal::Closed,
        }
    }

    /// Shows the last saved search immediately, then refreshes it.
    pub async fn mount(&mut self) {
        self.status.loading = true;
        if let Some(state) = take_state::<ArtistsPageState>(self.ctx.store.as_ref()) {
            self.search_query = state.search_query;
            self.artists = state.artists;
        }
        self.load().await;
        self.status.loading = false;
    }

    pub async fn load(&mut self) {
        let query =
            ListQuery::with_limit(self.ctx.page_size).search(Some(self.search_query.as_str()));
        match self.ctx.api.list_artists(&query).await {
            Ok(artists) => {
                info!("Loaded {} artists", artists.len());
                self.artists = artists;
                self.status.clear();
                save_state(
                    self.ctx.store.as_ref(),
                    &ArtistsPageState {
                        search_query: self.search_query.clone(),
                        artists: self.artists.clone(),
                    },
                );
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
        match self.artists.iter().find(|a| a.id == id) {
            Some(artist) => {
                self.modal.open_edit(id, ArtistDraft::from(artist));
                true
            }
            None => {
                self.status.fail(format!("Artist {} is not in the list", id));
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
        let name = self
            .artists
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| id.to_string());
        if !self
            .ctx
            .confirm
            .confirm(&format!("Delete artist \"{}\"?", name))
        {
            return false;
        }
        match self.ctx.api.delete_artist(id).await {
            Ok(()) => {
                info!("Deleted artist {}", id);
                self.load().await;
                true
            }
            Err(err) => {
                self.status.fail(err);
                false
            }
        }
    }

    /// Hands the artist's recordings to the recordings page.
    pub async fn open_recordings(&self, artist_id: EntityId) -> Route {
        let query = RecordingQuery {
            list: ListQuery::with_limit(self.ctx.list_limit),
            artist_id: Some(artist_id),
            ..Default::default()
        };
        match self.ctx.api.list_recordings(&query).await {
            Ok(recordings) => save_state(
                self.ctx.store.as_ref(),
                &RecordingsPageState {
                    selected_composition_id: None,
                    filter_composer_id: None,
                    filter_artist_id: Some(artist_id),
                    recordings,
                },
            ),
            Err(err) => warn!("Failed to preload recordings: {}", err),
        }
        Route::Recordings
    }
}
