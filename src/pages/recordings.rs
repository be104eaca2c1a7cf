use async_trait::async_trait;
use tracing::{info, warn};

use super::{submit_modal, PageContext, PageStatus, Persist, Route};
use crate::api::{
    AlbumQuery, ApiResult, CatalogApi, CompositionQuery, EntityId, ListQuery, Recording,
    RecordingPayload, RecordingQuery,
};
use crate::catalog_view::{sort_composers_by_name, CatalogView};
use crate::forms::{FormMode, Modal, RecordingDraft};
use crate::nav_state::{save_state, take_state, AlbumsPageState, RecordingsPageState};
use crate::search::{ArtistSearch, CompositionSearch, Key, SearchEvent};

#[async_trait]
impl Persist for RecordingDraft {
    async fn persist(
        api: &dyn CatalogApi,
        mode: FormMode,
        payload: &RecordingPayload,
    ) -> ApiResult<()> {
        match mode {
            FormMode::Create => api.create_recording(payload).await.map(|_| ()),
            FormMode::Edit(id) => api.update_recording(id, payload).await.map(|_| ()),
        }
    }
}

/// Recordings filtered by composition and/or performing artist.
///
/// The list stays empty until a composition or an artist is chosen; a
/// composer on its own only scopes the composition search, or narrows an
/// artist filter.
pub struct RecordingsPage {
    ctx: PageContext,
    pub status: PageStatus,
    /// Reference data for labels and pickers. Its `recordings` stay empty;
    /// the filtered list lives in `recordings`.
    pub catalog: CatalogView,
    pub recordings: Vec<Recording>,
    pub filter: CompositionSearch,
    pub artist_filter: ArtistSearch,
    pub modal: Modal<RecordingDraft>,
    /// Composition picker inside the form.
    pub modal_search: CompositionSearch,
    /// Search-to-add for the form's performer list.
    pub artist_picker: ArtistSearch,
}

impl RecordingsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            status: PageStatus::default(),
            catalog: CatalogView::default(),
            recordings: Vec::new(),
            filter: CompositionSearch::new(),
            artist_filter: ArtistSearch::new(),
            modal: Modal::Closed,
            modal_search: CompositionSearch::new(),
            artist_picker: ArtistSearch::new(),
        }
    }

    /// Loads reference data, then restores a handoff if one is waiting.
    ///
    /// Composers, artists and albums load as one batch; if any of them
    /// fails, nothing from the batch is kept.
    pub async fn mount(&mut self) {
        self.status.loading = true;
        if let Err(err) = self.load_reference_data().await {
            self.status.fail(err);
        }

        if let Some(state) = take_state::<RecordingsPageState>(self.ctx.store.as_ref()) {
            info!(
                "Restoring recordings for composition {:?}, artist {:?}",
                state.selected_composition_id, state.filter_artist_id
            );
            self.filter = CompositionSearch::with_selection(
                state.filter_composer_id,
                state.selected_composition_id,
            );
            self.artist_filter = ArtistSearch::with_selection(state.filter_artist_id);
            if let Some(artist) = state
                .filter_artist_id
                .and_then(|id| self.catalog.artist(id))
                .cloned()
            {
                self.artist_filter.select(&artist);
            }
            self.recordings = state.recordings;
        }
        self.status.loading = false;
    }

    async fn load_reference_data(&mut self) -> ApiResult<()> {
        let api = self.ctx.api.as_ref();
        let all = ListQuery::with_limit(self.ctx.list_limit);
        let albums_query = AlbumQuery {
            list: all.clone(),
            ..Default::default()
        };
        let (mut composers, artists, albums) = futures::try_join!(
            api.list_composers(&all),
            api.list_artists(&all),
            api.list_albums(&albums_query),
        )?;
        sort_composers_by_name(&mut composers);
        self.catalog.composers = composers;
        self.catalog.artists = artists;
        self.catalog.albums = albums;

        let compositions_query = CompositionQuery {
            list: all,
            composer_id: None,
        };
        self.catalog.compositions = api.list_compositions(&compositions_query).await?;
        Ok(())
    }

    /// Backend query for the current filters, or `None` when nothing that
    /// can list recordings is selected.
    fn current_query(&self) -> Option<RecordingQuery> {
        let composition_id = self.filter.composition_id();
        let artist_id = self.artist_filter.selected();
        if composition_id.is_none() && artist_id.is_none() {
            return None;
        }
        // A chosen composition already implies its composer.
        let composer_id = if composition_id.is_none() {
            self.filter.composer_id()
        } else {
            None
        };
        Some(RecordingQuery {
            list: ListQuery::with_limit(self.ctx.list_limit),
            composition_id,
            composer_id,
            artist_id,
        })
    }

    /// Re-fetches for the current filters and saves them as the page state.
    pub async fn refresh(&mut self) {
        let Some(query) = self.current_query() else {
            self.recordings.clear();
            self.status.clear();
            self.save();
            return;
        };
        match self.ctx.api.list_recordings(&query).await {
            Ok(recordings) => {
                info!("Loaded {} recordings", recordings.len());
                self.recordings = recordings;
                self.status.clear();
                self.save();
            }
            Err(err) => self.status.fail(err),
        }
    }

    fn save(&self) {
        save_state(
            self.ctx.store.as_ref(),
            &RecordingsPageState {
                selected_composition_id: self.filter.composition_id(),
                filter_composer_id: self.filter.composer_id(),
                filter_artist_id: self.artist_filter.selected(),
                recordings: self.recordings.clone(),
            },
        );
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Changing composer drops the chosen composition.
    pub async fn select_composer(&mut self, composer_id: Option<EntityId>) {
        self.filter.select_composer(composer_id);
        self.refresh().await;
    }

    pub fn set_composition_query(&mut self, query: &str) {
        self.filter.set_query(query, &self.catalog.compositions);
    }

    pub async fn select_composition(&mut self, composition_id: EntityId) {
        self.filter.select_composition(composition_id);
        self.refresh().await;
    }

    pub async fn composition_key(&mut self, key: Key) {
        if self.filter.handle_key(key).is_some() {
            self.refresh().await;
        }
    }

    /// Resets composer and composition; an artist filter, if any, remains.
    pub async fn clear_composition(&mut self) {
        self.filter.clear();
        self.refresh().await;
    }

    pub fn set_artist_query(&mut self, query: &str) {
        self.artist_filter.set_query(query, &self.catalog.artists, &[]);
    }

    pub async fn select_artist(&mut self, artist_id: EntityId) -> bool {
        let Some(artist) = self.catalog.artist(artist_id).cloned() else {
            self.status.fail(format!("Artist {} is not loaded", artist_id));
            return false;
        };
        self.artist_filter.select(&artist);
        self.refresh().await;
        true
    }

    pub async fn artist_key(&mut self, key: Key) {
        if self.artist_filter.handle_key(key).is_some() {
            self.refresh().await;
        }
    }

    pub async fn clear_artist(&mut self) {
        self.artist_filter.clear();
        self.refresh().await;
    }

    // =========================================================================
    // Form
    // =========================================================================

    pub fn open_create(&mut self) {
        self.modal.open_create();
        self.modal_search = CompositionSearch::new();
        self.artist_picker = ArtistSearch::new();
    }

    pub fn open_edit(&mut self, id: EntityId) -> bool {
        let Some(recording) = self.recordings.iter().find(|r| r.id == id) else {
            self.status.fail(format!("Recording {} is not in the list", id));
            return false;
        };
        let draft = RecordingDraft::from_recording(recording, &self.catalog.compositions);
        self.modal_search =
            CompositionSearch::with_selection(draft.composer_id, draft.composition_id);
        self.artist_picker = ArtistSearch::new();
        self.modal.open_edit(id, draft);
        true
    }

    pub fn form_select_composer(&mut self, composer_id: Option<EntityId>) {
        self.modal_search.select_composer(composer_id);
        if let Some(draft) = self.modal.draft_mut() {
            draft.select_composer(composer_id, &self.catalog.compositions);
        }
    }

    pub fn form_composition_query(&mut self, query: &str) {
        self.modal_search.set_query(query, &self.catalog.compositions);
    }

    pub fn form_select_composition(&mut self, composition_id: EntityId) {
        self.modal_search.select_composition(composition_id);
        if let Some(draft) = self.modal.draft_mut() {
            draft.composition_id = Some(composition_id);
        }
    }

    pub fn form_composition_key(&mut self, key: Key) {
        if let Some(SearchEvent::CompositionSelected(id)) = self.modal_search.handle_key(key) {
            if let Some(draft) = self.modal.draft_mut() {
                draft.composition_id = Some(id);
            }
        }
    }

    /// Suggests artists not already credited on the draft.
    pub fn artist_picker_query(&mut self, query: &str) {
        let chosen: Vec<EntityId> = self
            .modal
            .draft()
            .map(|d| d.artists.ids().to_vec())
            .unwrap_or_default();
        self.artist_picker.set_query(query, &self.catalog.artists, &chosen);
    }

    pub fn artist_picker_key(&mut self, key: Key) {
        if let Some(SearchEvent::ArtistSelected(id)) = self.artist_picker.handle_key(key) {
            self.add_artist(id);
        }
    }

    /// Credits an artist last and resets the picker.
    pub fn add_artist(&mut self, artist_id: EntityId) -> bool {
        let added = match self.modal.draft_mut() {
            Some(draft) => draft.artists.add(artist_id),
            None => false,
        };
        self.artist_picker.clear();
        added
    }

    pub fn remove_artist(&mut self, artist_id: EntityId) -> bool {
        self.modal
            .draft_mut()
            .is_some_and(|draft| draft.artists.remove(artist_id))
    }

    pub fn move_artist(&mut self, from: usize, to: usize) {
        if let Some(draft) = self.modal.draft_mut() {
            draft.artists.move_item(from, to);
        }
    }

    pub async fn submit(&mut self) -> bool {
        let saved = submit_modal(self.ctx.api.as_ref(), &mut self.modal, &mut self.status).await;
        if saved {
            self.refresh().await;
        }
        saved
    }

    pub async fn delete(&mut self, id: EntityId) -> bool {
        let label = self
            .recordings
            .iter()
            .find(|r| r.id == id)
            .map(|r| self.catalog.composition_label(r.composition_id))
            .unwrap_or_else(|| id.to_string());
        if !self
            .ctx
            .confirm
            .confirm(&format!("Delete recording of \"{}\"?", label))
        {
            return false;
        }
        match self.ctx.api.delete_recording(id).await {
            Ok(()) => {
                info!("Deleted recording {}", id);
                self.refresh().await;
                true
            }
            Err(err) => {
                self.status.fail(err);
                false
            }
        }
    }

    // =========================================================================
    // Albums
    // =========================================================================

    pub fn album_count(&self, recording_id: EntityId) -> usize {
        self.catalog.album_count_for_recording(recording_id)
    }

    /// Hands the album list to the albums page, filtered to one recording.
    pub async fn open_albums(&self, recording_id: EntityId) -> Route {
        let query = AlbumQuery {
            list: ListQuery::with_limit(self.ctx.list_limit),
            ..Default::default()
        };
        match self.ctx.api.list_albums(&query).await {
            Ok(albums) => save_state(
                self.ctx.store.as_ref(),
                &AlbumsPageState {
                    selected_recording_id: Some(recording_id),
                    selected_composition_id: None,
                    albums,
                },
            ),
            Err(err) => warn!("Failed to preload albums: {}", err),
        }
        Route::Albums
    }
}
