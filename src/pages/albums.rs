use async_trait::async_trait;
use tracing::info;

use super::{submit_modal, PageContext, PageStatus, Persist};
use crate::api::{
    Album, AlbumPayload, ApiResult, CatalogApi, CompositionQuery, EntityId, ImageFile, ListQuery,
    Recording, RecordingQuery,
};
use crate::catalog_view::{sort_composers_by_name, CatalogView};
use crate::forms::{AlbumDraft, FormMode, FormResult, Modal};
use crate::nav_state::{save_state, take_state, AlbumsPageState};
use crate::search::{CompositionSearch, Key, RecordingSearch};

#[async_trait]
impl Persist for AlbumDraft {
    async fn persist(
        api: &dyn CatalogApi,
        mode: FormMode,
        payload: &AlbumPayload,
    ) -> ApiResult<()> {
        match mode {
            FormMode::Create => api.create_album(payload).await.map(|_| ()),
            FormMode::Edit(id) => api.update_album(id, payload).await.map(|_| ()),
        }
    }
}

/// Albums list, filtered in memory by recording or by composition.
pub struct AlbumsPage {
    ctx: PageContext,
    pub status: PageStatus,
    /// Everything `page-data` returns; artists are not part of it.
    pub catalog: CatalogView,
    pub selected_recording_id: Option<EntityId>,
    pub composition_filter: CompositionSearch,
    pub editor: Option<AlbumEditor>,
}

impl AlbumsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            status: PageStatus::default(),
            catalog: CatalogView::default(),
            selected_recording_id: None,
            composition_filter: CompositionSearch::new(),
            editor: None,
        }
    }

    /// Restores a handoff, then loads the combined page data. The handed
    /// off albums stay visible if that load fails.
    pub async fn mount(&mut self) {
        self.status.loading = true;
        if let Some(state) = take_state::<AlbumsPageState>(self.ctx.store.as_ref()) {
            self.selected_recording_id = state.selected_recording_id;
            self.composition_filter =
                CompositionSearch::with_selection(None, state.selected_composition_id);
            self.catalog.albums = state.albums;
        }
        self.load().await;

        // The composer is only known once compositions are loaded.
        if let Some(composition_id) = self.composition_filter.composition_id() {
            let composer_id = self.catalog.composition(composition_id).map(|c| c.composer_id);
            self.composition_filter =
                CompositionSearch::with_selection(composer_id, Some(composition_id));
        }
        self.status.loading = false;
    }

    pub async fn load(&mut self) {
        match self.ctx.api.albums_page_data().await {
            Ok(data) => {
                info!(
                    "Loaded {} albums, {} recordings",
                    data.albums.len(),
                    data.recordings.len()
                );
                let mut catalog = CatalogView::from(data);
                sort_composers_by_name(&mut catalog.composers);
                self.catalog = catalog;
                self.status.clear();
            }
            Err(err) => self.status.fail(err),
        }
    }

    /// Albums passing the active filter. A recording filter wins over a
    /// composition filter.
    pub fn visible_albums(&self) -> Vec<&Album> {
        if let Some(recording_id) = self.selected_recording_id {
            return self.catalog.albums_containing_recording(recording_id);
        }
        match self.composition_filter.composition_id() {
            Some(composition_id) => self.catalog.albums_containing_composition(composition_id),
            None => self.catalog.albums.iter().collect(),
        }
    }

    pub fn filter_by_recording(&mut self, recording_id: Option<EntityId>) {
        self.selected_recording_id = recording_id;
        self.save();
    }

    pub fn filter_composer(&mut self, composer_id: Option<EntityId>) {
        self.composition_filter.select_composer(composer_id);
        self.save();
    }

    pub fn set_composition_query(&mut self, query: &str) {
        self.composition_filter.set_query(query, &self.catalog.compositions);
    }

    pub fn filter_by_composition(&mut self, composition_id: EntityId) {
        self.composition_filter.select_composition(composition_id);
        self.save();
    }

    pub fn composition_key(&mut self, key: Key) {
        if self.composition_filter.handle_key(key).is_some() {
            self.save();
        }
    }

    pub fn clear_filters(&mut self) {
        self.selected_recording_id = None;
        self.composition_filter.clear();
        self.save();
    }

    fn save(&self) {
        save_state(
            self.ctx.store.as_ref(),
            &AlbumsPageState {
                selected_recording_id: self.selected_recording_id,
                selected_composition_id: self.composition_filter.composition_id(),
                albums: self.catalog.albums.clone(),
            },
        );
    }

    pub async fn open_create(&mut self) -> bool {
        self.open_editor(FormMode::Create).await
    }

    pub async fn open_edit(&mut self, id: EntityId) -> bool {
        self.open_editor(FormMode::Edit(id)).await
    }

    async fn open_editor(&mut self, mode: FormMode) -> bool {
        match AlbumEditor::open(self.ctx.clone(), mode).await {
            Ok(editor) => {
                self.editor = Some(editor);
                self.status.clear();
                true
            }
            Err(err) => {
                self.status.fail(err);
                false
            }
        }
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Saves the open editor; on success it closes and the list reloads.
    pub async fn submit_editor(&mut self) -> bool {
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        if !editor.submit().await {
            return false;
        }
        self.editor = None;
        self.load().await;
        true
    }

    pub async fn delete(&mut self, id: EntityId) -> bool {
        let album_type = self
            .catalog
            .album(id)
            .map(|a| a.album_type.clone())
            .unwrap_or_default();
        if !self
            .ctx
            .confirm
            .confirm(&format!("Delete {} album (ID: {})?", album_type, id))
        {
            return false;
        }
        match self.ctx.api.delete_album(id).await {
            Ok(()) => {
                info!("Deleted album {}", id);
                self.load().await;
                true
            }
            Err(err) => {
                self.status.fail(err);
                false
            }
        }
    }
}

/// Create/edit form for one album, with its own reference data.
pub struct AlbumEditor {
    ctx: PageContext,
    pub status: PageStatus,
    pub catalog: CatalogView,
    pub modal: Modal<AlbumDraft>,
    pub recording_search: RecordingSearch,
}

impl AlbumEditor {
    /// Loads recordings, composers, compositions and artists (plus the
    /// album itself when editing) in one batch.
    pub async fn open(ctx: PageContext, mode: FormMode) -> ApiResult<Self> {
        let api = ctx.api.as_ref();
        let all = ListQuery::with_limit(ctx.list_limit);
        let recordings_query = RecordingQuery {
            list: all.clone(),
            ..Default::default()
        };
        let compositions_query = CompositionQuery {
            list: all.clone(),
            composer_id: None,
        };

        let mut modal = Modal::Closed;
        let (recordings, mut composers, compositions, artists) = match mode {
            FormMode::Create => {
                let loaded = futures::try_join!(
                    api.list_recordings(&recordings_query),
                    api.list_composers(&all),
                    api.list_compositions(&compositions_query),
                    api.list_artists(&all),
                )?;
                modal.open_create();
                loaded
            }
            FormMode::Edit(id) => {
                let (recordings, composers, compositions, artists, album) = futures::try_join!(
                    api.list_recordings(&recordings_query),
                    api.list_composers(&all),
                    api.list_compositions(&compositions_query),
                    api.list_artists(&all),
                    api.get_album(id),
                )?;
                modal.open_edit(id, AlbumDraft::from(&album));
                (recordings, composers, compositions, artists)
            }
        };
        sort_composers_by_name(&mut composers);

        Ok(Self {
            ctx,
            status: PageStatus::default(),
            catalog: CatalogView {
                composers,
                compositions,
                artists,
                recordings,
                albums: Vec::new(),
            },
            modal,
            recording_search: RecordingSearch::new(),
        })
    }

    fn chosen(&self) -> &[EntityId] {
        self.modal.draft().map(|d| d.recordings.ids()).unwrap_or_default()
    }

    /// Recordings matching the search that are not on the album yet.
    pub fn available_recordings(&self) -> Vec<&Recording> {
        self.recording_search.available(&self.catalog.recordings, self.chosen())
    }

    /// Chosen recordings in track order, as display labels.
    pub fn track_labels(&self) -> Vec<String> {
        self.chosen()
            .iter()
            .map(|id| self.catalog.recording_label(*id))
            .collect()
    }

    // =========================================================================
    // Recording search
    // =========================================================================

    pub fn search_composer(&mut self, composer_id: Option<EntityId>) {
        self.recording_search.composition.select_composer(composer_id);
    }

    pub fn search_composition_query(&mut self, query: &str) {
        self.recording_search.composition.set_query(query, &self.catalog.compositions);
    }

    pub fn search_composition(&mut self, composition_id: EntityId) {
        self.recording_search.composition.select_composition(composition_id);
    }

    pub fn search_composition_key(&mut self, key: Key) {
        self.recording_search.composition.handle_key(key);
    }

    pub fn search_artist_query(&mut self, query: &str) {
        self.recording_search.artist.set_query(query, &self.catalog.artists, &[]);
    }

    pub fn search_artist(&mut self, artist_id: EntityId) -> bool {
        match self.catalog.artist(artist_id).cloned() {
            Some(artist) => {
                self.recording_search.artist.select(&artist);
                true
            }
            None => false,
        }
    }

    pub fn search_artist_key(&mut self, key: Key) {
        self.recording_search.artist.handle_key(key);
    }

    pub fn clear_search(&mut self) {
        self.recording_search.composition.clear();
        self.recording_search.artist.clear();
    }

    // =========================================================================
    // Draft edits
    // =========================================================================

    pub fn add_recording(&mut self, recording_id: EntityId) -> bool {
        self.modal
            .draft_mut()
            .is_some_and(|draft| draft.recordings.add(recording_id))
    }

    pub fn remove_recording(&mut self, recording_id: EntityId) -> bool {
        self.modal
            .draft_mut()
            .is_some_and(|draft| draft.recordings.remove(recording_id))
    }

    pub fn move_recording(&mut self, from: usize, to: usize) {
        if let Some(draft) = self.modal.draft_mut() {
            draft.recordings.move_item(from, to);
        }
    }

    pub fn toggle_album_type(&mut self, tag: &str) {
        if let Some(draft) = self.modal.draft_mut() {
            draft.toggle_album_type(tag);
        }
    }

    /// Adds picked image files; see [`crate::forms::ImageList::intake`].
    pub async fn add_images(&mut self, files: &[ImageFile]) -> bool {
        let Some(mode) = self.modal.mode() else {
            return false;
        };
        let Some(draft) = self.modal.draft_mut() else {
            return false;
        };
        match draft
            .images
            .intake(files, mode, self.ctx.uploader.as_ref())
            .await
        {
            Ok(added) => {
                info!("Added {} image(s)", added);
                self.status.clear();
                true
            }
            Err(err) => {
                self.status.fail(err);
                false
            }
        }
    }

    pub fn remove_image(&mut self, index: usize) -> bool {
        self.with_images(|draft| draft.images.remove(index).map(|_| ()))
    }

    pub fn set_primary_image(&mut self, index: usize) -> bool {
        self.with_images(|draft| draft.images.set_primary(index))
    }

    fn with_images(&mut self, edit: impl FnOnce(&mut AlbumDraft) -> FormResult<()>) -> bool {
        let Some(draft) = self.modal.draft_mut() else {
            return false;
        };
        match edit(draft) {
            Ok(()) => true,
            Err(err) => {
                self.status.fail(err);
                false
            }
        }
    }

    pub async fn submit(&mut self) -> bool {
        submit_modal(self.ctx.api.as_ref(), &mut self.modal, &mut self.status).await
    }
}
