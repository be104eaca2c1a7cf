//! Mock catalog backend
//!
//! An in-memory implementation of the REST contract served by axum on a
//! random port. Every request is logged, and individual requests can be
//! made to fail once with a chosen status and body.

use super::constants::*;
use super::fixtures::seed_catalog;
use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use classical_catalog_admin::api::{
    Album, AlbumCustomUrl, AlbumImage, AlbumPayload, AlbumsPageData, Artist, ArtistPayload,
    Composer, ComposerPayload, Composition, CompositionPayload, EntityId, Recording,
    RecordingPayload,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

type Shared = Arc<Mutex<Backend>>;
type HandlerError = (StatusCode, Json<Value>);
type HandlerResult<T> = Result<Json<T>, HandlerError>;

struct Failure {
    method: Method,
    path: String,
    status: StatusCode,
    body: String,
}

/// Backend data plus the request log.
#[derive(Default)]
pub struct Backend {
    pub composers: Vec<Composer>,
    pub compositions: Vec<Composition>,
    pub artists: Vec<Artist>,
    pub recordings: Vec<Recording>,
    pub albums: Vec<Album>,
    /// `METHOD /path?query` for every request received.
    pub requests: Vec<String>,
    /// File names received by any upload endpoint.
    pub uploads: Vec<String>,
    failures: Vec<Failure>,
    next_id: EntityId,
}

impl Backend {
    pub fn set_next_id(&mut self, next_id: EntityId) {
        self.next_id = next_id;
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn take_failure(&mut self, method: &Method, path: &str) -> Option<(StatusCode, String)> {
        let index = self
            .failures
            .iter()
            .position(|f| &f.method == method && f.path == path)?;
        let failure = self.failures.remove(index);
        Some((failure.status, failure.body))
    }

    fn composer_with_counts(&self, composer: &Composer) -> Composer {
        let mut composer = composer.clone();
        composer.composition_count = self
            .compositions
            .iter()
            .filter(|c| c.composer_id == composer.id)
            .count() as u32;
        composer
    }

    fn composition_with_counts(&self, composition: &Composition) -> Composition {
        let mut composition = composition.clone();
        composition.recording_count = self
            .recordings
            .iter()
            .filter(|r| r.composition_id == composition.id)
            .count() as u32;
        composition
    }

    fn artist_with_counts(&self, artist: &Artist) -> Artist {
        let mut artist = artist.clone();
        artist.recording_count = self
            .recordings
            .iter()
            .filter(|r| r.artists.iter().any(|a| a.id == artist.id))
            .count() as u32;
        artist
    }

    fn resolve_artists(&self, ids: &[EntityId]) -> Result<Vec<Artist>, HandlerError> {
        ids.iter()
            .map(|id| {
                self.artists
                    .iter()
                    .find(|a| a.id == *id)
                    .cloned()
                    .ok_or_else(|| bad_request(&format!("Artist {} does not exist", id)))
            })
            .collect()
    }

    fn resolve_recordings(&self, ids: &[EntityId]) -> Result<Vec<Recording>, HandlerError> {
        ids.iter()
            .map(|id| {
                self.recordings
                    .iter()
                    .find(|r| r.id == *id)
                    .cloned()
                    .ok_or_else(|| bad_request(&format!("Recording {} does not exist", id)))
            })
            .collect()
    }

    fn build_album(&mut self, id: EntityId, payload: AlbumPayload) -> Result<Album, HandlerError> {
        let recordings = self.resolve_recordings(&payload.recording_ids)?;
        let images = payload
            .image_urls
            .into_iter()
            .enumerate()
            .map(|(index, image_url)| AlbumImage {
                id: self.allocate_id(),
                album_id: id,
                image_url,
                is_primary: (payload.primary_image_index == Some(index)) as i64,
            })
            .collect();
        let custom_urls = payload
            .custom_urls
            .into_iter()
            .map(|url| AlbumCustomUrl {
                id: self.allocate_id(),
                album_id: id,
                url_name: url.url_name,
                url: url.url,
                url_order: url.url_order,
            })
            .collect();
        Ok(Album {
            id,
            album_type: payload.album_type,
            discogs_url: payload.discogs_url,
            goclassic_url: payload.goclassic_url,
            memo: payload.memo,
            recordings,
            images,
            custom_urls,
        })
    }
}

fn not_found(what: &str) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": format!("{} not found", what) })),
    )
}

fn bad_request(detail: &str) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail })))
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    skip: Option<usize>,
    limit: Option<usize>,
    search: Option<String>,
    composer_id: Option<EntityId>,
    composition_id: Option<EntityId>,
    artist_id: Option<EntityId>,
    album_type: Option<String>,
}

impl ListParams {
    fn page<T>(&self, items: impl Iterator<Item = T>) -> Vec<T> {
        items
            .skip(self.skip.unwrap_or(0))
            .take(self.limit.unwrap_or(100))
            .collect()
    }

    fn matches(&self, fields: &[Option<&str>]) -> bool {
        let Some(search) = self.search.as_deref() else {
            return true;
        };
        let needle = search.to_lowercase();
        fields
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Mock backend instance on a random port.
///
/// When dropped, the server shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    state: Shared,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a backend seeded with the test catalog.
    pub async fn spawn() -> Self {
        Self::spawn_with(seed_catalog()).await
    }

    /// Spawns a backend with no data at all.
    pub async fn spawn_empty() -> Self {
        let mut backend = Backend::default();
        backend.set_next_id(1);
        Self::spawn_with(backend).await
    }

    async fn spawn_with(backend: Backend) -> Self {
        let state: Shared = Arc::new(Mutex::new(backend));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let app = make_app(state.clone());
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Mock backend failed");
        });

        TestServer {
            base_url,
            state,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Makes the next `method path` request fail with `status` and a raw body.
    pub fn fail_next(&self, method: Method, path: &str, status: StatusCode, body: &str) {
        self.state.lock().unwrap().failures.push(Failure {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests whose `METHOD /path` starts with `prefix`.
    pub fn requests_matching(&self, prefix: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.starts_with(prefix))
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn uploads(&self) -> Vec<String> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn album(&self, id: EntityId) -> Option<Album> {
        let backend = self.state.lock().unwrap();
        backend.albums.iter().find(|a| a.id == id).cloned()
    }

    pub fn recording(&self, id: EntityId) -> Option<Recording> {
        let backend = self.state.lock().unwrap();
        backend.recordings.iter().find(|r| r.id == id).cloned()
    }

    pub fn composer(&self, id: EntityId) -> Option<Composer> {
        let backend = self.state.lock().unwrap();
        backend.composers.iter().find(|c| c.id == id).cloned()
    }

    pub fn recordings_of(&self, composition_id: EntityId) -> Vec<Recording> {
        let backend = self.state.lock().unwrap();
        backend
            .recordings
            .iter()
            .filter(|r| r.composition_id == composition_id)
            .cloned()
            .collect()
    }

    pub fn compositions_of(&self, composer_id: EntityId) -> Vec<Composition> {
        let backend = self.state.lock().unwrap();
        backend
            .compositions
            .iter()
            .filter(|c| c.composer_id == composer_id)
            .cloned()
            .collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn make_app(state: Shared) -> Router {
    Router::new()
        .route("/api/composers/", get(list_composers).post(create_composer))
        .route("/api/composers/upload-image", post(upload_composer_image))
        .route(
            "/api/composers/{id}",
            get(get_composer)
                .put(update_composer)
                .delete(delete_composer),
        )
        .route(
            "/api/compositions/",
            get(list_compositions).post(create_composition),
        )
        .route(
            "/api/compositions/{id}",
            get(get_composition)
                .put(update_composition)
                .delete(delete_composition),
        )
        .route("/api/artists/", get(list_artists).post(create_artist))
        .route(
            "/api/artists/{id}",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
        .route(
            "/api/recordings/",
            get(list_recordings).post(create_recording),
        )
        .route(
            "/api/recordings/{id}",
            get(get_recording)
                .put(update_recording)
                .delete(delete_recording),
        )
        .route("/api/albums/", get(list_albums).post(create_album))
        .route("/api/albums/page-data", get(albums_page_data))
        .route("/api/albums/upload-image", post(upload_album_image))
        .route(
            "/api/albums/{id}",
            get(get_album).put(update_album).delete(delete_album),
        )
        .route("/v1_1/{cloud}/image/upload", post(image_host_upload))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            record_and_inject_failures,
        ))
        .with_state(state)
}

async fn record_and_inject_failures(
    State(state): State<Shared>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let entry = match request.uri().query() {
        Some(query) => format!("{} {}?{}", method, path, query),
        None => format!("{} {}", method, path),
    };
    let failure = {
        let mut backend = state.lock().unwrap();
        backend.requests.push(entry);
        backend.take_failure(&method, &path)
    };
    match failure {
        Some((status, body)) => (status, body).into_response(),
        None => next.run(request).await,
    }
}

// =============================================================================
// Composers
// =============================================================================

async fn list_composers(
    State(state): State<Shared>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Composer>> {
    let backend = state.lock().unwrap();
    let matching = backend
        .composers
        .iter()
        .filter(|c| params.matches(&[Some(&c.name), Some(&c.full_name)]))
        .map(|c| backend.composer_with_counts(c));
    Json(params.page(matching))
}

async fn get_composer(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
) -> HandlerResult<Composer> {
    let backend = state.lock().unwrap();
    backend
        .composers
        .iter()
        .find(|c| c.id == id)
        .map(|c| Json(backend.composer_with_counts(c)))
        .ok_or_else(|| not_found("Composer"))
}

async fn create_composer(
    State(state): State<Shared>,
    Json(payload): Json<ComposerPayload>,
) -> HandlerResult<Composer> {
    let mut backend = state.lock().unwrap();
    let composer = Composer {
        id: backend.allocate_id(),
        full_name: payload.full_name,
        name: payload.name,
        birth_year: payload.birth_year,
        death_year: payload.death_year,
        nationality: payload.nationality,
        image_url: payload.image_url,
        composition_count: 0,
    };
    backend.composers.push(composer.clone());
    Ok(Json(composer))
}

async fn update_composer(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
    Json(payload): Json<ComposerPayload>,
) -> HandlerResult<Composer> {
    let mut backend = state.lock().unwrap();
    let composer = backend
        .composers
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found("Composer"))?;
    composer.full_name = payload.full_name;
    composer.name = payload.name;
    composer.birth_year = payload.birth_year;
    composer.death_year = payload.death_year;
    composer.nationality = payload.nationality;
    composer.image_url = payload.image_url;
    let composer = composer.clone();
    Ok(Json(backend.composer_with_counts(&composer)))
}

async fn delete_composer(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
) -> HandlerResult<Value> {
    let mut backend = state.lock().unwrap();
    if !backend.composers.iter().any(|c| c.id == id) {
        return Err(not_found("Composer"));
    }
    if backend.compositions.iter().any(|c| c.composer_id == id) {
        return Err(bad_request("Composer has compositions and cannot be deleted"));
    }
    backend.composers.retain(|c| c.id != id);
    Ok(Json(json!({ "ok": true })))
}

async fn upload_composer_image(
    State(state): State<Shared>,
    multipart: Multipart,
) -> HandlerResult<Value> {
    let file_name = receive_file(&state, multipart).await?;
    Ok(Json(
        json!({ "image_url": format!("/uploads/composers/{}", file_name) }),
    ))
}

// =============================================================================
// Compositions
// =============================================================================

async fn list_compositions(
    State(state): State<Shared>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Composition>> {
    let backend = state.lock().unwrap();
    let matching = backend
        .compositions
        .iter()
        .filter(|c| params.composer_id.map_or(true, |id| c.composer_id == id))
        .filter(|c| params.matches(&[Some(&c.title), c.catalog_number.as_deref()]))
        .map(|c| backend.composition_with_counts(c));
    Json(params.page(matching))
}

async fn get_composition(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
) -> HandlerResult<Composition> {
    let backend = state.lock().unwrap();
    backend
        .compositions
        .iter()
        .find(|c| c.id == id)
        .map(|c| Json(backend.composition_with_counts(c)))
        .ok_or_else(|| not_found("Composition"))
}

async fn create_composition(
    State(state): State<Shared>,
    Json(payload): Json<CompositionPayload>,
) -> HandlerResult<Composition> {
    let mut backend = state.lock().unwrap();
    if !backend.composers.iter().any(|c| c.id == payload.composer_id) {
        return Err(bad_request("Composer does not exist"));
    }
    let composition = Composition {
        id: backend.allocate_id(),
        composer_id: payload.composer_id,
        catalog_number: payload.catalog_number,
        sort_order: None,
        title: payload.title,
        recording_count: 0,
    };
    backend.compositions.push(composition.clone());
    Ok(Json(composition))
}

async fn update_composition(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
    Json(payload): Json<CompositionPayload>,
) -> HandlerResult<Composition> {
    let mut backend = state.lock().unwrap();
    let composition = backend
        .compositions
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found("Composition"))?;
    composition.composer_id = payload.composer_id;
    composition.catalog_number = payload.catalog_number;
    composition.title = payload.title;
    let composition = composition.clone();
    Ok(Json(backend.composition_with_counts(&composition)))
}

async fn delete_composition(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
) -> HandlerResult<Value> {
    let mut backend = state.lock().unwrap();
    if !backend.compositions.iter().any(|c| c.id == id) {
        return Err(not_found("Composition"));
    }
    if backend.recordings.iter().any(|r| r.composition_id == id) {
        return Err(bad_request("Composition has recordings and cannot be deleted"));
    }
    backend.compositions.retain(|c| c.id != id);
    Ok(Json(json!({ "ok": true })))
}

// =============================================================================
// Artists
// =============================================================================

async fn list_artists(
    State(state): State<Shared>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Artist>> {
    let backend = state.lock().unwrap();
    let matching = backend
        .artists
        .iter()
        .filter(|a| params.matches(&[Some(&a.name), a.instrument.as_deref()]))
        .map(|a| backend.artist_with_counts(a));
    Json(params.page(matching))
}

async fn get_artist(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
) -> HandlerResult<Artist> {
    let backend = state.lock().unwrap();
    backend
        .artists
        .iter()
        .find(|a| a.id == id)
        .map(|a| Json(backend.artist_with_counts(a)))
        .ok_or_else(|| not_found("Artist"))
}

async fn create_artist(
    State(state): State<Shared>,
    Json(payload): Json<ArtistPayload>,
) -> HandlerResult<Artist> {
    let mut backend = state.lock().unwrap();
    let artist = Artist {
        id: backend.allocate_id(),
        name: payload.name,
        birth_year: payload.birth_year,
        death_year: payload.death_year,
        nationality: payload.nationality,
        instrument: payload.instrument,
        recording_count: 0,
    };
    backend.artists.push(artist.clone());
    Ok(Json(artist))
}

async fn update_artist(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
    Json(payload): Json<ArtistPayload>,
) -> HandlerResult<Artist> {
    let mut backend = state.lock().unwrap();
    let artist = backend
        .artists
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| not_found("Artist"))?;
    artist.name = payload.name;
    artist.birth_year = payload.birth_year;
    artist.death_year = payload.death_year;
    artist.nationality = payload.nationality;
    artist.instrument = payload.instrument;
    let artist = artist.clone();
    Ok(Json(backend.artist_with_counts(&artist)))
}

async fn delete_artist(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
) -> HandlerResult<Value> {
    let mut backend = state.lock().unwrap();
    if !backend.artists.iter().any(|a| a.id == id) {
        return Err(not_found("Artist"));
    }
    backend.artists.retain(|a| a.id != id);
    for recording in backend.recordings.iter_mut() {
        recording.artists.retain(|a| a.id != id);
    }
    Ok(Json(json!({ "ok": true })))
}

// =============================================================================
// Recordings
// =============================================================================

async fn list_recordings(
    State(state): State<Shared>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Recording>> {
    let backend = state.lock().unwrap();
    let composer_of = |composition_id: EntityId| {
        backend
            .compositions
            .iter()
            .find(|c| c.id == composition_id)
            .map(|c| c.composer_id)
    };
    let matching = backend
        .recordings
        .iter()
        .filter(|r| params.composition_id.map_or(true, |id| r.composition_id == id))
        .filter(|r| {
            params
                .composer_id
                .map_or(true, |id| composer_of(r.composition_id) == Some(id))
        })
        .filter(|r| {
            params
                .artist_id
                .map_or(true, |id| r.artists.iter().any(|a| a.id == id))
        })
        .cloned();
    Json(params.page(matching))
}

async fn get_recording(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
) -> HandlerResult<Recording> {
    let backend = state.lock().unwrap();
    backend
        .recordings
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Recording"))
}

async fn create_recording(
    State(state): State<Shared>,
    Json(payload): Json<RecordingPayload>,
) -> HandlerResult<Recording> {
    let mut backend = state.lock().unwrap();
    if !backend.compositions.iter().any(|c| c.id == payload.composition_id) {
        return Err(bad_request("Composition does not exist"));
    }
    let artists = backend.resolve_artists(&payload.artist_ids)?;
    let recording = Recording {
        id: backend.allocate_id(),
        composition_id: payload.composition_id,
        year: payload.year,
        memo: payload.memo,
        artists,
    };
    backend.recordings.push(recording.clone());
    Ok(Json(recording))
}

async fn update_recording(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
    Json(payload): Json<RecordingPayload>,
) -> HandlerResult<Recording> {
    let mut backend = state.lock().unwrap();
    let artists = backend.resolve_artists(&payload.artist_ids)?;
    let recording = backend
        .recordings
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| not_found("Recording"))?;
    recording.composition_id = payload.composition_id;
    recording.year = payload.year;
    recording.memo = payload.memo;
    recording.artists = artists;
    Ok(Json(recording.clone()))
}

async fn delete_recording(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
) -> HandlerResult<Value> {
    let mut backend = state.lock().unwrap();
    if !backend.recordings.iter().any(|r| r.id == id) {
        return Err(not_found("Recording"));
    }
    backend.recordings.retain(|r| r.id != id);
    for album in backend.albums.iter_mut() {
        album.recordings.retain(|r| r.id != id);
    }
    Ok(Json(json!({ "ok": true })))
}

// =============================================================================
// Albums
// =============================================================================

async fn list_albums(
    State(state): State<Shared>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Album>> {
    let backend = state.lock().unwrap();
    let matching = backend
        .albums
        .iter()
        .filter(|a| {
            params
                .album_type
                .as_deref()
                .map_or(true, |t| a.album_type.split(',').any(|tag| tag.trim() == t))
        })
        .cloned();
    Json(params.page(matching))
}

async fn get_album(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
) -> HandlerResult<Album> {
    let backend = state.lock().unwrap();
    backend
        .albums
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Album"))
}

async fn create_album(
    State(state): State<Shared>,
    Json(payload): Json<AlbumPayload>,
) -> HandlerResult<Album> {
    let mut backend = state.lock().unwrap();
    let id = backend.allocate_id();
    let album = backend.build_album(id, payload)?;
    backend.albums.push(album.clone());
    Ok(Json(album))
}

async fn update_album(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
    Json(payload): Json<AlbumPayload>,
) -> HandlerResult<Album> {
    let mut backend = state.lock().unwrap();
    let index = backend
        .albums
        .iter()
        .position(|a| a.id == id)
        .ok_or_else(|| not_found("Album"))?;
    let album = backend.build_album(id, payload)?;
    backend.albums[index] = album.clone();
    Ok(Json(album))
}

async fn delete_album(
    State(state): State<Shared>,
    Path(id): Path<EntityId>,
) -> HandlerResult<Value> {
    let mut backend = state.lock().unwrap();
    if !backend.albums.iter().any(|a| a.id == id) {
        return Err(not_found("Album"));
    }
    backend.albums.retain(|a| a.id != id);
    Ok(Json(json!({ "ok": true })))
}

async fn albums_page_data(State(state): State<Shared>) -> Json<AlbumsPageData> {
    let backend = state.lock().unwrap();
    Json(AlbumsPageData {
        albums: backend.albums.clone(),
        recordings: backend.recordings.clone(),
        composers: backend
            .composers
            .iter()
            .map(|c| backend.composer_with_counts(c))
            .collect(),
        compositions: backend
            .compositions
            .iter()
            .map(|c| backend.composition_with_counts(c))
            .collect(),
    })
}

async fn upload_album_image(
    State(state): State<Shared>,
    multipart: Multipart,
) -> HandlerResult<Value> {
    let file_name = receive_file(&state, multipart).await?;
    Ok(Json(
        json!({ "image_url": format!("/uploads/albums/{}", file_name) }),
    ))
}

// =============================================================================
// Uploads
// =============================================================================

/// Reads the `file` part and logs its name.
async fn receive_file(state: &Shared, mut multipart: Multipart) -> Result<String, HandlerError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("image").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(&e.to_string()))?;
        if bytes.is_empty() {
            return Err(bad_request("Empty file"));
        }
        state.lock().unwrap().uploads.push(file_name.clone());
        return Ok(file_name);
    }
    Err(bad_request("Missing file"))
}

/// Unsigned upload endpoint of the image host.
async fn image_host_upload(
    State(state): State<Shared>,
    Path(cloud): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Value>, HandlerError> {
    let mut file_name = None;
    let mut preset = None;
    let mut folder = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&e.to_string()))?
    {
        match field.name() {
            Some("file") => file_name = field.file_name().map(str::to_string),
            Some("upload_preset") => preset = field.text().await.ok(),
            Some("folder") => folder = field.text().await.ok(),
            _ => {}
        }
    }
    if preset.as_deref() != Some(IMAGE_HOST_PRESET) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "message": "Upload preset not found" } })),
        ));
    }
    let file_name = file_name.ok_or_else(|| bad_request("Missing file"))?;
    state.lock().unwrap().uploads.push(file_name.clone());

    let stem = file_name.split('.').next().unwrap_or("image").to_string();
    let public_id = match folder {
        Some(folder) => format!("{}/{}", folder, stem),
        None => stem,
    };
    Ok(Json(json!({
        "public_id": public_id,
        "secure_url": format!("https://img.example/{}/image/upload/{}.png", cloud, public_id),
        "width": 1,
        "height": 1,
        "format": "png",
    })))
}
