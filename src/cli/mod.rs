//! Subcommands of the `catalog-admin` binary.
//!
//! Each command mounts the page it belongs to, performs one action through
//! it and prints the resulting list, so the command line goes through the
//! same validation, refresh and handoff rules as any other front end.

mod render;

pub use render::{
    albums_table, artists_table, composers_table, compositions_table, recordings_table,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::api::{EntityId, ImageFile};
use crate::cli_style::{
    print_key_value, print_section_footer, print_section_header, print_success, print_warning,
};
use crate::forms::{AlbumDraft, ArtistDraft, ComposerDraft, CompositionDraft, CustomUrlDraft};
use crate::pages::{
    AlbumsPage, ArtistsPage, ComposersPage, CompositionsPage, PageContext, PageStatus,
    RecordingsPage, Route,
};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage composers.
    Composers {
        #[command(subcommand)]
        action: ComposerCommand,
    },
    /// Manage compositions.
    Compositions {
        #[command(subcommand)]
        action: CompositionCommand,
    },
    /// Manage performing artists.
    Artists {
        #[command(subcommand)]
        action: ArtistCommand,
    },
    /// Manage recordings.
    Recordings {
        #[command(subcommand)]
        action: RecordingCommand,
    },
    /// Manage albums.
    Albums {
        #[command(subcommand)]
        action: AlbumCommand,
    },
}

// =============================================================================
// Composers
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ComposerCommand {
    /// Lists composers, optionally filtered by a search term.
    List {
        #[clap(long)]
        search: Option<String>,
    },
    /// Creates a composer.
    Add(ComposerFields),
    /// Updates the given fields of a composer.
    Edit {
        id: EntityId,
        #[command(flatten)]
        fields: ComposerFields,
    },
    /// Deletes a composer after confirmation.
    Delete { id: EntityId },
    /// Shows the compositions of a composer.
    Compositions { id: EntityId },
}

#[derive(Args, Debug, Default)]
pub struct ComposerFields {
    #[clap(long)]
    pub full_name: Option<String>,
    /// Short display name.
    #[clap(long)]
    pub name: Option<String>,
    #[clap(long)]
    pub birth_year: Option<i32>,
    #[clap(long)]
    pub death_year: Option<i32>,
    #[clap(long)]
    pub nationality: Option<String>,
    /// Portrait image file to upload (5MB max).
    #[clap(long)]
    pub portrait: Option<PathBuf>,
}

impl ComposerFields {
    fn apply(&self, draft: &mut ComposerDraft) {
        if let Some(full_name) = &self.full_name {
            draft.full_name = full_name.clone();
        }
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if self.birth_year.is_some() {
            draft.birth_year = self.birth_year;
        }
        if self.death_year.is_some() {
            draft.death_year = self.death_year;
        }
        if let Some(nationality) = &self.nationality {
            draft.nationality = nationality.clone();
        }
    }
}

// =============================================================================
// Compositions
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum CompositionCommand {
    /// Lists the compositions of one composer.
    List {
        #[clap(long)]
        composer: Option<EntityId>,
        #[clap(long)]
        search: Option<String>,
    },
    /// Creates a composition.
    Add(CompositionFields),
    /// Updates the given fields of a composition.
    Edit {
        id: EntityId,
        #[command(flatten)]
        fields: CompositionFields,
    },
    /// Deletes a composition after confirmation.
    Delete { id: EntityId },
    /// Shows the recordings of a composition.
    Recordings { id: EntityId },
}

#[derive(Args, Debug, Default)]
pub struct CompositionFields {
    /// Owning composer; defaults to the first composer by name.
    #[clap(long)]
    pub composer: Option<EntityId>,
    /// Catalog number, e.g. "BWV 988" or "Op. 27 No. 2".
    #[clap(long)]
    pub catalog: Option<String>,
    #[clap(long)]
    pub title: Option<String>,
}

impl CompositionFields {
    fn apply(&self, draft: &mut CompositionDraft) {
        if self.composer.is_some() {
            draft.composer_id = self.composer;
        }
        if let Some(catalog) = &self.catalog {
            draft.catalog_number = catalog.clone();
        }
        if let Some(title) = &self.title {
            draft.title = title.clone();
        }
    }
}

// =============================================================================
// Artists
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ArtistCommand {
    /// Lists artists, optionally filtered by a search term.
    List {
        #[clap(long)]
        search: Option<String>,
    },
    /// Creates an artist.
    Add(ArtistFields),
    /// Updates the given fields of an artist.
    Edit {
        id: EntityId,
        #[command(flatten)]
        fields: ArtistFields,
    },
    /// Deletes an artist after confirmation.
    Delete { id: EntityId },
    /// Shows the recordings an artist performs on.
    Recordings { id: EntityId },
}

#[derive(Args, Debug, Default)]
pub struct ArtistFields {
    #[clap(long)]
    pub name: Option<String>,
    #[clap(long)]
    pub birth_year: Option<i32>,
    #[clap(long)]
    pub death_year: Option<i32>,
    #[clap(long)]
    pub nationality: Option<String>,
    #[clap(long)]
    pub instrument: Option<String>,
}

impl ArtistFields {
    fn apply(&self, draft: &mut ArtistDraft) {
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if self.birth_year.is_some() {
            draft.birth_year = self.birth_year;
        }
        if self.death_year.is_some() {
            draft.death_year = self.death_year;
        }
        if let Some(nationality) = &self.nationality {
            draft.nationality = nationality.clone();
        }
        if let Some(instrument) = &self.instrument {
            draft.instrument = instrument.clone();
        }
    }
}

// =============================================================================
// Recordings
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum RecordingCommand {
    /// Lists recordings by composition and/or artist.
    List {
        #[clap(long)]
        composer: Option<EntityId>,
        #[clap(long)]
        composition: Option<EntityId>,
        #[clap(long)]
        artist: Option<EntityId>,
    },
    /// Creates a recording.
    Add(RecordingFields),
    /// Updates the given fields of a recording.
    Edit {
        id: EntityId,
        #[command(flatten)]
        fields: RecordingFields,
    },
    /// Deletes a recording after confirmation.
    Delete { id: EntityId },
    /// Shows the albums containing a recording.
    Albums { id: EntityId },
}

#[derive(Args, Debug, Default)]
pub struct RecordingFields {
    #[clap(long)]
    pub composition: Option<EntityId>,
    /// Performing artist, repeatable; credit order follows the flags.
    /// Replaces the current artists when editing.
    #[clap(long = "artist")]
    pub artists: Vec<EntityId>,
    #[clap(long)]
    pub year: Option<i32>,
    #[clap(long)]
    pub memo: Option<String>,
}

// =============================================================================
// Albums
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum AlbumCommand {
    /// Lists albums, optionally only those with a recording or composition.
    List {
        #[clap(long)]
        recording: Option<EntityId>,
        #[clap(long)]
        composition: Option<EntityId>,
    },
    /// Creates an album.
    Add(AlbumFields),
    /// Updates the given fields of an album.
    Edit {
        id: EntityId,
        #[command(flatten)]
        fields: AlbumFields,
    },
    /// Deletes an album after confirmation.
    Delete { id: EntityId },
}

#[derive(Args, Debug, Default)]
pub struct AlbumFields {
    /// Type tag (LP, CD, Roon or any other), repeatable. Toggles when editing.
    #[clap(long = "type")]
    pub album_types: Vec<String>,
    /// Recording id, repeatable; track order follows the flags.
    #[clap(long = "recording")]
    pub recordings: Vec<EntityId>,
    /// Recording id to take off the album, repeatable.
    #[clap(long = "drop-recording")]
    pub drop_recordings: Vec<EntityId>,
    #[clap(long)]
    pub discogs_url: Option<String>,
    #[clap(long)]
    pub goclassic_url: Option<String>,
    #[clap(long)]
    pub memo: Option<String>,
    /// Cover image file, repeatable.
    #[clap(long = "image")]
    pub images: Vec<PathBuf>,
    /// Index of an image to remove, repeatable. Applied before new images.
    #[clap(long = "remove-image")]
    pub remove_images: Vec<usize>,
    /// Index of the primary image after removals and additions.
    #[clap(long)]
    pub primary: Option<usize>,
    /// Extra link as NAME=URL, repeatable. Replaces existing links.
    #[clap(long = "link", value_parser = parse_link)]
    pub links: Vec<CustomUrlDraft>,
}

fn parse_link(s: &str) -> Result<CustomUrlDraft, String> {
    match s.split_once('=') {
        Some((name, url)) if !name.trim().is_empty() && !url.trim().is_empty() => {
            Ok(CustomUrlDraft {
                url_name: name.trim().to_string(),
                url: url.trim().to_string(),
            })
        }
        _ => Err(format!("expected NAME=URL, got {:?}", s)),
    }
}

impl AlbumFields {
    fn apply(&self, draft: &mut AlbumDraft) {
        for tag in &self.album_types {
            draft.toggle_album_type(tag);
        }
        if let Some(url) = &self.discogs_url {
            draft.discogs_url = url.clone();
        }
        if let Some(url) = &self.goclassic_url {
            draft.goclassic_url = url.clone();
        }
        if let Some(memo) = &self.memo {
            draft.memo = memo.clone();
        }
        if !self.links.is_empty() {
            draft.custom_urls = self.links.clone();
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Turns a failed page action into an error carrying the page banner.
fn ensure(ok: bool, status: &PageStatus) -> Result<()> {
    if ok {
        return Ok(());
    }
    match &status.error {
        Some(message) => bail!("{}", message),
        None => bail!("Nothing to do"),
    }
}

/// Mount failures abort the command; later banners are reported per action.
fn ensure_loaded(status: &PageStatus) -> Result<()> {
    match &status.error {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

fn declined(what: &str) -> Result<()> {
    print_warning(&format!("{} was not deleted", what));
    Ok(())
}

pub async fn run(command: Command, ctx: PageContext, api_url: &str) -> Result<()> {
    match command {
        Command::Composers { action } => run_composers(action, ctx).await,
        Command::Compositions { action } => run_compositions(action, ctx).await,
        Command::Artists { action } => run_artists(action, ctx).await,
        Command::Recordings { action } => run_recordings(action, ctx, api_url).await,
        Command::Albums { action } => run_albums(action, ctx, api_url).await,
    }
}

async fn run_composers(action: ComposerCommand, ctx: PageContext) -> Result<()> {
    let mut page = ComposersPage::new(ctx.clone());
    page.mount().await;
    ensure_loaded(&page.status)?;

    match action {
        ComposerCommand::List { search } => {
            if let Some(search) = search {
                page.search(&search).await;
                ensure_loaded(&page.status)?;
            }
            render::print_composers(&page.composers);
        }
        ComposerCommand::Add(fields) => {
            page.open_create();
            submit_composer(&mut page, &fields).await?;
            print_success("Composer created");
            render::print_composers(&page.composers);
        }
        ComposerCommand::Edit { id, fields } => {
            if !page.composers.iter().any(|c| c.id == id) {
                let composer = ctx.api.get_composer(id).await?;
                page.composers.push(composer);
            }
            ensure(page.open_edit(id), &page.status)?;
            submit_composer(&mut page, &fields).await?;
            print_success(&format!("Composer {} updated", id));
            render::print_composers(&page.composers);
        }
        ComposerCommand::Delete { id } => {
            if page.delete(id).await {
                print_success(&format!("Composer {} deleted", id));
                render::print_composers(&page.composers);
            } else if page.status.error.is_none() {
                return declined("Composer");
            } else {
                ensure(false, &page.status)?;
            }
        }
        ComposerCommand::Compositions { id } => {
            let route = page.open_compositions(id).await;
            return follow(route, ctx).await;
        }
    }
    Ok(())
}

async fn submit_composer(page: &mut ComposersPage, fields: &ComposerFields) -> Result<()> {
    if let Some(draft) = page.modal.draft_mut() {
        fields.apply(draft);
    }
    if let Some(path) = &fields.portrait {
        let file = ImageFile::read(path)?;
        ensure(page.upload_portrait(&file).await, &page.status)?;
    }
    ensure(page.submit().await, &page.status)
}

async fn run_compositions(action: CompositionCommand, ctx: PageContext) -> Result<()> {
    let mut page = CompositionsPage::new(ctx.clone());
    page.mount().await;
    ensure_loaded(&page.status)?;

    match action {
        CompositionCommand::List { composer, search } => {
            if composer.is_some() {
                page.selected_composer_id = composer;
            }
            match search {
                Some(search) => page.search(&search).await,
                None if composer.is_some() => page.load().await,
                None => {}
            }
            ensure_loaded(&page.status)?;
            render::print_compositions(&page.compositions, &page.composers);
        }
        CompositionCommand::Add(fields) => {
            if fields.composer.is_some() {
                page.selected_composer_id = fields.composer;
            }
            page.open_create();
            submit_composition(&mut page, &fields).await?;
            print_success("Composition created");
            render::print_compositions(&page.compositions, &page.composers);
        }
        CompositionCommand::Edit { id, fields } => {
            let composition = ctx.api.get_composition(id).await?;
            page.filter_by_composer(Some(composition.composer_id)).await;
            ensure(page.open_edit(id), &page.status)?;
            submit_composition(&mut page, &fields).await?;
            print_success(&format!("Composition {} updated", id));
            render::print_compositions(&page.compositions, &page.composers);
        }
        CompositionCommand::Delete { id } => {
            let composition = ctx.api.get_composition(id).await?;
            page.filter_by_composer(Some(composition.composer_id)).await;
            if page.delete(id).await {
                print_success(&format!("Composition {} deleted", id));
                render::print_compositions(&page.compositions, &page.composers);
            } else if page.status.error.is_none() {
                return declined("Composition");
            } else {
                ensure(false, &page.status)?;
            }
        }
        CompositionCommand::Recordings { id } => {
            let composition = ctx.api.get_composition(id).await?;
            page.filter_by_composer(Some(composition.composer_id)).await;
            let route = page.open_recordings(id).await;
            return follow(route, ctx).await;
        }
    }
    Ok(())
}

async fn submit_composition(page: &mut CompositionsPage, fields: &CompositionFields) -> Result<()> {
    if let Some(draft) = page.modal.draft_mut() {
        fields.apply(draft);
    }
    ensure(page.submit().await, &page.status)
}

async fn run_artists(action: ArtistCommand, ctx: PageContext) -> Result<()> {
    let mut page = ArtistsPage::new(ctx.clone());
    page.mount().await;
    ensure_loaded(&page.status)?;

    match action {
        ArtistCommand::List { search } => {
            if let Some(search) = search {
                page.search(&search).await;
                ensure_loaded(&page.status)?;
            }
            render::print_artists(&page.artists);
        }
        ArtistCommand::Add(fields) => {
            page.open_create();
            submit_artist(&mut page, &fields).await?;
            print_success("Artist created");
            render::print_artists(&page.artists);
        }
        ArtistCommand::Edit { id, fields } => {
            if !page.artists.iter().any(|a| a.id == id) {
                let artist = ctx.api.get_artist(id).await?;
                page.artists.push(artist);
            }
            ensure(page.open_edit(id), &page.status)?;
            submit_artist(&mut page, &fields).await?;
            print_success(&format!("Artist {} updated", id));
            render::print_artists(&page.artists);
        }
        ArtistCommand::Delete { id } => {
            if page.delete(id).await {
                print_success(&format!("Artist {} deleted", id));
                render::print_artists(&page.artists);
            } else if page.status.error.is_none() {
                return declined("Artist");
            } else {
                ensure(false, &page.status)?;
            }
        }
        ArtistCommand::Recordings { id } => {
            let route = page.open_recordings(id).await;
            return follow(route, ctx).await;
        }
    }
    Ok(())
}

async fn submit_artist(page: &mut ArtistsPage, fields: &ArtistFields) -> Result<()> {
    if let Some(draft) = page.modal.draft_mut() {
        fields.apply(draft);
    }
    ensure(page.submit().await, &page.status)
}

async fn run_recordings(action: RecordingCommand, ctx: PageContext, api_url: &str) -> Result<()> {
    let mut page = RecordingsPage::new(ctx.clone());
    page.mount().await;
    ensure_loaded(&page.status)?;

    match action {
        RecordingCommand::List {
            composer,
            composition,
            artist,
        } => {
            if composer.is_some() {
                page.select_composer(composer).await;
            }
            if let Some(composition) = composition {
                page.select_composition(composition).await;
            }
            if let Some(artist) = artist {
                ensure(page.select_artist(artist).await, &page.status)?;
            }
            ensure_loaded(&page.status)?;
            render::print_recordings(&page.recordings, &page.catalog);
        }
        RecordingCommand::Add(fields) => {
            page.open_create();
            submit_recording(&mut page, &fields).await?;
            print_success("Recording created");
            render::print_recordings(&page.recordings, &page.catalog);
        }
        RecordingCommand::Edit { id, fields } => {
            let recording = ctx.api.get_recording(id).await?;
            page.select_composition(recording.composition_id).await;
            ensure(page.open_edit(id), &page.status)?;
            if !fields.artists.is_empty() {
                let current: Vec<EntityId> = page
                    .modal
                    .draft()
                    .map(|d| d.artists.ids().to_vec())
                    .unwrap_or_default();
                for artist_id in current {
                    page.remove_artist(artist_id);
                }
            }
            submit_recording(&mut page, &fields).await?;
            print_success(&format!("Recording {} updated", id));
            render::print_recordings(&page.recordings, &page.catalog);
        }
        RecordingCommand::Delete { id } => {
            let recording = ctx.api.get_recording(id).await?;
            page.select_composition(recording.composition_id).await;
            if page.delete(id).await {
                print_success(&format!("Recording {} deleted", id));
                render::print_recordings(&page.recordings, &page.catalog);
            } else if page.status.error.is_none() {
                return declined("Recording");
            } else {
                ensure(false, &page.status)?;
            }
        }
        RecordingCommand::Albums { id } => {
            let route = page.open_albums(id).await;
            let mut albums = AlbumsPage::new(ctx);
            albums.mount().await;
            ensure_loaded(&albums.status)?;
            info!("Followed handoff to {:?}", route);
            print_section_header(&albums.catalog.recording_label(id));
            render::print_albums(&albums.visible_albums(), &albums.catalog, api_url);
            print_section_footer();
        }
    }
    Ok(())
}

async fn submit_recording(page: &mut RecordingsPage, fields: &RecordingFields) -> Result<()> {
    if let Some(composition_id) = fields.composition {
        let composer_id = page
            .catalog
            .composition(composition_id)
            .map(|c| c.composer_id)
            .ok_or_else(|| anyhow!("Composition {} does not exist", composition_id))?;
        page.form_select_composer(Some(composer_id));
        page.form_select_composition(composition_id);
    }
    for artist_id in &fields.artists {
        page.add_artist(*artist_id);
    }
    if let Some(draft) = page.modal.draft_mut() {
        if fields.year.is_some() {
            draft.year = fields.year;
        }
        if let Some(memo) = &fields.memo {
            draft.memo = memo.clone();
        }
    }
    ensure(page.submit().await, &page.status)
}

async fn run_albums(action: AlbumCommand, ctx: PageContext, api_url: &str) -> Result<()> {
    let mut page = AlbumsPage::new(ctx);
    page.mount().await;

    match action {
        AlbumCommand::List {
            recording,
            composition,
        } => {
            ensure_loaded(&page.status)?;
            if recording.is_some() {
                page.filter_by_recording(recording);
            }
            if let Some(composition) = composition {
                page.filter_by_composition(composition);
            }
            render::print_albums(&page.visible_albums(), &page.catalog, api_url);
        }
        AlbumCommand::Add(fields) => {
            ensure(page.open_create().await, &page.status)?;
            submit_album(&mut page, &fields).await?;
            print_success("Album created");
            render::print_albums(&page.visible_albums(), &page.catalog, api_url);
        }
        AlbumCommand::Edit { id, fields } => {
            ensure(page.open_edit(id).await, &page.status)?;
            submit_album(&mut page, &fields).await?;
            print_success(&format!("Album {} updated", id));
            render::print_albums(&page.visible_albums(), &page.catalog, api_url);
        }
        AlbumCommand::Delete { id } => {
            ensure_loaded(&page.status)?;
            if page.delete(id).await {
                print_success(&format!("Album {} deleted", id));
                render::print_albums(&page.visible_albums(), &page.catalog, api_url);
            } else if page.status.error.is_none() {
                return declined("Album");
            } else {
                ensure(false, &page.status)?;
            }
        }
    }
    Ok(())
}

async fn submit_album(page: &mut AlbumsPage, fields: &AlbumFields) -> Result<()> {
    let editor = page
        .editor
        .as_mut()
        .context("Album editor is not open")?;
    if let Some(draft) = editor.modal.draft_mut() {
        fields.apply(draft);
    }
    for recording_id in &fields.drop_recordings {
        editor.remove_recording(*recording_id);
    }
    for recording_id in &fields.recordings {
        editor.add_recording(*recording_id);
    }
    // Highest index first so earlier removals don't shift later ones.
    let mut remove_images = fields.remove_images.clone();
    remove_images.sort_unstable_by(|a, b| b.cmp(a));
    for index in remove_images {
        ensure(editor.remove_image(index), &editor.status)?;
    }
    if !fields.images.is_empty() {
        let files = fields
            .images
            .iter()
            .map(|path| ImageFile::read(path))
            .collect::<Result<Vec<_>>>()?;
        ensure(editor.add_images(&files).await, &editor.status)?;
    }
    if let Some(primary) = fields.primary {
        ensure(editor.set_primary_image(primary), &editor.status)?;
    }

    if page.submit_editor().await {
        return Ok(());
    }
    match page.editor.as_ref() {
        Some(editor) => ensure(false, &editor.status),
        None => ensure(false, &page.status),
    }
}

/// Lands on the page a handoff points at and prints what it restored.
async fn follow(route: Route, ctx: PageContext) -> Result<()> {
    match route {
        Route::Compositions => {
            let mut page = CompositionsPage::new(ctx);
            page.mount().await;
            ensure_loaded(&page.status)?;
            if let Some(composer) = page
                .selected_composer_id
                .and_then(|id| page.composers.iter().find(|c| c.id == id))
            {
                print_key_value("Composer", &composer.full_name);
            }
            render::print_compositions(&page.compositions, &page.composers);
        }
        Route::Recordings => {
            let mut page = RecordingsPage::new(ctx);
            page.mount().await;
            ensure_loaded(&page.status)?;
            if let Some(id) = page.filter.composition_id() {
                print_key_value("Composition", &page.catalog.composition_label(id));
            }
            if let Some(id) = page.artist_filter.selected() {
                print_key_value("Artist", &page.catalog.artist_label(id));
            }
            render::print_recordings(&page.recordings, &page.catalog);
        }
        other => bail!("No handoff leads to {:?}", other),
    }
    Ok(())
}
