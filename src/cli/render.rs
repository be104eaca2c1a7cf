//! Table rendering for each resource list.

use crate::api::{Album, Artist, Composer, Composition, Recording};
use crate::catalog_view::{
    format_life, image_preview_url, primary_image, recording_artist_names, sorted_album_types,
    CatalogView, PLACEHOLDER,
};
use crate::cli_style::{print_empty_list, TableBuilder};

fn or_placeholder(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

fn year(value: Option<i32>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |y| y.to_string())
}

fn print_or_empty(table: TableBuilder, empty_message: &str) {
    if table.is_empty() {
        print_empty_list(empty_message);
    } else {
        table.print();
    }
}

pub fn composers_table(composers: &[Composer]) -> TableBuilder {
    let mut table = TableBuilder::new(vec![
        "ID",
        "Name",
        "Full name",
        "Life",
        "Nationality",
        "Works",
    ]);
    for composer in composers {
        table.add_row(vec![
            composer.id.to_string(),
            composer.name.clone(),
            composer.full_name.clone(),
            format_life(composer.birth_year, composer.death_year),
            or_placeholder(composer.nationality.as_deref()),
            composer.composition_count.to_string(),
        ]);
    }
    table
}

pub fn print_composers(composers: &[Composer]) {
    print_or_empty(composers_table(composers), "No composers found");
}

pub fn compositions_table(compositions: &[Composition], composers: &[Composer]) -> TableBuilder {
    let mut table = TableBuilder::new(vec!["ID", "Composer", "Catalog", "Title", "Recordings"]);
    for composition in compositions {
        let composer = composers
            .iter()
            .find(|c| c.id == composition.composer_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        table.add_row(vec![
            composition.id.to_string(),
            composer,
            or_placeholder(composition.catalog_number.as_deref()),
            composition.title.clone(),
            composition.recording_count.to_string(),
        ]);
    }
    table
}

pub fn print_compositions(compositions: &[Composition], composers: &[Composer]) {
    print_or_empty(
        compositions_table(compositions, composers),
        "No compositions (pick a composer with --composer)",
    );
}

pub fn artists_table(artists: &[Artist]) -> TableBuilder {
    let mut table = TableBuilder::new(vec![
        "ID",
        "Name",
        "Instrument",
        "Life",
        "Nationality",
        "Recordings",
    ]);
    for artist in artists {
        table.add_row(vec![
            artist.id.to_string(),
            artist.name.clone(),
            or_placeholder(artist.instrument.as_deref()),
            format_life(artist.birth_year, artist.death_year),
            or_placeholder(artist.nationality.as_deref()),
            artist.recording_count.to_string(),
        ]);
    }
    table
}

pub fn print_artists(artists: &[Artist]) {
    print_or_empty(artists_table(artists), "No artists found");
}

pub fn recordings_table(recordings: &[Recording], catalog: &CatalogView) -> TableBuilder {
    let mut table = TableBuilder::new(vec![
        "ID",
        "Composer",
        "Composition",
        "Artists",
        "Year",
        "Albums",
    ]);
    for recording in recordings {
        table.add_row(vec![
            recording.id.to_string(),
            catalog.composer_name_for_composition(recording.composition_id),
            catalog.composition_label(recording.composition_id),
            recording_artist_names(recording),
            year(recording.year),
            catalog.album_count_for_recording(recording.id).to_string(),
        ]);
    }
    table
}

pub fn print_recordings(recordings: &[Recording], catalog: &CatalogView) {
    print_or_empty(
        recordings_table(recordings, catalog),
        "No recordings (filter by --composition or --artist)",
    );
}

pub fn albums_table(albums: &[&Album], catalog: &CatalogView, api_url: &str) -> TableBuilder {
    let mut table = TableBuilder::new(vec!["ID", "Types", "Tracks", "Cover"]);
    for album in albums {
        let tracks: Vec<String> = album
            .recordings
            .iter()
            .map(|r| catalog.recording_label(r.id))
            .collect();
        let cover = primary_image(&album.images)
            .map(|img| image_preview_url(api_url, &img.image_url))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        table.add_row(vec![
            album.id.to_string(),
            sorted_album_types(&album.album_type).join(", "),
            if tracks.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                tracks.join("; ")
            },
            cover,
        ]);
    }
    table
}

pub fn print_albums(albums: &[&Album], catalog: &CatalogView, api_url: &str) {
    print_or_empty(albums_table(albums, catalog, api_url), "No albums found");
}
