//! Seed data for the mock backend.

use super::constants::*;
use super::server::Backend;
use classical_catalog_admin::api::{
    Album, AlbumImage, Artist, Composer, Composition, EntityId, Recording,
};

fn composer(id: EntityId, name: &str, full_name: &str, life: (i32, i32)) -> Composer {
    Composer {
        id,
        full_name: full_name.to_string(),
        name: name.to_string(),
        birth_year: Some(life.0),
        death_year: Some(life.1),
        nationality: None,
        image_url: None,
        composition_count: 0,
    }
}

fn composition(id: EntityId, composer_id: EntityId, catalog: &str, title: &str) -> Composition {
    Composition {
        id,
        composer_id,
        catalog_number: Some(catalog.to_string()),
        sort_order: None,
        title: title.to_string(),
        recording_count: 0,
    }
}

fn artist(id: EntityId, name: &str, instrument: &str) -> Artist {
    Artist {
        id,
        name: name.to_string(),
        birth_year: None,
        death_year: None,
        nationality: None,
        instrument: Some(instrument.to_string()),
        recording_count: 0,
    }
}

fn recording(id: EntityId, composition_id: EntityId, year: i32, artists: Vec<Artist>) -> Recording {
    Recording {
        id,
        composition_id,
        year: Some(year),
        memo: None,
        artists,
    }
}

/// Two composers with works, one without, three pianists, four recordings
/// and two albums.
pub fn seed_catalog() -> Backend {
    let gould = artist(GOULD_ID, GOULD_NAME, "Piano");
    let schiff = artist(SCHIFF_ID, "András Schiff", "Piano");
    let zimerman = artist(ZIMERMAN_ID, "Krystian Zimerman", "Piano");

    let gould_1955 = recording(GOULD_1955_ID, GOLDBERG_ID, 1955, vec![gould.clone()]);
    let gould_1981 = recording(GOULD_1981_ID, GOLDBERG_ID, 1981, vec![gould.clone()]);
    let schiff_wtc = recording(SCHIFF_WTC_ID, WTC_ID, 2011, vec![schiff.clone()]);
    let zimerman_ballade =
        recording(ZIMERMAN_BALLADE_ID, BALLADE_ID, 1987, vec![zimerman.clone()]);

    let mut backend = Backend::default();
    backend.composers = vec![
        composer(BACH_ID, BACH_NAME, "Johann Sebastian Bach", (1685, 1750)),
        composer(CHOPIN_ID, CHOPIN_NAME, "Frédéric Chopin", (1810, 1849)),
        composer(SATIE_ID, "Satie", "Erik Satie", (1866, 1925)),
    ];
    backend.compositions = vec![
        composition(GOLDBERG_ID, BACH_ID, "BWV 988", GOLDBERG_TITLE),
        composition(WTC_ID, BACH_ID, "BWV 846-869", "The Well-Tempered Clavier"),
        composition(BALLADE_ID, CHOPIN_ID, "Op. 23", "Ballade No. 1"),
    ];
    backend.artists = vec![gould, schiff, zimerman];
    backend.albums = vec![
        Album {
            id: GOULD_LP_ID,
            album_type: "LP".to_string(),
            discogs_url: None,
            goclassic_url: None,
            memo: None,
            recordings: vec![gould_1955.clone(), gould_1981.clone()],
            images: vec![],
            custom_urls: vec![],
        },
        Album {
            id: ZIMERMAN_CD_ID,
            album_type: "CD".to_string(),
            discogs_url: Some("https://www.discogs.com/release/1".to_string()),
            goclassic_url: None,
            memo: None,
            recordings: vec![zimerman_ballade.clone()],
            images: vec![AlbumImage {
                id: 1,
                album_id: ZIMERMAN_CD_ID,
                image_url: "/uploads/albums/ballades.jpg".to_string(),
                is_primary: 1,
            }],
            custom_urls: vec![],
        },
    ];
    backend.recordings = vec![gould_1955, gould_1981, schiff_wtc, zimerman_ballade];
    backend.set_next_id(1000);
    backend
}
