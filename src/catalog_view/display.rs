//! Display string helpers shared by tables and forms.

use crate::api::{AlbumImage, Artist, Composer};

/// Placeholder rendered whenever a cross-reference cannot be resolved.
pub const PLACEHOLDER: &str = "-";

/// Album type tags the dashboard knows about, in display order.
pub const KNOWN_ALBUM_TYPES: [&str; 3] = ["LP", "CD", "Roon"];

/// Formats a lifespan as shown in the composer and artist tables.
pub fn format_life(birth_year: Option<i32>, death_year: Option<i32>) -> String {
    match (birth_year, death_year) {
        (None, None) => PLACEHOLDER.to_string(),
        (Some(birth), None) => format!("{} - ?", birth),
        (None, Some(death)) => format!("? - {}", death),
        (Some(birth), Some(death)) => format!("{} - {} ({})", birth, death, death - birth),
    }
}

/// Splits a comma-joined `album_type` into its tags.
pub fn album_type_tags(album_type: &str) -> Vec<String> {
    album_type
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tags in canonical order (LP, CD, Roon), unknown tags last in input order.
pub fn sorted_album_types(album_type: &str) -> Vec<String> {
    let tags = album_type_tags(album_type);
    let mut sorted: Vec<String> = KNOWN_ALBUM_TYPES
        .iter()
        .filter_map(|known| {
            tags.iter()
                .find(|t| t.eq_ignore_ascii_case(known))
                .map(|_| known.to_string())
        })
        .collect();
    for tag in tags {
        let is_known = KNOWN_ALBUM_TYPES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(&tag));
        if !is_known && !sorted.contains(&tag) {
            sorted.push(tag);
        }
    }
    sorted
}

/// The cover image: the flagged one, else the first, else none.
pub fn primary_image(images: &[AlbumImage]) -> Option<&AlbumImage> {
    images
        .iter()
        .find(|img| img.is_primary())
        .or_else(|| images.first())
}

/// `name - instrument`, or just the name.
pub fn artist_display(artist: &Artist) -> String {
    match artist.instrument.as_deref().filter(|i| !i.is_empty()) {
        Some(instrument) => format!("{} - {}", artist.name, instrument),
        None => artist.name.clone(),
    }
}

/// `catalog - title`, or just the title.
pub fn composition_display(catalog_number: Option<&str>, title: &str) -> String {
    match catalog_number.filter(|c| !c.is_empty()) {
        Some(catalog) => format!("{} - {}", catalog, title),
        None => title.to_string(),
    }
}

pub fn sort_composers_by_name(composers: &mut [Composer]) {
    composers.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

/// Resolves an image reference to something a viewer can open.
///
/// Absolute and `data:` URLs pass through, backend-relative paths are
/// prefixed with the backend base URL.
pub fn image_preview_url(base_url: &str, reference: &str) -> String {
    if reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("data:")
    {
        return reference.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if reference.starts_with('/') {
        format!("{}{}", base, reference)
    } else {
        format!("{}/{}", base, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: i64, primary: i64) -> AlbumImage {
        AlbumImage {
            id,
            album_id: 1,
            image_url: format!("/uploads/{}.jpg", id),
            is_primary: primary,
        }
    }

    #[test]
    fn test_format_life() {
        assert_eq!(format_life(None, None), "-");
        assert_eq!(format_life(Some(1685), None), "1685 - ?");
        assert_eq!(format_life(None, Some(1750)), "? - 1750");
        assert_eq!(format_life(Some(1685), Some(1750)), "1685 - 1750 (65)");
    }

    #[test]
    fn test_album_type_tags() {
        assert_eq!(album_type_tags("LP, CD,,"), vec!["LP", "CD"]);
        assert!(album_type_tags("").is_empty());
    }

    #[test]
    fn test_sorted_album_types() {
        assert_eq!(sorted_album_types("roon,LP"), vec!["LP", "Roon"]);
        assert_eq!(sorted_album_types("SACD,CD"), vec!["CD", "SACD"]);
    }

    #[test]
    fn test_primary_image() {
        let images = vec![image(1, 0), image(2, 1)];
        assert_eq!(primary_image(&images).unwrap().id, 2);

        let images = vec![image(1, 0), image(2, 0)];
        assert_eq!(primary_image(&images).unwrap().id, 1);

        assert!(primary_image(&[]).is_none());
    }

    #[test]
    fn test_artist_display() {
        let mut artist = Artist {
            id: 1,
            name: "Glenn Gould".to_string(),
            birth_year: Some(1932),
            death_year: Some(1982),
            nationality: None,
            instrument: Some("Piano".to_string()),
            recording_count: 0,
        };
        assert_eq!(artist_display(&artist), "Glenn Gould - Piano");
        artist.instrument = None;
        assert_eq!(artist_display(&artist), "Glenn Gould");
    }

    #[test]
    fn test_composition_display() {
        assert_eq!(
            composition_display(Some("BWV 988"), "Goldberg Variations"),
            "BWV 988 - Goldberg Variations"
        );
        assert_eq!(composition_display(Some(""), "Mass"), "Mass");
    }

    #[test]
    fn test_image_preview_url() {
        assert_eq!(
            image_preview_url("http://localhost:8000/", "/uploads/a.jpg"),
            "http://localhost:8000/uploads/a.jpg"
        );
        assert_eq!(
            image_preview_url("http://localhost:8000", "https://cdn.example/a.jpg"),
            "https://cdn.example/a.jpg"
        );
        assert_eq!(
            image_preview_url("http://localhost:8000", "data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
    }
}
