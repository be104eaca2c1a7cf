//! Shared constants for end-to-end tests
//!
//! IDs and names of the seeded catalog. When the seed in `fixtures.rs`
//! changes, update only this file.

use classical_catalog_admin::api::EntityId;

// ============================================================================
// Composers
// ============================================================================

pub const BACH_ID: EntityId = 1;
pub const BACH_NAME: &str = "Bach";

pub const CHOPIN_ID: EntityId = 2;
pub const CHOPIN_NAME: &str = "Chopin";

/// Composer without compositions, safe to delete.
pub const SATIE_ID: EntityId = 3;

// ============================================================================
// Compositions
// ============================================================================

/// BWV 988, Bach
pub const GOLDBERG_ID: EntityId = 10;
pub const GOLDBERG_TITLE: &str = "Goldberg Variations";

/// BWV 846-869, Bach
pub const WTC_ID: EntityId = 11;

/// Op. 23, Chopin
pub const BALLADE_ID: EntityId = 20;

// ============================================================================
// Artists
// ============================================================================

pub const GOULD_ID: EntityId = 100;
pub const GOULD_NAME: &str = "Glenn Gould";

pub const SCHIFF_ID: EntityId = 101;

pub const ZIMERMAN_ID: EntityId = 102;

// ============================================================================
// Recordings
// ============================================================================

/// Goldberg Variations, Gould 1955
pub const GOULD_1955_ID: EntityId = 200;

/// Goldberg Variations, Gould 1981
pub const GOULD_1981_ID: EntityId = 201;

/// Well-Tempered Clavier, Schiff
pub const SCHIFF_WTC_ID: EntityId = 202;

/// Ballade No. 1, Zimerman
pub const ZIMERMAN_BALLADE_ID: EntityId = 203;

// ============================================================================
// Albums
// ============================================================================

/// LP with both Gould Goldbergs.
pub const GOULD_LP_ID: EntityId = 300;

/// CD with the Zimerman ballade, one primary image.
pub const ZIMERMAN_CD_ID: EntityId = 301;

// ============================================================================
// Image host
// ============================================================================

pub const IMAGE_HOST_CLOUD: &str = "test-cloud";
pub const IMAGE_HOST_PRESET: &str = "unsigned_preset";

/// Minimal PNG signature; enough for content sniffing.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
