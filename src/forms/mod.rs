//! Create/edit form state: drafts, the modal lifecycle, ordered id
//! selections and album image lists.

mod album;
mod artist;
mod composer;
mod composition;
mod images;
mod modal;
mod recording;
mod selection;
mod validation;

pub use album::{AlbumDraft, CustomUrlDraft};
pub use artist::ArtistDraft;
pub use composer::ComposerDraft;
pub use composition::CompositionDraft;
pub use images::ImageList;
pub use modal::{FormMode, Modal};
pub use recording::RecordingDraft;
pub use selection::OrderedSelection;
pub use validation::{
    optional_text, require_selection, required_id, required_text, FormError, FormResult,
};

use serde::Serialize;

/// A form's editable copy of a record.
///
/// `Default` is the blank create-mode draft.
pub trait Draft: Default {
    type Payload: Serialize + Send + Sync;

    /// Validates and converts to the request body. Strings are trimmed and
    /// blank optional fields become `None`.
    fn to_payload(&self) -> FormResult<Self::Payload>;
}
