//! Modal lifecycle shared by every create/edit form.
//!
//! `Closed -> Open(Create) -> Submitting -> Closed`, or the same starting
//! from `Open(Edit(id))` with a seeded draft. Closing discards the draft.

use crate::api::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Modal<D> {
    #[default]
    Closed,
    Open {
        mode: FormMode,
        draft: D,
    },
    Submitting {
        mode: FormMode,
        draft: D,
    },
}

impl<D: Default> Modal<D> {
    pub fn open_create(&mut self) {
        *self = Modal::Open {
            mode: FormMode::Create,
            draft: D::default(),
        };
    }
}

impl<D> Modal<D> {
    /// Opens a create form with a pre-filled draft.
    pub fn open_create_with(&mut self, draft: D) {
        *self = Modal::Open {
            mode: FormMode::Create,
            draft,
        };
    }

    pub fn open_edit(&mut self, id: EntityId, draft: D) {
        *self = Modal::Open {
            mode: FormMode::Edit(id),
            draft,
        };
    }

    pub fn close(&mut self) {
        *self = Modal::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Modal::Submitting { .. })
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self {
            Modal::Closed => None,
            Modal::Open { mode, .. } | Modal::Submitting { mode, .. } => Some(*mode),
        }
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            Modal::Closed => None,
            Modal::Open { draft, .. } | Modal::Submitting { draft, .. } => Some(draft),
        }
    }

    /// Only an open, idle form can be edited.
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            Modal::Open { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Moves `Open` to `Submitting`. Returns false in any other state.
    pub fn begin_submit(&mut self) -> bool {
        match std::mem::replace(self, Modal::Closed) {
            Modal::Open { mode, draft } => {
                *self = Modal::Submitting { mode, draft };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Success closes the modal; failure reopens it with the draft intact.
    pub fn finish_submit(&mut self, ok: bool) {
        match std::mem::replace(self, Modal::Closed) {
            Modal::Submitting { mode, draft } if !ok => {
                *self = Modal::Open { mode, draft };
            }
            Modal::Submitting { .. } => {}
            other => *self = other,
        }
    }
}
