//! Client-side validation: required fields and required selections only.

use thiserror::Error;

use crate::api::{ApiError, EntityId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Select at least one {0}")]
    EmptySelection(&'static str),

    #[error("No image at position {0}")]
    InvalidImageIndex(usize),

    #[error("{0}")]
    ImageRejected(String),

    #[error(transparent)]
    Upload(#[from] ApiError),
}

pub type FormResult<T> = Result<T, FormError>;

/// Trimmed text, or `MissingField` when blank.
pub fn required_text(value: &str, label: &'static str) -> FormResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(label));
    }
    Ok(trimmed.to_string())
}

/// Trimmed text, `None` when blank.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn required_id(value: Option<EntityId>, label: &'static str) -> FormResult<EntityId> {
    value.ok_or(FormError::MissingField(label))
}

pub fn require_selection<T>(items: &[T], label: &'static str) -> FormResult<()> {
    if items.is_empty() {
        return Err(FormError::EmptySelection(label));
    }
    Ok(())
}
