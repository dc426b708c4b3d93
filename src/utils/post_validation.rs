use std::path::Path;

use crate::utils::error::{FieldErrors, PostField};
use crate::utils::image::mime_for_path;

/// Required-value checks run before any request is sent.
pub fn validate(title: &str, body: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if title.trim().is_empty() {
        errors.insert(PostField::Title, "Title is required");
    }
    if body.trim().is_empty() {
        errors.insert(PostField::Body, "Body is required");
    }

    errors
}

/// Reject a chosen file that is not an image.
pub fn validate_image(path: Option<&Path>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(path) = path {
        if mime_for_path(path).is_none() {
            errors.insert(PostField::Image, "Please select an image file");
        }
    }

    errors
}
