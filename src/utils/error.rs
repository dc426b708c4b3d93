use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Form field a validation message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PostField {
    Title,
    Body,
    Image,
}

impl PostField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Body => "body",
            PostField::Image => "image",
        }
    }
}

/// Field-keyed validation messages. Empty means the form passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<PostField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: PostField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: PostField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: PostField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (PostField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field.as_str(), msg))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to fetch posts: {0}")]
    FetchError(String),

    #[error("Failed to create post: {0}")]
    CreateError(String),

    #[error("Failed to update post: {0}")]
    UpdateError(String),

    #[error("Failed to delete post: {0}")]
    DeleteError(String),

    #[error("Failed to read image: {0}")]
    ReadError(String),

    #[error("Validation Error: {0}")]
    ValidationError(FieldErrors),

    #[error("Configuration Error: {0}")]
    ConfigError(String),
}

impl ClientError {
    /// Stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::FetchError(..) => "FETCH_ERROR",
            ClientError::CreateError(..) => "CREATE_ERROR",
            ClientError::UpdateError(..) => "UPDATE_ERROR",
            ClientError::DeleteError(..) => "DELETE_ERROR",
            ClientError::ReadError(..) => "READ_ERROR",
            ClientError::ValidationError(..) => "VALIDATION_ERROR",
            ClientError::ConfigError(..) => "CONFIG_ERROR",
        }
    }

    /// Plain-language notice for the user. Never includes transport details.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::FetchError(..) => "Failed to load posts. Please try again later.".into(),
            ClientError::CreateError(..) => "Failed to create post. Please try again.".into(),
            ClientError::UpdateError(..) => "Failed to update post. Please try again.".into(),
            ClientError::DeleteError(..) => "Failed to delete post. Please try again.".into(),
            ClientError::ReadError(..) => "Could not read the selected image.".into(),
            ClientError::ValidationError(errors) => {
                let fields: Vec<&str> = errors.iter().map(|(_, msg)| msg).collect();
                format!("Please fill in all required fields. {}", fields.join(". "))
                    .trim_end()
                    .to_string()
            }
            ClientError::ConfigError(..) => {
                "The blog API address is not configured correctly.".into()
            }
        }
    }
}
