pub mod config;
pub mod error;
pub mod helpers;
pub mod image;
pub mod post_validation;
