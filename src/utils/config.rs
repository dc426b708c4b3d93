use std::env;

use reqwest::Url;

use crate::utils::error::ClientError;

pub const API_BASE_URL_VAR: &str = "API_BASE_URL";

/// Blog API configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    base: Url,
}

impl ApiConfig {
    /// Build a config from an explicit base address
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ClientError::ConfigError(format!(
                "{} is empty",
                API_BASE_URL_VAR
            )));
        }

        let base = Url::parse(trimmed)
            .map_err(|e| ClientError::ConfigError(format!("Invalid base URL '{}': {}", trimmed, e)))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ClientError::ConfigError(format!(
                "Unsupported URL scheme '{}'",
                base.scheme()
            )));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            base,
        })
    }

    /// Load configuration from `API_BASE_URL`
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = env::var(API_BASE_URL_VAR)
            .map_err(|_| ClientError::ConfigError(format!("{} is required", API_BASE_URL_VAR)))?;
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // http(s) URLs always have a path, so this cannot fail
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Collection endpoint, `{base}/posts`
    pub fn posts_url(&self) -> String {
        self.with_segments(&["posts"]).to_string()
    }

    /// Item endpoint, `{base}/posts/{id}`, with the id escaped as a single path segment
    pub fn post_url(&self, id: &str) -> Result<String, String> {
        // Dot segments are dropped or resolved by URL parsing and would address another resource
        if id.is_empty() || id == "." || id == ".." {
            return Err(format!("Post id '{}' cannot be used in a request path", id));
        }
        Ok(self.with_segments(&["posts", id]).to_string())
    }
}
