use log::{debug, error, info};
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::post::post_model::{NewPost, Post, PostPatch};
use crate::utils::config::ApiConfig;
use crate::utils::error::ClientError;
use crate::utils::helpers::{StampClock, generate_post_id};

/// Client for the remote `/posts` resource
pub struct PostService {
    config: ApiConfig,
    client: reqwest::Client,
    clock: StampClock,
}

impl PostService {
    /// Create a new PostService from `API_BASE_URL`
    pub fn new() -> Result<Self, ClientError> {
        let config = ApiConfig::from_env()?;
        Ok(Self::with_config(config))
    }

    /// Create a new PostService with custom config
    pub fn with_config(config: ApiConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            config,
            client,
            clock: StampClock::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch the whole collection in server order
    pub async fn list(&self) -> Result<Vec<Post>, ClientError> {
        let url = self.config.posts_url();
        debug!("GET {}", url);

        let result: Result<Vec<Post>, String> = async {
            let response = self.client.get(&url).send().await.map_err(|e| e.to_string())?;
            read_json(response).await
        }
        .await;

        match result {
            Ok(posts) => {
                info!("Fetched {} posts", posts.len());
                Ok(posts)
            }
            Err(e) => {
                error!("Error Getting Posts: {}", e);
                Err(ClientError::FetchError(e))
            }
        }
    }

    /// Fetch a single post by id
    pub async fn get(&self, id: &str) -> Result<Post, ClientError> {
        let result: Result<Post, String> = async {
            let url = self.config.post_url(id)?;
            debug!("GET {}", url);
            let response = self.client.get(&url).send().await.map_err(|e| e.to_string())?;
            read_json(response).await
        }
        .await;

        result.map_err(|e| {
            error!("Error Getting Post {}: {}", id, e);
            ClientError::FetchError(e)
        })
    }

    /// Stamp id and timestamps on a draft, send it, and return the server's record
    pub async fn create(&self, draft: NewPost) -> Result<Post, ClientError> {
        let stamped = self.clock.stamp();
        let new_post = Post {
            id: generate_post_id(),
            title: draft.title,
            body: draft.body,
            image_data: draft.image_data,
            created_at: stamped,
            updated_at: stamped,
        };

        let url = self.config.posts_url();
        debug!("POST {} (id {})", url, new_post.id);

        let result: Result<Post, String> = async {
            let response = self
                .client
                .post(&url)
                .json(&new_post)
                .send()
                .await
                .map_err(|e| e.to_string())?;
            read_json(response).await
        }
        .await;

        match result {
            Ok(post) => {
                info!("Created post {}", post.id);
                Ok(post)
            }
            Err(e) => {
                error!("Error Creating Post: {}", e);
                Err(ClientError::CreateError(e))
            }
        }
    }

    /// Send a partial update; `updatedAt` is always overwritten with a fresh stamp
    pub async fn update(&self, id: &str, patch: PostPatch) -> Result<Post, ClientError> {
        let patch = PostPatch {
            updated_at: Some(self.clock.stamp()),
            ..patch
        };

        let result: Result<Post, String> = async {
            let url = self.config.post_url(id)?;
            debug!("PATCH {}", url);
            let response = self
                .client
                .patch(&url)
                .json(&patch)
                .send()
                .await
                .map_err(|e| e.to_string())?;
            read_json(response).await
        }
        .await;

        match result {
            Ok(post) => {
                info!("Updated post {}", post.id);
                Ok(post)
            }
            Err(e) => {
                error!("Error Updating Post: {}", e);
                Err(ClientError::UpdateError(e))
            }
        }
    }

    /// Delete a post; only a 2xx response counts as deleted
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let result: Result<(), String> = async {
            let url = self.config.post_url(id)?;
            debug!("DELETE {}", url);
            let response = self.client.delete(&url).send().await.map_err(|e| e.to_string())?;
            check_status(response).await.map(|_| ())
        }
        .await;

        match result {
            Ok(()) => {
                info!("Deleted post {}", id);
                Ok(())
            }
            Err(e) => {
                error!("Error Deleting Post: {}", e);
                Err(ClientError::DeleteError(e))
            }
        }
    }
}

async fn check_status(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        Err(format!("Request failed with status code {}", status.as_u16()))
    } else {
        Err(format!(
            "Request failed with status code {}: {}",
            status.as_u16(),
            text
        ))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
