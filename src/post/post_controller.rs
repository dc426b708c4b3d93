use std::path::PathBuf;

use log::info;

use crate::post::post_model::{NewPost, Post, PostPatch};
use crate::post::post_service::PostService;
use crate::post::post_store::{Placement, PostStore};
use crate::utils::error::ClientError;
use crate::utils::image;
use crate::utils::post_validation::{validate, validate_image};

/// What a submitted form does with the post image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageChoice {
    /// Leave the image as it is (no image on create)
    #[default]
    Keep,
    Replace(PathBuf),
    Remove,
}

impl ImageChoice {
    fn path(&self) -> Option<&std::path::Path> {
        match self {
            ImageChoice::Replace(path) => Some(path.as_path()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub body: String,
    pub image: ImageChoice,
}

/// Owns the post store and applies server results to it only after they are confirmed
pub struct PostController {
    service: PostService,
    store: PostStore,
}

impl PostController {
    pub fn new(service: PostService, placement: Placement) -> Self {
        Self {
            service,
            store: PostStore::new(placement),
        }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn find(&self, id: &str) -> Option<&Post> {
        self.store.get(id)
    }

    /// Rebuild the store from a full fetch
    pub async fn load(&mut self) -> Result<&PostStore, ClientError> {
        match self.service.list().await {
            Ok(posts) => {
                self.store.replace_all(posts);
                Ok(&self.store)
            }
            Err(e) => {
                self.store.mark_failed(e.user_message());
                Err(e)
            }
        }
    }

    pub async fn fetch(&self, id: &str) -> Result<Post, ClientError> {
        self.service.get(id).await
    }

    pub async fn create(&mut self, form: PostForm) -> Result<Post, ClientError> {
        check_form(&form)?;

        let image_data = match &form.image {
            ImageChoice::Replace(path) => image::encode_file(path).await?,
            ImageChoice::Keep | ImageChoice::Remove => String::new(),
        };

        let draft = NewPost {
            title: form.title,
            body: form.body,
            image_data,
        };

        let created = self.service.create(draft).await?;
        self.store.apply_created(created.clone());
        info!("Post \"{}\" added to the local collection", created.title);

        Ok(created)
    }

    pub async fn edit(&mut self, id: &str, form: PostForm) -> Result<Post, ClientError> {
        check_form(&form)?;

        let image_data = match &form.image {
            ImageChoice::Keep => None,
            ImageChoice::Replace(path) => Some(image::encode_file(path).await?),
            ImageChoice::Remove => Some(String::new()),
        };

        let patch = PostPatch {
            title: Some(form.title),
            body: Some(form.body),
            image_data,
            updated_at: None,
        };

        let updated = self.service.update(id, patch).await?;
        self.store.apply_updated(updated.clone());

        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        self.service.delete(id).await?;
        self.store.apply_deleted(id);
        Ok(())
    }
}

fn check_form(form: &PostForm) -> Result<(), ClientError> {
    let mut errors = validate(&form.title, &form.body);
    errors.merge(validate_image(form.image.path()));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ClientError::ValidationError(errors))
    }
}
