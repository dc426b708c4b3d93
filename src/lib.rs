pub mod post;
pub mod utils;

pub use post::post_controller::{ImageChoice, PostController, PostForm};
pub use post::post_model::{NewPost, Post, PostPatch};
pub use post::post_service::PostService;
pub use post::post_store::{Placement, PostStore};
pub use utils::config::ApiConfig;
pub use utils::error::{ClientError, FieldErrors, PostField};
