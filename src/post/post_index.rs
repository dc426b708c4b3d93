use std::path::PathBuf;

use clap::Subcommand;

use crate::post::post_controller::{ImageChoice, PostController, PostForm};
use crate::post::post_model::Post;
use crate::post::post_store::{PostStore, StoreView};
use crate::utils::error::ClientError;
use crate::utils::helpers::{long_date, short_date};

const RECENT_LIMIT: usize = 5;
const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum PostCommand {
    /// Show the post feed, newest first
    List,
    /// Show stats and the most recent posts
    Dashboard,
    /// Show a single post
    Show { id: String },
    /// Create a post
    Create {
        #[arg(long, short, default_value = "")]
        title: String,
        #[arg(long, short, default_value = "")]
        body: String,
        #[arg(long, short)]
        image: Option<PathBuf>,
    },
    /// Edit a post; fields left out keep their current value
    Edit {
        id: String,
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        body: Option<String>,
        #[arg(long, short, conflicts_with = "remove_image")]
        image: Option<PathBuf>,
        #[arg(long)]
        remove_image: bool,
    },
    /// Delete a post
    Delete { id: String },
}

/// Outcome of a command, ready to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }
}

fn image_choice(image: Option<PathBuf>, remove_image: bool) -> ImageChoice {
    match (image, remove_image) {
        (Some(path), _) => ImageChoice::Replace(path),
        (None, true) => ImageChoice::Remove,
        (None, false) => ImageChoice::Keep,
    }
}

/// Run a command against the controller and describe the result
pub async fn run(command: PostCommand, controller: &mut PostController) -> Notice {
    match command {
        PostCommand::List => match controller.load().await {
            Ok(store) => Notice::Success(render_feed(store)),
            Err(e) => Notice::Error(e.user_message()),
        },
        PostCommand::Dashboard => match controller.load().await {
            Ok(store) => Notice::Success(render_dashboard(store)),
            Err(e) => Notice::Error(e.user_message()),
        },
        PostCommand::Show { id } => match controller.fetch(&id).await {
            Ok(post) => Notice::Success(render_post(&post)),
            Err(_) => Notice::Error("Post not found or could not be loaded.".into()),
        },
        PostCommand::Create { title, body, image } => {
            let form = PostForm {
                title,
                body,
                image: image.map(ImageChoice::Replace).unwrap_or_default(),
            };
            match controller.create(form).await {
                Ok(post) => Notice::Success(format!("Post \"{}\" created successfully!", post.title)),
                Err(e) => Notice::Error(e.user_message()),
            }
        }
        PostCommand::Edit {
            id,
            title,
            body,
            image,
            remove_image,
        } => edit(controller, id, title, body, image_choice(image, remove_image)).await,
        PostCommand::Delete { id } => delete(controller, id).await,
    }
}

async fn edit(
    controller: &mut PostController,
    id: String,
    title: Option<String>,
    body: Option<String>,
    image: ImageChoice,
) -> Notice {
    let (title, body) = match (title, body) {
        (Some(title), Some(body)) => (title, body),
        (title, body) => {
            // Prefill untouched fields from the current record
            let current = match controller.load().await {
                Ok(store) => store.get(&id).cloned(),
                Err(e) => return Notice::Error(e.user_message()),
            };
            match current {
                Some(post) => (title.unwrap_or(post.title), body.unwrap_or(post.body)),
                None => return Notice::Error(format!("Post {} was not found.", id)),
            }
        }
    };

    let form = PostForm { title, body, image };
    match controller.edit(&id, form).await {
        Ok(post) => Notice::Success(format!("Post \"{}\" updated successfully!", post.title)),
        Err(e) => Notice::Error(e.user_message()),
    }
}

async fn delete(controller: &mut PostController, id: String) -> Notice {
    let title = match controller.load().await {
        Ok(store) => store.get(&id).map(|p| p.title.clone()),
        Err(_) => None,
    };

    match controller.delete(&id).await {
        Ok(()) => Notice::Success(format!(
            "Post \"{}\" deleted successfully!",
            title.unwrap_or(id)
        )),
        Err(e) => Notice::Error(e.user_message()),
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > PREVIEW_CHARS {
        let cut: String = body.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

fn image_label(post: &Post) -> &'static str {
    if post.has_image() { "[image]" } else { "" }
}

pub fn render_feed(store: &PostStore) -> String {
    match store.view() {
        StoreView::Loading => "Loading posts...".into(),
        StoreView::Failed(message) => format!("Error: {}", message),
        StoreView::Empty => "No posts available.".into(),
        StoreView::Posts(_) => store
            .feed()
            .iter()
            .map(|post| {
                format!(
                    "{} {}\n  {}\n  {} · {}",
                    post.title,
                    image_label(post),
                    preview(&post.body),
                    long_date(&post.created_at),
                    post.id
                )
                .replace(" \n", "\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

pub fn render_dashboard(store: &PostStore) -> String {
    let view = match store.view() {
        StoreView::Loading => return "Loading posts...".into(),
        StoreView::Failed(message) => return format!("Oops! Something went wrong.\n{}", message),
        view => view,
    };

    let stats = store.stats();
    let mut out = vec![
        "Dashboard".to_string(),
        format!("Total Posts: {}", stats.total),
        format!(
            "Last Post: {}",
            stats.last_posted.as_ref().map(short_date).unwrap_or_else(|| "N/A".into())
        ),
        format!(
            "Last Edit: {}",
            stats.last_edited.as_ref().map(short_date).unwrap_or_else(|| "N/A".into())
        ),
        String::new(),
        format!(
            "Recent Posts (Showing {} of {})",
            stats.total.min(RECENT_LIMIT),
            stats.total
        ),
    ];

    if view == StoreView::Empty {
        out.push("No Posts Yet. Start creating content!".into());
    } else {
        for post in store.recent(RECENT_LIMIT) {
            let mut row = format!(
                "  {} | {} | created {} | updated {}",
                post.id,
                post.title,
                short_date(&post.created_at),
                short_date(&post.updated_at),
            );
            if post.has_image() {
                row.push_str(" | ");
                row.push_str(image_label(post));
            }
            out.push(row);
        }
    }

    out.join("\n")
}

pub fn render_post(post: &Post) -> String {
    let mut out = Vec::new();
    if post.has_image() {
        let size = crate::utils::image::decode(&post.image_data)
            .map(|img| format!("{}, {} bytes", img.mime, img.bytes.len()))
            .unwrap_or_else(|_| "Image Unavailable".into());
        out.push(format!("[image: {}]", size));
    }
    out.push(post.title.clone());
    out.push(long_date(&post.created_at));
    out.push(String::new());
    out.push(post.body.clone());
    out.join("\n")
}

impl From<ClientError> for Notice {
    fn from(e: ClientError) -> Self {
        Notice::Error(e.user_message())
    }
}
