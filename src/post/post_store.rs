use chrono::{DateTime, Utc};
use log::warn;

use crate::post::post_model::Post;

/// Where newly created posts land in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Append,
    Prepend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// What a view should render; a failed load is never shown as "no posts"
#[derive(Debug, PartialEq)]
pub enum StoreView<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Posts(&'a [Post]),
}

/// Figures shown on the dashboard cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostStats {
    pub total: usize,
    pub last_posted: Option<DateTime<Utc>>,
    pub last_edited: Option<DateTime<Utc>>,
}

/// Session-scoped cache of the post collection, patched after confirmed calls
#[derive(Debug, Clone)]
pub struct PostStore {
    posts: Vec<Post>,
    state: LoadState,
    placement: Placement,
}

impl PostStore {
    pub fn new(placement: Placement) -> Self {
        Self {
            posts: Vec::new(),
            state: LoadState::Loading,
            placement,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Replace the collection with a fresh `list()` result
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.state = LoadState::Ready;
    }

    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.posts.clear();
        self.state = LoadState::Failed(message.into());
    }

    pub fn apply_created(&mut self, post: Post) {
        if let Some(existing) = self.posts.iter_mut().find(|p| p.id == post.id) {
            warn!("Created post {} already present; replacing local copy", post.id);
            *existing = post;
            return;
        }

        match self.placement {
            Placement::Append => self.posts.push(post),
            Placement::Prepend => self.posts.insert(0, post),
        }
    }

    /// Returns false, leaving the collection untouched, when no post has this id
    pub fn apply_updated(&mut self, post: Post) -> bool {
        match self.posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => {
                *existing = post;
                true
            }
            None => {
                warn!("Updated post {} is not in the local collection; dropped", post.id);
                false
            }
        }
    }

    pub fn apply_deleted(&mut self, id: &str) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        before != self.posts.len()
    }

    /// Newest-created first, at most `limit` posts
    pub fn recent(&self, limit: usize) -> Vec<&Post> {
        let mut sorted: Vec<&Post> = self.posts.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted.truncate(limit);
        sorted
    }

    /// Reverse of storage order, as the reader home page shows it
    pub fn feed(&self) -> Vec<&Post> {
        self.posts.iter().rev().collect()
    }

    pub fn stats(&self) -> PostStats {
        let latest = self.posts.iter().max_by_key(|p| p.created_at);
        PostStats {
            total: self.posts.len(),
            last_posted: latest.map(|p| p.created_at),
            last_edited: latest.map(|p| p.updated_at),
        }
    }

    pub fn view(&self) -> StoreView<'_> {
        match &self.state {
            LoadState::Loading => StoreView::Loading,
            LoadState::Failed(message) => StoreView::Failed(message),
            LoadState::Ready if self.posts.is_empty() => StoreView::Empty,
            LoadState::Ready => StoreView::Posts(&self.posts),
        }
    }
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new(Placement::default())
    }
}
