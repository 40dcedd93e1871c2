pub mod client;
pub mod dto;

pub use client::HttpApiClient;
pub use dto::{AuthResponse, LoginCredentials, SignupCredentials, UserRecord};

use crate::domain::story::{Story, StoryDraft};
use crate::error::AppResult;
use async_trait::async_trait;

/// Port to the remote Hack or Snooze service.
///
/// Every call either returns the decoded response or an `AppError` mapped
/// from the HTTP status; implementations never retry.
#[async_trait]
pub trait HackOrSnoozeApi: Send + Sync {
    /// GET /stories
    async fn list_stories(&self) -> AppResult<Vec<Story>>;

    /// POST /stories
    async fn create_story(&self, token: &str, draft: &StoryDraft) -> AppResult<Story>;

    /// GET /stories/:id
    async fn get_story(&self, story_id: &str) -> AppResult<Story>;

    /// POST /signup
    async fn signup(&self, credentials: &SignupCredentials) -> AppResult<AuthResponse>;

    /// POST /login
    async fn login(&self, credentials: &LoginCredentials) -> AppResult<AuthResponse>;

    /// GET /users/:username?token=
    async fn get_user(&self, username: &str, token: &str) -> AppResult<UserRecord>;

    /// POST /users/:username/favorites/:storyId
    async fn add_favorite(&self, username: &str, story_id: &str, token: &str) -> AppResult<()>;

    /// DELETE /users/:username/favorites/:storyId
    async fn remove_favorite(&self, username: &str, story_id: &str, token: &str) -> AppResult<()>;
}
