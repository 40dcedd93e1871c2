use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::story::{Story, StoryDraft};

/// Response for GET /stories
#[derive(Debug, Serialize, Deserialize)]
pub struct StoriesResponse {
    pub stories: Vec<Story>,
}

/// Response for GET /stories/:id and POST /stories
#[derive(Debug, Serialize, Deserialize)]
pub struct StoryResponse {
    pub story: Story,
}

/// Request body for POST /stories
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateStoryRequest {
    pub token: String,
    pub story: StoryDraft,
}

/// Body carrying only the session token (favorite add/remove)
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupCredentials {
    pub username: String,
    pub password: String,
    pub name: String,
}

/// Request body for POST /login and POST /signup
#[derive(Debug, Serialize, Deserialize)]
pub struct UserEnvelope<T> {
    pub user: T,
}

/// User record as the API returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: Vec<Story>,
    #[serde(default)]
    pub stories: Vec<Story>,
}

/// Response for POST /login and POST /signup
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserRecord,
    pub token: String,
}

/// Response for GET /users/:username
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserRecord,
}
