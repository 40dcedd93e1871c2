use async_trait::async_trait;
use std::sync::Arc;

use super::error::UserServiceError;
use super::User;
use crate::domain::story::Story;
use crate::infrastructure::api::{HackOrSnoozeApi, LoginCredentials, SignupCredentials};

pub struct UserService {
    api: Arc<dyn HackOrSnoozeApi>,
}

impl UserService {
    pub fn new(api: Arc<dyn HackOrSnoozeApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
pub trait UserServiceApi: Send + Sync {
    /// Register a new account and return the logged-in user
    async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<User, UserServiceError>;

    /// Log in with a username and password
    async fn login(&self, username: &str, password: &str) -> Result<User, UserServiceError>;

    /// Re-authenticate a stored token. Any failure yields `None`.
    async fn restore_from_token(&self, token: &str, username: &str) -> Option<User>;

    /// Favorite a story; the local list only changes once the server has confirmed
    async fn add_favorite(&self, user: &mut User, story: &Story) -> Result<(), UserServiceError>;

    /// Unfavorite a story, dropping every local entry with the same id once confirmed
    async fn remove_favorite(
        &self,
        user: &mut User,
        story: &Story,
    ) -> Result<(), UserServiceError>;
}

#[async_trait]
impl UserServiceApi for UserService {
    async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<User, UserServiceError> {
        tracing::debug!(username, "Signing up");

        let response = self
            .api
            .signup(&SignupCredentials {
                username: username.to_string(),
                password: password.to_string(),
                name: name.to_string(),
            })
            .await?;

        Ok(User::from_record(response.user, response.token))
    }

    async fn login(&self, username: &str, password: &str) -> Result<User, UserServiceError> {
        tracing::debug!(username, "Logging in");

        let response = self
            .api
            .login(&LoginCredentials {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
            .map_err(|e| match UserServiceError::from(e) {
                // an unknown username is just another bad credential
                UserServiceError::NotFound(msg) => UserServiceError::InvalidCredentials(msg),
                other => other,
            })?;

        Ok(User::from_record(response.user, response.token))
    }

    async fn restore_from_token(&self, token: &str, username: &str) -> Option<User> {
        match self.api.get_user(username, token).await {
            Ok(record) => Some(User::from_record(record, token.to_string())),
            Err(e) => {
                tracing::warn!(username, error = %e, "Login via stored credentials failed");
                None
            }
        }
    }

    async fn add_favorite(&self, user: &mut User, story: &Story) -> Result<(), UserServiceError> {
        tracing::debug!(username = %user.username, story_id = %story.story_id, "Adding favorite");

        self.api
            .add_favorite(&user.username, &story.story_id, &user.login_token)
            .await?;

        // the server keeps one entry per story, so a repeat add changes nothing
        if !user.is_favorite(&story.story_id) {
            user.favorites.push(story.clone());
        }
        Ok(())
    }

    async fn remove_favorite(
        &self,
        user: &mut User,
        story: &Story,
    ) -> Result<(), UserServiceError> {
        tracing::debug!(username = %user.username, story_id = %story.story_id, "Removing favorite");

        self.api
            .remove_favorite(&user.username, &story.story_id, &user.login_token)
            .await?;

        user.favorites.retain(|s| s.story_id != story.story_id);
        Ok(())
    }
}
