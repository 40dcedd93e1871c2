use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{
    AuthResponse, CreateStoryRequest, LoginCredentials, SignupCredentials, StoriesResponse,
    StoryResponse, TokenRequest, UserEnvelope, UserRecord, UserResponse,
};
use super::HackOrSnoozeApi;
use crate::domain::story::{Story, StoryDraft};
use crate::error::{AppError, AppResult};

/// reqwest-backed implementation of the Hack or Snooze API
pub struct HttpApiClient {
    base_url: String,
    http_client: Client,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn favorite_url(&self, username: &str, story_id: &str) -> String {
        self.url(&format!(
            "/users/{}/favorites/{}",
            urlencoding::encode(username),
            urlencoding::encode(story_id)
        ))
    }
}

/// Fail with the mapped error for non-success statuses, otherwise decode the body
async fn parse_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let response = ensure_success(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::from_status(status, &body))
}

#[async_trait]
impl HackOrSnoozeApi for HttpApiClient {
    async fn list_stories(&self) -> AppResult<Vec<Story>> {
        let response = self.http_client.get(self.url("/stories")).send().await?;
        let body: StoriesResponse = parse_json(response).await?;
        Ok(body.stories)
    }

    async fn create_story(&self, token: &str, draft: &StoryDraft) -> AppResult<Story> {
        let request = CreateStoryRequest {
            token: token.to_string(),
            story: draft.clone(),
        };
        let response = self
            .http_client
            .post(self.url("/stories"))
            .json(&request)
            .send()
            .await?;
        let body: StoryResponse = parse_json(response).await?;
        Ok(body.story)
    }

    async fn get_story(&self, story_id: &str) -> AppResult<Story> {
        let response = self
            .http_client
            .get(self.url(&format!("/stories/{}", urlencoding::encode(story_id))))
            .send()
            .await?;
        let body: StoryResponse = parse_json(response).await?;
        Ok(body.story)
    }

    async fn signup(&self, credentials: &SignupCredentials) -> AppResult<AuthResponse> {
        let response = self
            .http_client
            .post(self.url("/signup"))
            .json(&UserEnvelope {
                user: credentials.clone(),
            })
            .send()
            .await?;
        parse_json(response).await
    }

    async fn login(&self, credentials: &LoginCredentials) -> AppResult<AuthResponse> {
        let response = self
            .http_client
            .post(self.url("/login"))
            .json(&UserEnvelope {
                user: credentials.clone(),
            })
            .send()
            .await?;
        parse_json(response).await
    }

    async fn get_user(&self, username: &str, token: &str) -> AppResult<UserRecord> {
        let response = self
            .http_client
            .get(self.url(&format!("/users/{}", urlencoding::encode(username))))
            .query(&[("token", token)])
            .send()
            .await?;
        let body: UserResponse = parse_json(response).await?;
        Ok(body.user)
    }

    async fn add_favorite(&self, username: &str, story_id: &str, token: &str) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.favorite_url(username, story_id))
            .json(&TokenRequest {
                token: token.to_string(),
            })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn remove_favorite(&self, username: &str, story_id: &str, token: &str) -> AppResult<()> {
        let response = self
            .http_client
            .delete(self.favorite_url(username, story_id))
            .json(&TokenRequest {
                token: token.to_string(),
            })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
