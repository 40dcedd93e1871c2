//! In-process fakes of the remote API and the credential store for unit tests.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use reqwest::Url;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::story::{Story, StoryDraft};
use crate::error::{AppError, AppResult};
use crate::infrastructure::api::{
    AuthResponse, HackOrSnoozeApi, LoginCredentials, SignupCredentials, UserRecord,
};
use crate::infrastructure::storage::{CredentialStore, MemoryCredentialStore, StoredCredentials};

pub fn sample_story(id: &str) -> Story {
    Story {
        story_id: id.to_string(),
        title: format!("Story {}", id),
        author: "Author".to_string(),
        url: format!("https://example.com/{}", id),
        username: "poster".to_string(),
        created_at: Utc::now(),
    }
}

struct FakeAccount {
    password: String,
    name: String,
    favorites: Vec<String>,
    stories: Vec<Story>,
}

#[derive(Default)]
struct FakeState {
    stories: Vec<Story>,
    accounts: HashMap<String, FakeAccount>,
    fail_next_favorite: bool,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    next_id: AtomicUsize,
    pub calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, username: &str, password: &str, name: &str) {
        self.state.lock().accounts.insert(
            username.to_string(),
            FakeAccount {
                password: password.to_string(),
                name: name.to_string(),
                favorites: Vec::new(),
                stories: Vec::new(),
            },
        );
    }

    /// Newest first, like the real feed
    pub fn seed_story(&self, story: Story) {
        self.state.lock().stories.insert(0, story);
    }

    pub fn seed_user_story(&self, username: &str, story: Story) {
        let mut state = self.state.lock();
        state.stories.insert(0, story.clone());
        if let Some(account) = state.accounts.get_mut(username) {
            account.stories.insert(0, story);
        }
    }

    pub fn fail_next_favorite_call(&self) {
        self.state.lock().fail_next_favorite = true;
    }

    pub fn server_favorites(&self, username: &str) -> Vec<String> {
        self.state
            .lock()
            .accounts
            .get(username)
            .map(|a| a.favorites.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn token_for(username: &str) -> String {
        format!("token-{}", username)
    }

    fn record(state: &FakeState, username: &str) -> AppResult<UserRecord> {
        let account = state
            .accounts
            .get(username)
            .ok_or_else(|| AppError::NotFound(format!("No user {}", username)))?;

        Ok(UserRecord {
            username: username.to_string(),
            name: account.name.clone(),
            created_at: Utc::now(),
            favorites: account
                .favorites
                .iter()
                .filter_map(|id| state.stories.iter().find(|s| &s.story_id == id).cloned())
                .collect(),
            stories: account.stories.clone(),
        })
    }

    fn authorize(state: &FakeState, token: &str) -> AppResult<String> {
        state
            .accounts
            .keys()
            .find(|username| Self::token_for(username) == token)
            .cloned()
            .ok_or_else(|| AppError::Authentication("Invalid token".to_string()))
    }

    fn favorite_guard(&self, username: &str, token: &str) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        if state.fail_next_favorite {
            state.fail_next_favorite = false;
            return Err(AppError::Network("connection reset".to_string()));
        }
        let owner = Self::authorize(&state, token)?;
        if owner != username {
            return Err(AppError::Authentication("Token does not match user".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl HackOrSnoozeApi for FakeApi {
    async fn list_stories(&self) -> AppResult<Vec<Story>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().stories.clone())
    }

    async fn create_story(&self, token: &str, draft: &StoryDraft) -> AppResult<Story> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        let username = Self::authorize(&state, token)?;
        Url::parse(&draft.url).map_err(|e| AppError::Validation(e.to_string()))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let story = Story {
            story_id: format!("created-{}", id),
            title: draft.title.trim().to_string(),
            author: draft.author.clone(),
            url: draft.url.clone(),
            username: username.clone(),
            created_at: Utc::now(),
        };
        state.stories.insert(0, story.clone());
        if let Some(account) = state.accounts.get_mut(&username) {
            account.stories.insert(0, story.clone());
        }
        Ok(story)
    }

    async fn get_story(&self, story_id: &str) -> AppResult<Story> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .stories
            .iter()
            .find(|s| s.story_id == story_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No story {}", story_id)))
    }

    async fn signup(&self, credentials: &SignupCredentials) -> AppResult<AuthResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self
            .state
            .lock()
            .accounts
            .contains_key(&credentials.username)
        {
            return Err(AppError::Validation("Username already taken".to_string()));
        }
        self.register(&credentials.username, &credentials.password, &credentials.name);
        let state = self.state.lock();
        Ok(AuthResponse {
            user: Self::record(&state, &credentials.username)?,
            token: Self::token_for(&credentials.username),
        })
    }

    async fn login(&self, credentials: &LoginCredentials) -> AppResult<AuthResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        match state.accounts.get(&credentials.username) {
            None => Err(AppError::NotFound(format!(
                "No user: {}",
                credentials.username
            ))),
            Some(account) if account.password == credentials.password => Ok(AuthResponse {
                user: Self::record(&state, &credentials.username)?,
                token: Self::token_for(&credentials.username),
            }),
            Some(_) => Err(AppError::Authentication("Invalid password".to_string())),
        }
    }

    async fn get_user(&self, username: &str, token: &str) -> AppResult<UserRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        if Self::authorize(&state, token)? != username {
            return Err(AppError::Authentication("Token does not match user".to_string()));
        }
        Self::record(&state, username)
    }

    async fn add_favorite(&self, username: &str, story_id: &str, token: &str) -> AppResult<()> {
        self.favorite_guard(username, token)?;
        let mut state = self.state.lock();
        if let Some(account) = state.accounts.get_mut(username) {
            if !account.favorites.iter().any(|id| id == story_id) {
                account.favorites.push(story_id.to_string());
            }
        }
        Ok(())
    }

    async fn remove_favorite(&self, username: &str, story_id: &str, token: &str) -> AppResult<()> {
        self.favorite_guard(username, token)?;
        let mut state = self.state.lock();
        if let Some(account) = state.accounts.get_mut(username) {
            account.favorites.retain(|id| id != story_id);
        }
        Ok(())
    }
}

/// Credential store that reads fine but refuses every write
pub struct ReadOnlyCredentialStore {
    inner: MemoryCredentialStore,
}

impl ReadOnlyCredentialStore {
    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            inner: MemoryCredentialStore::with_credentials(credentials),
        }
    }
}

#[async_trait]
impl CredentialStore for ReadOnlyCredentialStore {
    async fn load(&self) -> AppResult<Option<StoredCredentials>> {
        self.inner.load().await
    }

    async fn save(&self, _credentials: &StoredCredentials) -> AppResult<()> {
        Err(AppError::Storage("permission denied".to_string()))
    }

    async fn clear(&self) -> AppResult<()> {
        Err(AppError::Storage("permission denied".to_string()))
    }
}
