use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::story::{Story, StoryDraft, StoryList, StoryService, StoryServiceApi};
use crate::domain::user::{User, UserService, UserServiceApi};
use crate::error::{AppError, AppResult};
use crate::infrastructure::api::HackOrSnoozeApi;
use crate::infrastructure::storage::{CredentialStore, StoredCredentials};

/// Result of trying to resume a previous login on start-up
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// Nothing was stored
    NoStoredSession,
    /// The stored token was accepted
    Restored(User),
    /// A token was stored but the server refused it; it has been forgotten
    Rejected,
}

/// Outcome of a star click
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteToggle {
    pub story: Story,
    pub favorite: bool,
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    stories: Option<StoryList>,
}

/// Owner of the current user and the current story feed.
///
/// Every mutation takes the same lock and keeps it for the whole network
/// round trip, so overlapping requests complete one after the other and the
/// local state always matches the last completed call.
pub struct SessionContext {
    story_service: Arc<StoryService>,
    user_service: Arc<UserService>,
    credentials: Arc<dyn CredentialStore>,
    state: Mutex<SessionState>,
}

impl SessionContext {
    pub fn new(
        story_service: Arc<StoryService>,
        user_service: Arc<UserService>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            story_service,
            user_service,
            credentials,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn from_api(api: Arc<dyn HackOrSnoozeApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self::new(
            Arc::new(StoryService::new(api.clone())),
            Arc::new(UserService::new(api)),
            credentials,
        )
    }

    /// Resume the stored login, if any
    pub async fn start(&self) -> AppResult<RestoreOutcome> {
        let Some(stored) = self.credentials.load().await? else {
            return Ok(RestoreOutcome::NoStoredSession);
        };

        let mut state = self.state.lock().await;
        match self
            .user_service
            .restore_from_token(&stored.token, &stored.username)
            .await
        {
            Some(user) => {
                tracing::info!(username = %user.username, "Restored session");
                state.user = Some(user.clone());
                Ok(RestoreOutcome::Restored(user))
            }
            None => {
                self.credentials.clear().await?;
                state.user = None;
                Ok(RestoreOutcome::Rejected)
            }
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let mut state = self.state.lock().await;
        let user = self.user_service.login(username, password).await?;
        self.remember(&user).await?;
        state.user = Some(user.clone());
        tracing::info!(username = %user.username, "Logged in");
        Ok(user)
    }

    pub async fn signup(&self, username: &str, password: &str, name: &str) -> AppResult<User> {
        let mut state = self.state.lock().await;
        let user = self.user_service.signup(username, password, name).await?;
        self.remember(&user).await?;
        state.user = Some(user.clone());
        tracing::info!(username = %user.username, "Signed up");
        Ok(user)
    }

    /// Forget the stored token, then the in-memory user. If the store cannot be
    /// cleared the session stays as it was.
    pub async fn logout(&self) -> AppResult<()> {
        let mut state = self.state.lock().await;
        self.credentials.clear().await?;
        state.user = None;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Fetch the feed and make it the current list
    pub async fn load_stories(&self) -> AppResult<StoryList> {
        let mut state = self.state.lock().await;
        let list = self.story_service.fetch_all().await?;
        state.stories = Some(list.clone());
        Ok(list)
    }

    /// Submit a story as the current user
    pub async fn submit_story(&self, draft: &StoryDraft) -> AppResult<Story> {
        let mut state = self.state.lock().await;
        let SessionState { user, stories } = &mut *state;
        let user = user.as_mut().ok_or_else(not_logged_in)?;

        let story = match stories.as_mut() {
            Some(list) => self.story_service.add_story(list, user, draft).await?,
            None => self.story_service.create_story(user, draft).await?,
        };
        user.own_stories.insert(0, story.clone());

        Ok(story)
    }

    pub async fn add_favorite(&self, story_id: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let story = self.resolve_story(&state, story_id).await?;
        let user = state.user.as_mut().ok_or_else(not_logged_in)?;
        Ok(self.user_service.add_favorite(user, &story).await?)
    }

    pub async fn remove_favorite(&self, story_id: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let story = self.resolve_story(&state, story_id).await?;
        let user = state.user.as_mut().ok_or_else(not_logged_in)?;
        Ok(self.user_service.remove_favorite(user, &story).await?)
    }

    /// Flip the favorite status of a story
    pub async fn toggle_favorite(&self, story_id: &str) -> AppResult<FavoriteToggle> {
        let mut state = self.state.lock().await;
        let story = self.resolve_story(&state, story_id).await?;
        let user = state.user.as_mut().ok_or_else(not_logged_in)?;

        let favorite = if user.is_favorite(story_id) {
            self.user_service.remove_favorite(user, &story).await?;
            false
        } else {
            self.user_service.add_favorite(user, &story).await?;
            true
        };

        Ok(FavoriteToggle { story, favorite })
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.lock().await.user.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.lock().await.user.is_some()
    }

    pub async fn stories(&self) -> Option<StoryList> {
        self.state.lock().await.stories.clone()
    }

    pub async fn favorites(&self) -> Vec<Story> {
        self.state
            .lock()
            .await
            .user
            .as_ref()
            .map(|u| u.favorites.clone())
            .unwrap_or_default()
    }

    pub async fn own_stories(&self) -> Vec<Story> {
        self.state
            .lock()
            .await
            .user
            .as_ref()
            .map(|u| u.own_stories.clone())
            .unwrap_or_default()
    }

    async fn remember(&self, user: &User) -> AppResult<()> {
        self.credentials
            .save(&StoredCredentials {
                username: user.username.clone(),
                token: user.login_token.clone(),
            })
            .await
    }

    /// Find a story in memory, falling back to the server
    async fn resolve_story(&self, state: &SessionState, story_id: &str) -> AppResult<Story> {
        if state.user.is_none() {
            return Err(not_logged_in());
        }

        let known = state
            .stories
            .as_ref()
            .and_then(|list| list.find(story_id))
            .or_else(|| state.user.as_ref().and_then(|u| u.find_story(story_id)));

        match known {
            Some(story) => Ok(story.clone()),
            None => Ok(self.story_service.get_story(story_id).await?),
        }
    }
}

fn not_logged_in() -> AppError {
    AppError::Authentication("You must be logged in".to_string())
}
