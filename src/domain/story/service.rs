use async_trait::async_trait;
use std::sync::Arc;

use super::error::StoryServiceError;
use super::{Story, StoryDraft, StoryList};
use crate::domain::user::User;
use crate::infrastructure::api::HackOrSnoozeApi;

pub struct StoryService {
    api: Arc<dyn HackOrSnoozeApi>,
}

impl StoryService {
    pub fn new(api: Arc<dyn HackOrSnoozeApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
pub trait StoryServiceApi: Send + Sync {
    /// Fetch the whole feed. Every call goes to the server.
    async fn fetch_all(&self) -> Result<StoryList, StoryServiceError>;

    /// Create a story as `user` and prepend the server's echo to `list`
    async fn add_story(
        &self,
        list: &mut StoryList,
        user: &User,
        draft: &StoryDraft,
    ) -> Result<Story, StoryServiceError>;

    /// Create a story without touching any list
    async fn create_story(
        &self,
        user: &User,
        draft: &StoryDraft,
    ) -> Result<Story, StoryServiceError>;

    async fn get_story(&self, story_id: &str) -> Result<Story, StoryServiceError>;
}

#[async_trait]
impl StoryServiceApi for StoryService {
    async fn fetch_all(&self) -> Result<StoryList, StoryServiceError> {
        let stories = self.api.list_stories().await?;
        tracing::debug!(count = stories.len(), "Fetched stories");
        Ok(StoryList::new(stories))
    }

    async fn add_story(
        &self,
        list: &mut StoryList,
        user: &User,
        draft: &StoryDraft,
    ) -> Result<Story, StoryServiceError> {
        let story = self.create_story(user, draft).await?;
        list.prepend(story.clone());
        Ok(story)
    }

    async fn create_story(
        &self,
        user: &User,
        draft: &StoryDraft,
    ) -> Result<Story, StoryServiceError> {
        tracing::debug!(username = %user.username, title = %draft.title, "Submitting story");
        Ok(self.api.create_story(&user.login_token, draft).await?)
    }

    async fn get_story(&self, story_id: &str) -> Result<Story, StoryServiceError> {
        Ok(self.api.get_story(story_id).await?)
    }
}
