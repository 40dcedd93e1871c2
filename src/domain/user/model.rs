use chrono::{DateTime, Utc};

use crate::domain::story::Story;
use crate::infrastructure::api::UserRecord;

/// The logged-in user: identity, token and the two story collections
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub favorites: Vec<Story>,
    pub own_stories: Vec<Story>,
    pub login_token: String,
}

impl User {
    pub fn from_record(record: UserRecord, token: String) -> Self {
        Self {
            username: record.username,
            name: record.name,
            created_at: record.created_at,
            favorites: record.favorites,
            own_stories: record.stories,
            login_token: token,
        }
    }

    pub fn is_favorite(&self, story_id: &str) -> bool {
        self.favorites.iter().any(|s| s.story_id == story_id)
    }

    pub fn is_own_story(&self, story_id: &str) -> bool {
        self.own_stories.iter().any(|s| s.story_id == story_id)
    }

    /// Look a story up in the user's own collections
    pub fn find_story(&self, story_id: &str) -> Option<&Story> {
        self.favorites
            .iter()
            .chain(self.own_stories.iter())
            .find(|s| s.story_id == story_id)
    }
}
