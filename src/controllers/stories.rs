use std::sync::Arc;
use tokio::sync::Mutex;

use super::nav::{NavController, PageComponent};
use super::render::{
    story_list_markup, story_markup, ALL_STORIES_LIST_ID, FAVORITE_STORIES_LIST_ID,
    NO_FAVORITES_MESSAGE, NO_OWN_STORIES_MESSAGE, OWN_STORIES_LIST_ID,
};
use crate::domain::session::SessionContext;
use crate::domain::story::StoryDraft;
use crate::domain::user::User;
use crate::error::{AppError, AppResult};

/// Story page flows: loading, listing, submitting and starring stories
pub struct StoriesController {
    session: Arc<SessionContext>,
    nav: Arc<Mutex<NavController>>,
}

impl StoriesController {
    pub fn new(session: Arc<SessionContext>, nav: Arc<Mutex<NavController>>) -> Self {
        Self { session, nav }
    }

    /// Fetch the feed and render it
    pub async fn get_and_show_stories_on_start(&self) -> AppResult<String> {
        self.session.load_stories().await?;
        self.put_stories_on_page().await
    }

    /// Render the current feed, loading it first if nothing is loaded yet
    pub async fn put_stories_on_page(&self) -> AppResult<String> {
        let stories = match self.session.stories().await {
            Some(list) => list,
            None => self.session.load_stories().await?,
        };
        let user = self.session.current_user().await;

        let markup = story_list_markup(ALL_STORIES_LIST_ID, &stories, user.as_ref(), None)?;
        self.nav.lock().await.nav_all_stories();
        Ok(markup)
    }

    /// Submit a story and return the markup for the new list item, which goes
    /// at the top of the feed.
    pub async fn add_new_story_to_page(&self, draft: &StoryDraft) -> AppResult<String> {
        let story = self.session.submit_story(draft).await?;
        let markup = story_markup(&story, Some(false))?;

        let mut nav = self.nav.lock().await;
        nav.hide_page_components();
        nav.show(PageComponent::AllStories);

        Ok(markup)
    }

    pub async fn put_favorites_on_page(&self) -> AppResult<String> {
        let user = self.require_user().await?;
        let markup = story_list_markup(
            FAVORITE_STORIES_LIST_ID,
            &user.favorites,
            Some(&user),
            Some(NO_FAVORITES_MESSAGE),
        )?;
        self.nav.lock().await.nav_favorites_click();
        Ok(markup)
    }

    pub async fn put_own_stories_on_page(&self) -> AppResult<String> {
        let user = self.require_user().await?;
        let markup = story_list_markup(
            OWN_STORIES_LIST_ID,
            &user.own_stories,
            Some(&user),
            Some(NO_OWN_STORIES_MESSAGE),
        )?;
        self.nav.lock().await.nav_my_stories_click();
        Ok(markup)
    }

    /// Star click: flip the favorite and return the re-rendered list item
    pub async fn toggle_story_favorite(&self, story_id: &str) -> AppResult<String> {
        let toggled = self.session.toggle_favorite(story_id).await?;
        story_markup(&toggled.story, Some(toggled.favorite))
    }

    async fn require_user(&self) -> AppResult<User> {
        self.session
            .current_user()
            .await
            .ok_or_else(|| AppError::Authentication("You must be logged in".to_string()))
    }
}
