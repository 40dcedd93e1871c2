use std::collections::BTreeSet;

use crate::domain::user::User;

/// Sections of the page that can be shown or hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PageComponent {
    AllStories,
    FavoriteStories,
    OwnStories,
    LoginForm,
    SignupForm,
    SubmitForm,
    UserProfile,
}

/// Session-dependent parts of the navigation bar
#[derive(Debug, Clone, PartialEq)]
pub struct NavBar {
    pub main_links_visible: bool,
    pub login_visible: bool,
    pub logout_visible: bool,
    pub user_profile_label: Option<String>,
}

impl Default for NavBar {
    fn default() -> Self {
        Self {
            main_links_visible: false,
            login_visible: true,
            logout_visible: false,
            user_profile_label: None,
        }
    }
}

/// Tracks what is on screen in response to nav clicks and session changes
#[derive(Debug, Clone, Default)]
pub struct NavController {
    visible: BTreeSet<PageComponent>,
    nav: NavBar,
}

impl NavController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nav_bar(&self) -> &NavBar {
        &self.nav
    }

    pub fn is_visible(&self, component: PageComponent) -> bool {
        self.visible.contains(&component)
    }

    pub fn visible_components(&self) -> Vec<PageComponent> {
        self.visible.iter().copied().collect()
    }

    pub fn show(&mut self, component: PageComponent) {
        self.visible.insert(component);
    }

    pub fn hide_page_components(&mut self) {
        self.visible.clear();
    }

    /// Site name clicked
    pub fn nav_all_stories(&mut self) {
        tracing::debug!("nav_all_stories");
        self.hide_page_components();
        self.show(PageComponent::AllStories);
    }

    pub fn nav_login_click(&mut self) {
        tracing::debug!("nav_login_click");
        self.hide_page_components();
        self.show(PageComponent::LoginForm);
        self.show(PageComponent::SignupForm);
    }

    /// Opens the submit form above the current list. Ignored when logged out.
    pub fn nav_submit_story_click(&mut self) -> bool {
        tracing::debug!("nav_submit_story_click");
        if !self.nav.main_links_visible {
            return false;
        }
        self.show(PageComponent::SubmitForm);
        true
    }

    pub fn nav_favorites_click(&mut self) -> bool {
        self.show_only_when_logged_in(PageComponent::FavoriteStories)
    }

    pub fn nav_my_stories_click(&mut self) -> bool {
        self.show_only_when_logged_in(PageComponent::OwnStories)
    }

    pub fn nav_profile_click(&mut self) -> bool {
        self.show_only_when_logged_in(PageComponent::UserProfile)
    }

    /// Switch the nav bar to its logged-in look and return to the feed
    pub fn update_nav_on_login(&mut self, user: &User) {
        tracing::debug!(username = %user.username, "update_nav_on_login");
        self.nav = NavBar {
            main_links_visible: true,
            login_visible: false,
            logout_visible: true,
            user_profile_label: Some(user.username.clone()),
        };
        self.nav_all_stories();
    }

    pub fn update_nav_on_logout(&mut self) {
        tracing::debug!("update_nav_on_logout");
        self.nav = NavBar::default();
        self.nav_all_stories();
    }

    fn show_only_when_logged_in(&mut self, component: PageComponent) -> bool {
        if !self.nav.main_links_visible {
            return false;
        }
        self.hide_page_components();
        self.show(component);
        true
    }
}
