use std::sync::Arc;
use tokio::sync::Mutex;

use super::nav::NavController;
use crate::domain::session::{RestoreOutcome, SessionContext};
use crate::domain::user::User;
use crate::error::AppResult;

/// Login, signup and logout flows, keeping the nav bar in step with the session
pub struct UserController {
    session: Arc<SessionContext>,
    nav: Arc<Mutex<NavController>>,
}

impl UserController {
    pub fn new(session: Arc<SessionContext>, nav: Arc<Mutex<NavController>>) -> Self {
        Self { session, nav }
    }

    /// Silent login from stored credentials on start-up
    pub async fn check_for_remembered_user(&self) -> AppResult<RestoreOutcome> {
        let outcome = self.session.start().await?;

        let mut nav = self.nav.lock().await;
        match &outcome {
            RestoreOutcome::Restored(user) => nav.update_nav_on_login(user),
            RestoreOutcome::NoStoredSession | RestoreOutcome::Rejected => nav.nav_all_stories(),
        }

        Ok(outcome)
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.session.login(username, password).await?;
        self.nav.lock().await.update_nav_on_login(&user);
        Ok(user)
    }

    pub async fn signup(&self, username: &str, password: &str, name: &str) -> AppResult<User> {
        let user = self.session.signup(username, password, name).await?;
        self.nav.lock().await.update_nav_on_login(&user);
        Ok(user)
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.session.logout().await?;
        self.nav.lock().await.update_nav_on_logout();
        Ok(())
    }

    /// Current user for the profile section
    pub async fn profile(&self) -> Option<User> {
        let user = self.session.current_user().await?;
        self.nav.lock().await.nav_profile_click();
        Some(user)
    }
}
