use hack_or_snooze::controllers::{NavController, StoriesController, UserController};
use hack_or_snooze::domain::session::SessionContext;
use hack_or_snooze::infrastructure::api::HttpApiClient;
use hack_or_snooze::infrastructure::storage::FileCredentialStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::sync::Mutex;
use uuid::Uuid;


use fixtures::TestFixtures;
use stub_server::StubApi;

pub struct TestContext {
    pub stub: StubApi,
    pub base_url: String,
    pub session_file: PathBuf,
    pub fixtures: TestFixtures,
    pub session: Arc<SessionContext>,
    pub nav: Arc<Mutex<NavController>>,
    pub users: UserController,
    pub stories: StoriesController,
}

pub struct ClientParts {
    pub session: Arc<SessionContext>,
    pub nav: Arc<Mutex<NavController>>,
    pub users: UserController,
    pub stories: StoriesController,
}

impl TestContext {
    /// A fresh client against the same stub and session file, as after a restart
    pub fn restart(&self) -> ClientParts {
        build_client(&self.base_url, &self.session_file)
    }
}

fn build_client(base_url: &str, session_file: &Path) -> ClientParts {
    let api = Arc::new(
        HttpApiClient::new(base_url, Duration::from_secs(5)).expect("Failed to build api client"),
    );
    let credentials = Arc::new(FileCredentialStore::new(session_file));
    let session = Arc::new(SessionContext::from_api(api, credentials));
    let nav = Arc::new(Mutex::new(NavController::new()));

    ClientParts {
        users: UserController::new(session.clone(), nav.clone()),
        stories: StoriesController::new(session.clone(), nav.clone()),
        session,
        nav,
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let stub = StubApi::new();
            let base_url = stub.spawn().await;

            let session_file =
                std::env::temp_dir().join(format!("hack-or-snooze-e2e-{}.json", Uuid::new_v4()));

            let ClientParts {
                session,
                nav,
                users,
                stories,
            } = build_client(&base_url, &session_file);

            Self {
                fixtures: TestFixtures::new(stub.clone()),
                stub,
                base_url,
                session_file,
                session,
                nav,
                users,
                stories,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async move {
            let _ = tokio::fs::remove_file(&self.session_file).await;
        }
    }
}
