use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hack_or_snooze::controllers::{NavController, StoriesController, UserController};
use hack_or_snooze::domain::session::{RestoreOutcome, SessionContext};
use hack_or_snooze::domain::story::StoryDraft;
use hack_or_snooze::infrastructure::api::HttpApiClient;
use hack_or_snooze::infrastructure::config::{Config, LogFormat};
use hack_or_snooze::infrastructure::storage::FileCredentialStore;

#[derive(Parser)]
#[command(name = "hack-or-snooze", about = "Terminal client for the Hack or Snooze news feed")]
struct Cli {
    /// API base url (overrides BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Where the login token is kept (overrides SESSION_FILE)
    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show all stories
    Stories,
    /// Log in and remember the session
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and remember the session
    Signup {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Forget the remembered session
    Logout,
    /// Show the logged-in user
    Profile,
    /// Submit a new story
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        url: String,
    },
    /// Show the logged-in user's favorites
    Favorites,
    /// Show the stories the logged-in user submitted
    Mine,
    /// Toggle a story's favorite star
    Star { story_id: String },
}

impl Command {
    /// Commands that establish or end a session and so can run without the stored one
    fn replaces_session(&self) -> bool {
        matches!(
            self,
            Command::Login { .. } | Command::Signup { .. } | Command::Logout
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(session_file) = cli.session_file {
        config.session_file = session_file;
    }

    // Initialize logging
    init_logging(&config);

    tracing::debug!(base_url = %config.base_url, "Using Hack or Snooze API");

    let api = Arc::new(HttpApiClient::new(&config.base_url, config.http_timeout())?);
    let credentials = Arc::new(FileCredentialStore::new(config.session_file.clone()));
    let session = Arc::new(SessionContext::from_api(api, credentials));
    let nav = Arc::new(Mutex::new(NavController::new()));

    let user_controller = UserController::new(session.clone(), nav.clone());
    let stories_controller = StoriesController::new(session.clone(), nav.clone());

    match user_controller.check_for_remembered_user().await {
        Ok(RestoreOutcome::Rejected) => {
            eprintln!("Stored session has expired; please log in again.");
        }
        Ok(_) => {}
        Err(e) if cli.command.replaces_session() => {
            tracing::warn!(error = %e, "Could not restore stored session");
        }
        Err(e) => return Err(e.into()),
    }

    match cli.command {
        Command::Stories => {
            println!("{}", stories_controller.get_and_show_stories_on_start().await?);
        }
        Command::Login { username, password } => {
            let user = user_controller
                .login(&username, &password)
                .await
                .context("login failed")?;
            println!("Logged in as {}", user.username);
        }
        Command::Signup {
            username,
            password,
            name,
        } => {
            let user = user_controller
                .signup(&username, &password, &name)
                .await
                .context("signup failed")?;
            println!("Welcome, {}! Logged in as {}", user.name, user.username);
        }
        Command::Logout => {
            user_controller.logout().await?;
            println!("Logged out");
        }
        Command::Profile => match user_controller.profile().await {
            Some(user) => {
                println!("Name: {}", user.name);
                println!("Username: {}", user.username);
                println!("Account created: {}", user.created_at.format("%Y-%m-%d"));
                println!("Favorites: {}", user.favorites.len());
                println!("Stories: {}", user.own_stories.len());
            }
            None => println!("Not logged in"),
        },
        Command::Submit { title, author, url } => {
            let draft = StoryDraft { title, author, url };
            println!("{}", stories_controller.add_new_story_to_page(&draft).await?);
        }
        Command::Favorites => {
            println!("{}", stories_controller.put_favorites_on_page().await?);
        }
        Command::Mine => {
            println!("{}", stories_controller.put_own_stories_on_page().await?);
        }
        Command::Star { story_id } => {
            println!("{}", stories_controller.toggle_story_favorite(&story_id).await?);
        }
    }

    let nav = nav.lock().await;
    tracing::debug!(visible = ?nav.visible_components(), nav_bar = ?nav.nav_bar(), "Page state");

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hack_or_snooze=warn".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
