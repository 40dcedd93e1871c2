pub mod nav;
pub mod render;
pub mod stories;
pub mod user;

pub use nav::{NavBar, NavController, PageComponent};
pub use stories::StoriesController;
pub use user::UserController;
