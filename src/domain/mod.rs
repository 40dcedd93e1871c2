pub mod session;
pub mod story;
pub mod user;
