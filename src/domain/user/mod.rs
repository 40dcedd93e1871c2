pub mod error;
pub mod model;
pub mod service;

pub use error::UserServiceError;
pub use model::User;
pub use service::{UserService, UserServiceApi};
