pub mod error;
pub mod list;
pub mod model;
pub mod service;

pub use error::StoryServiceError;
pub use list::StoryList;
pub use model::{Story, StoryDraft};
pub use service::{StoryService, StoryServiceApi};
