use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum StoryServiceError {
    #[error("not authorized: {0}")]
    Unauthorized(String),
    #[error("invalid story: {0}")]
    Invalid(String),
    #[error("story not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Dependency(AppError),
}

impl From<AppError> for StoryServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Authentication(msg) => StoryServiceError::Unauthorized(msg),
            AppError::Validation(msg) => StoryServiceError::Invalid(msg),
            AppError::NotFound(msg) => StoryServiceError::NotFound(msg),
            other => StoryServiceError::Dependency(other),
        }
    }
}

impl From<StoryServiceError> for AppError {
    fn from(err: StoryServiceError) -> Self {
        match err {
            StoryServiceError::Unauthorized(msg) => AppError::Authentication(msg),
            StoryServiceError::Invalid(msg) => AppError::Validation(msg),
            StoryServiceError::NotFound(msg) => AppError::NotFound(msg),
            StoryServiceError::Dependency(err) => err,
        }
    }
}
