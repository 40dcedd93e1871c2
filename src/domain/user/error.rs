use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Dependency(AppError),
}

impl From<AppError> for UserServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Authentication(msg) => UserServiceError::InvalidCredentials(msg),
            AppError::Validation(msg) => UserServiceError::Invalid(msg),
            AppError::NotFound(msg) => UserServiceError::NotFound(msg),
            other => UserServiceError::Dependency(other),
        }
    }
}

impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::InvalidCredentials(msg) => AppError::Authentication(msg),
            UserServiceError::Invalid(msg) => AppError::Validation(msg),
            UserServiceError::NotFound(msg) => AppError::NotFound(msg),
            UserServiceError::Dependency(err) => err,
        }
    }
}
