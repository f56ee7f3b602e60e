use thiserror::Error;

/// Failure taxonomy of the query services.
///
/// Failures are deterministic functions of input and catalog state; the
/// services never log or retry, the protocol router owns the status mapping.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no such id")]
    NotFound,

    #[error("invalid arguments: {0}")]
    InvalidArgument(String),

    #[error("unsupported list type: {0}")]
    Unsupported(&'static str),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
