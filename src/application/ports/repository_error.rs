#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("store connection failed: {0}")]
    ConnectionFailed(String),
    #[error("store query failed: {0}")]
    QueryFailed(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}
