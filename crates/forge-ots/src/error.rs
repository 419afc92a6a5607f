use thiserror::Error;

#[derive(Debug, Error)]
pub enum OtsError {
    #[error("expected a 64-character hex hash, got {0} characters")]
    InvalidHash(usize),

    #[error("failed to construct HTTP client: {0}")]
    ClientBuild(String),
}
