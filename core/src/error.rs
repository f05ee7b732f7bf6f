use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoordinatorError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    /// The coordinator task has shut down and its channels are closed.
    #[error("coordinator is no longer running")]
    CoordinatorGone,
}
