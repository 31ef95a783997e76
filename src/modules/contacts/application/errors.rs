use crate::modules::contacts::core::ports::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
