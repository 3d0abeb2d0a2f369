use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod state;

pub use memory::InMemoryStateRepository;
pub use state::SqlStateRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// String-keyed store for the small pieces of state kept between runs.
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    async fn put(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
    async fn delete(&self, key: &str) -> Result<(), RepositoryError>;
}
