pub mod connection;
pub mod migrations;
pub mod repositories;
pub mod session_store;

pub use connection::{connect_with_settings, DbPool};
pub use repositories::{
    InMemoryStateRepository, RepositoryError, SqlStateRepository, StateRepository,
};
pub use session_store::SessionStore;
