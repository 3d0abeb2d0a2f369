use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{RepositoryError, StateRepository};

#[derive(Default)]
pub struct InMemoryStateRepository {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait::async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::repositories::{InMemoryStateRepository, StateRepository};

    #[tokio::test]
    async fn in_memory_state_repo_round_trip() {
        let repo = InMemoryStateRepository::default();

        repo.put("carwatch.settings", r#"{"thresholdDays":15}"#).await.expect("put");
        let found = repo.get("carwatch.settings").await.expect("get");
        assert_eq!(found.as_deref(), Some(r#"{"thresholdDays":15}"#));

        repo.delete("carwatch.settings").await.expect("delete");
        assert_eq!(repo.get("carwatch.settings").await.expect("get"), None);
    }
}
