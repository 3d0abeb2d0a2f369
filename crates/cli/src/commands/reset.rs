use std::sync::Arc;

use tracing::info;

use carwatch_core::errors::ApplicationError;
use carwatch_db::SessionStore;

use crate::commands::context::{connect_state_repository, load_config, runtime};
use crate::commands::CommandResult;

/// Clears the saved form. Theme and thresholds are kept.
pub fn run() -> CommandResult {
    match execute() {
        Ok(()) => CommandResult::success("reset", "saved form cleared"),
        Err(error) => CommandResult::from_error("reset", &error),
    }
}

fn execute() -> Result<(), ApplicationError> {
    let config = load_config()?;
    let runtime = runtime()?;

    runtime.block_on(async {
        let repository = connect_state_repository(&config).await?;
        let store = SessionStore::new(Arc::new(repository));
        if !store.clear_form().await {
            return Err(ApplicationError::Persistence("failed to clear the saved form".to_string()));
        }
        info!(event_name = "session.form.cleared", "saved form cleared");
        Ok(())
    })
}
