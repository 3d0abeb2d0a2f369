use tracing::info;

use carwatch_core::domain::theme::Theme;
use carwatch_core::errors::ApplicationError;

use crate::commands::context::{load_config, runtime, Workspace};
use crate::commands::CommandResult;

pub fn run(name: Option<&str>) -> CommandResult {
    match execute(name) {
        Ok(message) => CommandResult::success("theme", message),
        Err(error) => CommandResult::from_error("theme", &error),
    }
}

fn execute(name: Option<&str>) -> Result<String, ApplicationError> {
    let requested = match name {
        Some(raw) => Some(Theme::parse(raw).ok_or_else(|| {
            ApplicationError::InvalidInput(format!(
                "unknown theme `{}` (expected one of: {})",
                raw.trim(),
                available()
            ))
        })?),
        None => None,
    };

    let config = load_config()?;
    let runtime = runtime()?;

    runtime.block_on(async {
        let workspace = Workspace::open(config).await?;

        let Some(theme) = requested else {
            let current = workspace.session.theme.map(|theme| theme.as_str()).unwrap_or("default");
            return Ok(format!("current theme: {current} (available: {})", available()));
        };

        let saved = workspace.store.save_theme(theme).await;
        info!(event_name = "session.theme.applied", theme = theme.as_str(), saved, "theme applied");
        let message = if saved {
            format!("theme set to {theme}")
        } else {
            format!("theme set to {theme} for this run only; it could not be saved")
        };
        Ok::<_, ApplicationError>(message)
    })
}

fn available() -> String {
    Theme::ALL.iter().map(Theme::as_str).collect::<Vec<_>>().join(", ")
}
