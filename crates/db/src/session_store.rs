//! Best-effort persistence of the running session.
//!
//! Nothing in here fails the caller: unreadable or malformed entries restore
//! as "nothing saved" and failed writes are logged and dropped.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::warn;

use carwatch_core::domain::form::FormSnapshot;
use carwatch_core::domain::theme::Theme;
use carwatch_core::domain::thresholds::Thresholds;
use carwatch_core::reference::RegionFeeTable;
use carwatch_core::session::Session;

use crate::repositories::{RepositoryError, StateRepository};

pub const THEME_KEY: &str = "carwatch.theme";
pub const SETTINGS_KEY: &str = "carwatch.settings";
pub const FORM_KEY: &str = "carwatch.form";

#[derive(Clone)]
pub struct SessionStore {
    repository: Arc<dyn StateRepository>,
}

impl SessionStore {
    pub fn new(repository: Arc<dyn StateRepository>) -> Self {
        Self { repository }
    }

    /// Rebuilds the session saved by a previous run. When no thresholds were
    /// ever saved, `initial` becomes the effective value and is written back.
    pub async fn restore(&self, initial: Thresholds, regions: &RegionFeeTable) -> Session {
        let theme = self.load_theme().await;

        let thresholds = match self.load_thresholds().await {
            Some(saved) => saved,
            None => {
                let effective = initial.sanitized();
                self.save_thresholds(effective).await;
                effective
            }
        };

        let mut form = self.load_form().await.unwrap_or_default();
        form.refresh_tariff(regions);

        Session { theme, thresholds, form }
    }

    pub async fn load_theme(&self) -> Option<Theme> {
        let raw = self.read(THEME_KEY).await?;
        let theme = Theme::parse(&raw);
        if theme.is_none() {
            warn!(
                event_name = "state.load.ignored",
                key = THEME_KEY,
                value = %raw,
                "stored theme is not recognised"
            );
        }
        theme
    }

    pub async fn load_thresholds(&self) -> Option<Thresholds> {
        self.read_json::<Thresholds>(SETTINGS_KEY).await.map(Thresholds::sanitized)
    }

    pub async fn load_form(&self) -> Option<FormSnapshot> {
        self.read_json(FORM_KEY).await
    }

    pub async fn save_theme(&self, theme: Theme) -> bool {
        self.write(THEME_KEY, theme.as_str()).await
    }

    pub async fn save_thresholds(&self, thresholds: Thresholds) -> bool {
        match serde_json::to_string(&thresholds) {
            Ok(raw) => self.write(SETTINGS_KEY, &raw).await,
            Err(error) => {
                log_write_failure(SETTINGS_KEY, &RepositoryError::Decode(error.to_string()));
                false
            }
        }
    }

    pub async fn save_form(&self, form: &FormSnapshot) -> bool {
        match serde_json::to_string(form) {
            Ok(raw) => self.write(FORM_KEY, &raw).await,
            Err(error) => {
                log_write_failure(FORM_KEY, &RepositoryError::Decode(error.to_string()));
                false
            }
        }
    }

    pub async fn clear_form(&self) -> bool {
        match self.repository.delete(FORM_KEY).await {
            Ok(()) => true,
            Err(error) => {
                log_write_failure(FORM_KEY, &error);
                false
            }
        }
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.repository.get(key).await {
            Ok(value) => value,
            Err(error) => {
                warn!(
                    event_name = "state.load.failed",
                    key,
                    error = %error,
                    "could not read saved state; continuing without it"
                );
                None
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(
                    event_name = "state.load.failed",
                    key,
                    error = %RepositoryError::Decode(error.to_string()),
                    "saved state is malformed; ignoring it"
                );
                None
            }
        }
    }

    async fn write(&self, key: &str, value: &str) -> bool {
        match self.repository.put(key, value).await {
            Ok(()) => true,
            Err(error) => {
                log_write_failure(key, &error);
                false
            }
        }
    }
}

fn log_write_failure(key: &str, error: &RepositoryError) {
    warn!(event_name = "state.save.failed", key, error = %error, "could not save state");
}
