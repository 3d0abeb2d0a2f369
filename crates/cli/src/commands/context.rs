use std::sync::Arc;

use chrono::NaiveDate;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use carwatch_core::config::{AppConfig, LoadOptions};
use carwatch_core::deadlines::DeadlineAggregator;
use carwatch_core::errors::ApplicationError;
use carwatch_core::reference::{load_reference_data, ReferenceData};
use carwatch_core::session::{Evaluation, Session};
use carwatch_core::temporal::{local_today, parse_calendar_date};
use carwatch_db::{
    connect_with_settings, migrations, InMemoryStateRepository, SessionStore, SqlStateRepository,
    StateRepository,
};

use crate::sources::ConfiguredReferenceSource;

pub fn load_config() -> Result<AppConfig, ApplicationError> {
    AppConfig::load(LoadOptions::default())
        .map_err(|error| ApplicationError::Configuration(error.to_string()))
}

pub fn runtime() -> Result<Runtime, ApplicationError> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        ApplicationError::Runtime(format!("failed to initialize async runtime: {error}"))
    })
}

/// `--today` override, or the local calendar date.
pub fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, ApplicationError> {
    match raw {
        None => Ok(local_today()),
        Some(raw) => parse_calendar_date(raw).ok_or_else(|| {
            ApplicationError::InvalidInput(format!(
                "`--today` must be a YYYY-MM-DD date, got `{raw}`"
            ))
        }),
    }
}

/// Everything a session command needs: configuration, reference data and the
/// session restored from the state store.
pub struct Workspace {
    pub config: AppConfig,
    pub reference: ReferenceData,
    pub store: SessionStore,
    pub session: Session,
    pub aggregator: DeadlineAggregator,
    pub store_available: bool,
}

impl Workspace {
    /// Opens the workspace. An unreachable state store degrades to an
    /// in-memory one so the session still evaluates; nothing is persisted.
    pub async fn open(config: AppConfig) -> Result<Self, ApplicationError> {
        let (repository, store_available): (Arc<dyn StateRepository>, bool) =
            match connect_state_repository(&config).await {
                Ok(repository) => (Arc::new(repository), true),
                Err(error) => {
                    warn!(
                        event_name = "state.store.unavailable",
                        url = %config.storage.url,
                        error = %error,
                        "saved state is unavailable; changes will not be kept"
                    );
                    (Arc::new(InMemoryStateRepository::default()), false)
                }
            };

        let source = ConfiguredReferenceSource::from_config(&config.reference).map_err(|error| {
            ApplicationError::Runtime(format!("failed to build reference client: {error}"))
        })?;
        let reference = load_reference_data(&source).await;

        let store = SessionStore::new(repository);
        let session = store.restore(config.initial_thresholds(), &reference.regions).await;
        let aggregator =
            DeadlineAggregator::new(config.service_interval(), config.display_format());

        debug!(
            event_name = "session.restored",
            theme = ?session.theme,
            threshold_days = session.thresholds.days,
            threshold_km = session.thresholds.km,
            form_blank = session.form.is_blank(),
            "session restored"
        );

        Ok(Self { config, reference, store, session, aggregator, store_available })
    }

    pub fn evaluate(&self, today: NaiveDate) -> Evaluation {
        self.session.evaluate(&self.reference.regions, &self.aggregator, today)
    }
}

/// Connects to the configured store and applies pending migrations.
pub async fn connect_state_repository(
    config: &AppConfig,
) -> Result<SqlStateRepository, ApplicationError> {
    let pool = connect_with_settings(
        &config.storage.url,
        config.storage.max_connections,
        config.storage.timeout_secs,
    )
    .await
    .map_err(|error| {
        ApplicationError::Persistence(format!("failed to open state store: {error}"))
    })?;

    migrations::run_pending(&pool).await.map_err(|error| {
        ApplicationError::Persistence(format!("failed to migrate state store: {error}"))
    })?;

    Ok(SqlStateRepository::new(pool))
}
