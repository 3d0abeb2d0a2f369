use tracing::info;

use carwatch_core::errors::ApplicationError;

use crate::commands::context::{load_config, resolve_today, runtime, Workspace};
use crate::commands::CommandResult;
use crate::view::render_session;

/// Updates the given thresholds and keeps the other one as saved. Blank,
/// zero or unparsable values reset to the default; small values are raised
/// to the minimum.
pub fn run(days: Option<&str>, km: Option<&str>, json: bool, today: Option<&str>) -> CommandResult {
    match execute(days, km, json, today) {
        Ok(output) => CommandResult::rendered(output),
        Err(error) => CommandResult::from_error("thresholds", &error),
    }
}

fn execute(
    days: Option<&str>,
    km: Option<&str>,
    json: bool,
    today: Option<&str>,
) -> Result<String, ApplicationError> {
    let today = resolve_today(today)?;
    let config = load_config()?;
    let runtime = runtime()?;

    runtime.block_on(async {
        let mut workspace = Workspace::open(config).await?;

        if days.is_some() || km.is_some() {
            let mut thresholds = workspace.session.thresholds;
            if let Some(days) = days {
                thresholds = thresholds.with_days_input(days);
            }
            if let Some(km) = km {
                thresholds = thresholds.with_km_input(km);
            }
            workspace.session.thresholds = thresholds;

            let saved = workspace.store.save_thresholds(thresholds).await;
            info!(
                event_name = "session.thresholds.updated",
                threshold_days = thresholds.days,
                threshold_km = thresholds.km,
                saved,
                "thresholds updated"
            );
        }

        let evaluation = workspace.evaluate(today);
        render_session("thresholds", &workspace, &evaluation, today, json)
    })
}
