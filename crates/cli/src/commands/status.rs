use carwatch_core::errors::ApplicationError;

use crate::commands::context::{load_config, resolve_today, runtime, Workspace};
use crate::commands::CommandResult;
use crate::view::render_session;

pub fn run(json: bool, today: Option<&str>) -> CommandResult {
    match execute(json, today) {
        Ok(output) => CommandResult::rendered(output),
        Err(error) => CommandResult::from_error("status", &error),
    }
}

fn execute(json: bool, today: Option<&str>) -> Result<String, ApplicationError> {
    let today = resolve_today(today)?;
    let config = load_config()?;
    let runtime = runtime()?;

    runtime.block_on(async {
        let workspace = Workspace::open(config).await?;
        let evaluation = workspace.evaluate(today);
        render_session("status", &workspace, &evaluation, today, json)
    })
}
