use clap::Args;
use tracing::info;

use carwatch_core::domain::form::FormPatch;
use carwatch_core::errors::ApplicationError;

use crate::commands::context::{load_config, resolve_today, runtime, Workspace};
use crate::commands::CommandResult;
use crate::view::render_session;

/// Form fields to overwrite. Values are kept as typed and validated on
/// evaluation, so partially filled forms can be saved.
#[derive(Debug, Clone, Default, Args)]
pub struct SetArgs {
    #[arg(long, help = "Vehicle name (free text; see `carwatch reference vehicles`)")]
    pub vehicle: Option<String>,
    #[arg(long, help = "Region name; the road tax fee is derived from it")]
    pub region: Option<String>,
    #[arg(long = "current-km", help = "Current odometer reading in km")]
    pub current_km: Option<String>,
    #[arg(long = "last-service-date", value_name = "YYYY-MM-DD")]
    pub last_service_date: Option<String>,
    #[arg(long = "last-service-km", help = "Odometer reading at the last service")]
    pub last_service_km: Option<String>,
    #[arg(long = "tax", value_name = "YYYY-MM-DD", help = "Road tax expiry date")]
    pub expiry_tax: Option<String>,
    #[arg(long = "inspection", value_name = "YYYY-MM-DD", help = "Inspection expiry date")]
    pub expiry_inspection: Option<String>,
    #[arg(long = "insurance", value_name = "YYYY-MM-DD", help = "Insurance expiry date")]
    pub expiry_insurance: Option<String>,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
    #[arg(long, value_name = "YYYY-MM-DD", help = "Evaluate as of this date")]
    pub today: Option<String>,
}

impl SetArgs {
    fn patch(&self) -> FormPatch {
        FormPatch {
            vehicle: self.vehicle.clone(),
            region: self.region.clone(),
            current_km: self.current_km.clone(),
            last_service_date: self.last_service_date.clone(),
            last_service_km: self.last_service_km.clone(),
            expiry_tax: self.expiry_tax.clone(),
            expiry_inspection: self.expiry_inspection.clone(),
            expiry_insurance: self.expiry_insurance.clone(),
        }
    }
}

pub fn run(args: SetArgs) -> CommandResult {
    match execute(args) {
        Ok(output) => CommandResult::rendered(output),
        Err(error) => CommandResult::from_error("set", &error),
    }
}

fn execute(args: SetArgs) -> Result<String, ApplicationError> {
    let patch = args.patch();
    if patch.is_empty() {
        return Err(ApplicationError::InvalidInput(
            "nothing to set: pass at least one field, e.g. `--current-km 24500`".to_string(),
        ));
    }
    let today = resolve_today(args.today.as_deref())?;
    let config = load_config()?;
    let runtime = runtime()?;

    runtime.block_on(async {
        let mut workspace = Workspace::open(config).await?;
        workspace.session.edit(patch, &workspace.reference.regions);
        let saved = workspace.store.save_form(&workspace.session.form).await;
        info!(event_name = "session.form.edited", saved, "form updated");

        let evaluation = workspace.evaluate(today);
        render_session("set", &workspace, &evaluation, today, args.json)
    })
}
