//! Terminal and JSON rendering of an evaluated session.

use chrono::NaiveDate;
use serde::Serialize;

use carwatch_core::domain::form::FormSnapshot;
use carwatch_core::domain::theme::Theme;
use carwatch_core::domain::thresholds::Thresholds;
use carwatch_core::errors::ApplicationError;
use carwatch_core::reference::Dataset;
use carwatch_core::render::{GlobalIndicator, RenderOutcome};
use carwatch_core::session::Evaluation;
use carwatch_core::validation::{summarize, ValidationError};

use crate::commands::context::Workspace;
use crate::commands::to_json;

#[derive(Debug, Serialize)]
struct SessionPayload<'a> {
    command: &'a str,
    status: &'static str,
    today: NaiveDate,
    theme: Option<Theme>,
    thresholds: Thresholds,
    state_saved: bool,
    reference_fallbacks: Vec<Dataset>,
    form: &'a FormSnapshot,
    messages: Vec<String>,
    evaluation: &'a Evaluation,
}

pub fn render_session(
    command: &str,
    workspace: &Workspace,
    evaluation: &Evaluation,
    today: NaiveDate,
    json: bool,
) -> Result<String, ApplicationError> {
    if json {
        let payload = SessionPayload {
            command,
            status: "ok",
            today,
            theme: workspace.session.theme,
            thresholds: workspace.session.thresholds,
            state_saved: workspace.store_available,
            reference_fallbacks: workspace
                .reference
                .fallbacks
                .iter()
                .map(|fallback| fallback.dataset)
                .collect(),
            form: &workspace.session.form,
            messages: messages(evaluation),
            evaluation,
        };
        return to_json(&payload);
    }

    Ok(render_human(workspace, evaluation, today))
}

fn messages(evaluation: &Evaluation) -> Vec<String> {
    evaluation
        .vehicle_errors
        .iter()
        .chain(&evaluation.maintenance_errors)
        .map(|error| error.message())
        .collect()
}

fn render_human(workspace: &Workspace, evaluation: &Evaluation, today: NaiveDate) -> String {
    let display = workspace.aggregator.display();
    let session = &workspace.session;
    let mut lines = Vec::new();

    let theme = session.theme.map(|theme| theme.as_str()).unwrap_or("default");
    lines.push(format!("carwatch - {} - theme {theme}", display.date(today)));
    lines.push(format!("Vehicle     {}", or_dash(&session.form.vehicle)));
    let region = match evaluation.fee {
        Some(fee) => format!("{} (fee {fee})", session.form.region.trim()),
        None => or_dash(&session.form.region).to_string(),
    };
    lines.push(format!("Region      {region}"));
    lines.push(format!(
        "Thresholds  {} days / {} km",
        session.thresholds.days,
        display.distance(session.thresholds.km)
    ));
    lines.push(String::new());

    match &evaluation.outcome {
        RenderOutcome::Placeholder { message, global } => {
            lines.push(message.clone());
            push_errors(&mut lines, "Vehicle", &evaluation.vehicle_errors);
            push_errors(&mut lines, "Maintenance", &evaluation.maintenance_errors);
            lines.push(String::new());
            lines.push(global_line(global));
        }
        RenderOutcome::Table { items, global } => {
            let label_width = column_width(items.iter().map(|item| item.kind.label()));
            let detail_width = column_width(items.iter().map(|item| item.detail.as_str()));
            let remaining_width = column_width(items.iter().map(|item| item.remaining.as_str()));

            for item in items {
                lines.push(format!(
                    "{:<label_width$}  {:<detail_width$}  {:<remaining_width$}  [{}] {}",
                    item.kind.label(),
                    item.detail,
                    item.remaining,
                    item.status.tag(),
                    item.status.label(),
                ));
            }
            lines.push(String::new());
            lines.push(global_line(global));
        }
    }

    if workspace.reference.used_fallback() || !workspace.store_available {
        lines.push(String::new());
    }
    for fallback in &workspace.reference.fallbacks {
        lines.push(format!(
            "note: {} list unavailable ({}); using the built-in list",
            fallback.dataset, fallback.reason
        ));
    }
    if !workspace.store_available {
        lines.push(format!(
            "note: saved state at `{}` is unavailable; changes are not kept",
            workspace.config.storage.url
        ));
    }

    lines.join("\n")
}

fn push_errors(lines: &mut Vec<String>, section: &str, errors: &[ValidationError]) {
    if errors.is_empty() {
        return;
    }
    lines.push(format!("{section}: {}", summarize(errors)));
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|cell| cell.chars().count()).max().unwrap_or(0)
}

fn global_line(global: &GlobalIndicator) -> String {
    format!("Overall  [{}] {}  {}", global.tag, global.label, global.text)
}

fn or_dash(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "-"
    } else {
        trimmed
    }
}
