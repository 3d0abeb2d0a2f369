//! The persisted keys and JSON shapes are read back by later runs, so their
//! layout is a contract.

use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use carwatch_core::domain::form::FormSnapshot;
use carwatch_core::domain::theme::Theme;
use carwatch_core::domain::thresholds::Thresholds;
use carwatch_core::reference::RegionFeeTable;
use carwatch_db::migrations::run_pending;
use carwatch_db::session_store::{FORM_KEY, SETTINGS_KEY, THEME_KEY};
use carwatch_db::{connect_with_settings, SessionStore, SqlStateRepository, StateRepository};

type StateContractResult<T = ()> = Result<T, String>;

macro_rules! require {
    ($cond:expr) => {
        if !$cond {
            return Err(format!("assertion failed: `{}`", stringify!($cond)));
        }
    };
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return Err(format!($($arg)*));
        }
    };
}

macro_rules! require_eq {
    ($left:expr, $right:expr) => {
        if $left != $right {
            return Err(format!(
                "assertion failed: `left == right` (`{:?}` != `{:?}`)",
                $left,
                $right
            ));
        }
    };
}

async fn file_backed_repository(dir: &TempDir) -> StateContractResult<Arc<SqlStateRepository>> {
    let url = format!("sqlite://{}", dir.path().join("carwatch.db").display());
    let pool = connect_with_settings(&url, 1, 5).await.map_err(|err| err.to_string())?;
    run_pending(&pool).await.map_err(|err| err.to_string())?;
    Ok(Arc::new(SqlStateRepository::new(pool)))
}

async fn stored_json(repo: &SqlStateRepository, key: &str) -> StateContractResult<Value> {
    let raw = repo
        .get(key)
        .await
        .map_err(|err| err.to_string())?
        .ok_or_else(|| format!("{key} should be stored"))?;
    serde_json::from_str(&raw).map_err(|err| format!("{key} should hold JSON: {err}"))
}

#[tokio::test]
async fn persisted_keys_use_documented_shapes() -> StateContractResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let repo = file_backed_repository(&dir).await?;
    let store = SessionStore::new(repo.clone());

    require!(store.save_theme(Theme::White).await, "theme should be saved");
    require!(store.save_thresholds(Thresholds::new(20, 1500)).await);
    let form = FormSnapshot {
        vehicle: "Fiat Panda".to_string(),
        region: "Lazio".to_string(),
        tariff: "140".to_string(),
        current_km: "24500".to_string(),
        expiry_tax: "2024-12-31".to_string(),
        ..FormSnapshot::default()
    };
    require!(store.save_form(&form).await);

    let theme = repo.get(THEME_KEY).await.map_err(|err| err.to_string())?;
    require_eq!(theme.as_deref(), Some("white"));

    let settings = stored_json(&repo, SETTINGS_KEY).await?;
    require_eq!(settings.get("thresholdDays").and_then(Value::as_i64), Some(20));
    require_eq!(settings.get("thresholdKm").and_then(Value::as_i64), Some(1500));

    let saved_form = stored_json(&repo, FORM_KEY).await?;
    for key in [
        "vehicle",
        "region",
        "tariff",
        "currentKm",
        "lastServiceDate",
        "lastServiceKm",
        "expiryTax",
        "expiryInspection",
        "expiryInsurance",
    ] {
        require!(
            saved_form.get(key).map(Value::is_string).unwrap_or(false),
            "form key {key} should be a string"
        );
    }
    require_eq!(saved_form.get("currentKm").and_then(Value::as_str), Some("24500"));

    Ok(())
}

#[tokio::test]
async fn state_survives_reopening_the_database() -> StateContractResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let regions = RegionFeeTable::build([("Lazio", Some(rust_decimal::Decimal::from(140)))]);

    {
        let store = SessionStore::new(file_backed_repository(&dir).await?);
        let mut session = store.restore(Thresholds::default(), &regions).await;
        session.form.region = "lazio".to_string();
        require!(store.save_form(&session.form).await);
        require!(store.save_theme(Theme::Blue).await);
    }

    let store = SessionStore::new(file_backed_repository(&dir).await?);
    let restored = store.restore(Thresholds::new(90, 9000), &regions).await;

    require_eq!(restored.theme, Some(Theme::Blue));
    require_eq!(restored.thresholds, Thresholds::default());
    require_eq!(restored.form.region.as_str(), "lazio");
    require_eq!(restored.form.tariff.as_str(), "140");
    Ok(())
}

#[tokio::test]
async fn legacy_form_keys_are_still_understood() -> StateContractResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let repo = file_backed_repository(&dir).await?;
    repo.put(
        FORM_KEY,
        r#"{"vehicle":"Fiat Panda","currentKm":24500,"expiryBollo":"2024-12-31",
            "expiryRevisione":"2025-03-01","expiryAssicurazione":null}"#,
    )
    .await
    .map_err(|err| err.to_string())?;

    let store = SessionStore::new(repo);
    let form = store.load_form().await.ok_or_else(|| "form should load".to_string())?;

    require_eq!(form.current_km.as_str(), "24500");
    require_eq!(form.expiry_tax.as_str(), "2024-12-31");
    require_eq!(form.expiry_inspection.as_str(), "2025-03-01");
    require_eq!(form.expiry_insurance.as_str(), "");
    Ok(())
}
