pub mod commands;
pub mod sources;
pub mod view;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use carwatch_core::config::{AppConfig, LoadOptions, LogFormat};
use commands::set::SetArgs;

#[derive(Debug, Parser)]
#[command(
    name = "carwatch",
    about = "Track service, road tax, inspection and insurance deadlines for a vehicle",
    long_about = "Keep one vehicle's maintenance form, evaluate its deadlines against warning \
                  thresholds, and inspect reference data and configuration.",
    after_help = "Examples:\n  carwatch set --vehicle \"Fiat Panda\" --region Lazio --current-km 24500\n  carwatch status --json\n  carwatch thresholds --days 15"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Evaluate the saved form and print the deadline table")]
    Status {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
        #[arg(long, value_name = "YYYY-MM-DD", help = "Evaluate as of this date")]
        today: Option<String>,
    },
    #[command(about = "Update form fields, save them, and print the new evaluation")]
    Set(SetArgs),
    #[command(about = "Show or update the warning thresholds")]
    Thresholds {
        #[arg(long, help = "Days before an expiry that count as due soon")]
        days: Option<String>,
        #[arg(long, help = "Distance before the next service that counts as due soon")]
        km: Option<String>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
        #[arg(long, value_name = "YYYY-MM-DD", help = "Evaluate as of this date")]
        today: Option<String>,
    },
    #[command(about = "Show or apply the color theme (pink, green, blue, white)")]
    Theme { name: Option<String> },
    #[command(about = "List reference data")]
    Reference {
        #[command(subcommand)]
        dataset: ReferenceCommand,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, state store, and reference data readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Clear the saved form, keeping theme and thresholds")]
    Reset,
}

#[derive(Debug, Subcommand)]
enum ReferenceCommand {
    #[command(about = "List known vehicles, optionally filtered")]
    Vehicles {
        #[arg(long, help = "Case- and accent-insensitive substring filter")]
        filter: Option<String>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List regions with their road tax fee")]
    Regions {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Commands report configuration errors themselves.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Status { json, today } => commands::status::run(json, today.as_deref()),
        Command::Set(args) => commands::set::run(args),
        Command::Thresholds { days, km, json, today } => {
            commands::thresholds::run(days.as_deref(), km.as_deref(), json, today.as_deref())
        }
        Command::Theme { name } => commands::theme::run(name.as_deref()),
        Command::Reference { dataset } => match dataset {
            ReferenceCommand::Vehicles { filter, json } => {
                commands::reference::vehicles(filter.as_deref(), json)
            }
            ReferenceCommand::Regions { json } => commands::reference::regions(json),
        },
        Command::Config => commands::CommandResult::rendered(commands::config::run()),
        Command::Doctor { json } => commands::CommandResult::rendered(commands::doctor::run(json)),
        Command::Reset => commands::reset::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
