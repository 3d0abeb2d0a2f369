use std::process::ExitCode;

fn main() -> ExitCode {
    carwatch_cli::run()
}
