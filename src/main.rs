use std::process::ExitCode;

use split_ledger::settings::Settings;

fn main() -> ExitCode {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("failed to load settings: {err}");
            return ExitCode::FAILURE;
        }
    };
    split_ledger::init_tracing(&settings.app.level);

    match split_ledger::app::run(std::env::args(), &settings) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
