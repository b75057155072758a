mod app;
mod cli;
mod error;
mod logging;
mod settings;

use std::process::ExitCode;

use clap::Parser;

use nodeswitch_nvm::NvmService;
use nodeswitch_platform::{Platform, ShellRunner};

use crate::cli::Cli;
use crate::settings::AppSettings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let (settings, settings_error) = match AppSettings::load() {
        Ok(settings) => (settings, None),
        Err(error) => (AppSettings::default(), Some(error)),
    };

    logging::init_logging(
        cli.debug || settings.debug_logging,
        cli.debug,
        settings.max_log_size_bytes,
    );
    if let Some(error) = settings_error {
        log::warn!("{error}; using default settings");
    }

    let platform = Platform::current();
    let runner = ShellRunner::new(platform, settings.runner_options());
    log::debug!(
        "Using shell '{}' for {platform} commands, timeout {}s",
        runner.shell(),
        runner.timeout().as_secs()
    );
    let manager = NvmService::new(runner);

    let command = cli.selected_command();
    log::debug!("Running {command:?}");

    let mut stdout = std::io::stdout();
    match app::run(command, &manager, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // The report below is the user-facing copy; these only reach the
            // terminal with --debug.
            if error.is_precondition() {
                log::debug!("Command rejected: {error}");
            } else {
                log::info!("Command failed: {error}");
            }
            eprintln!("{}", error.report());
            ExitCode::FAILURE
        }
    }
}
