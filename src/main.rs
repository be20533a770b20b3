//! ClipTrail CLI entry point

use std::process::ExitCode;

use clap::Parser;

use cliptrail::cli::{
    app::{cli_config, load_merged_config, resolve_options, run_check, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    daemon_app::run_daemon,
    presenter::Presenter,
};
use cliptrail::infrastructure::XdgConfigStore;

// Single cooperative loop: polling, hotkey events and paste requests never overlap
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();
    let cli_layer = cli_config(&cli);

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Check) => {
            let config = load_merged_config(cli_layer).await;
            return run_check(&config).await;
        }
        None => {}
    }

    let config = load_merged_config(cli_layer).await;

    let options = match resolve_options(&config) {
        Ok(options) => options,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    run_daemon(options, config.log_level_or_default()).await
}
