//! FieldCam: record a clip, compress it and save it where the platform allows.

mod app;
mod app_command;
mod cli;
mod config;
mod devices;
mod error;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::{App, RunOutcome},
    app_command::AppCommand,
    cli::Cli,
    error::{AppError, Result as AppResult},
};

use crate::config::Config;

use std::time::Duration;

use clap::Parser;
use fieldcam_core::SessionState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "fieldcam=debug,fieldcam_core=debug";

/// Application entry point.
fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {:?}", e);
        std::process::exit(2);
    }

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let code = match rt.block_on(run(cli, config)) {
        Ok(outcome) => report(&outcome),
        Err(e) => {
            error!(error = ?e, "App error");
            1
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli, config: Config) -> AppResult<RunOutcome> {
    let quality = cli.quality.unwrap_or(config.capture.default_quality);
    let duration = Duration::from_secs(
        cli.duration_secs
            .unwrap_or(config.capture.default_duration_secs),
    );

    let (app, command_tx) = App::new(&config, cli.source);
    let stats = app.stats();

    tokio::spawn(app::drive_recording(command_tx, quality, duration));

    let outcome = app.run().await?;

    let snapshot = stats.snapshot();
    info!(
        started = snapshot.started,
        captured = snapshot.captured,
        saved = snapshot.saved,
        failed = snapshot.failed,
        "Recording statistics"
    );

    Ok(outcome)
}

fn report(outcome: &RunOutcome) -> i32 {
    let session = &outcome.session;
    if let Some(reason) = &outcome.refusal {
        error!(session_id = ?session.id, "Recording refused: {}", reason);
        return 1;
    }

    match session.state {
        SessionState::Saved => {
            info!(
                session_id = ?session.id,
                location_stamp = ?session.location_stamp,
                "{}",
                session.confirmation.as_deref().unwrap_or("Video saved")
            );
            0
        }
        SessionState::Failed => {
            let message = session
                .error
                .as_ref()
                .map(|info| info.user_message())
                .unwrap_or_else(|| "Recording failed".to_string());
            error!(session_id = ?session.id, "{}", message);
            1
        }
        state => {
            error!(session_id = ?session.id, ?state, "Stopped before the clip was saved");
            1
        }
    }
}
