//! Read a match history export, rebuild the model, print the run report as JSON.
//! Run with: cargo run --bin intake -- [path]
//! The path defaults to INTAKE_FILE (see `config`).

use match_history_intake::{run_with_state, ConfigError, IntakeConfig, IntakeState};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Serialize)]
struct Report<'a> {
    organizations: usize,
    events: usize,
    matches: usize,
    diagnostics: &'a match_history_intake::Diagnostics,
}

fn intake() -> Result<String, ConfigError> {
    let mut config = IntakeConfig::from_env()?;
    if let Some(path) = std::env::args().nth(1) {
        config.input = path.into();
    }
    log::info!("Reading {}", config.input.display());

    let input = std::fs::read_to_string(&config.input)
        .map_err(|e| ConfigError::Io(format!("{}: {}", config.input.display(), e)))?;
    let seeds = config.load_organizations()?;
    if !seeds.is_empty() {
        log::info!("Loaded {} seed organizations", seeds.len());
    }

    let out = run_with_state(IntakeState::with_organizations(seeds), &input, config.delimiter);
    let report = Report {
        organizations: out.state.organizations.len(),
        events: out.state.events.len(),
        matches: out.state.matches.len(),
        diagnostics: &out.diagnostics,
    };
    let json = if config.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    json.map_err(|e| ConfigError::Io(format!("report: {}", e)))
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    match intake() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
