//! FILENAME: app/src/main.rs
// PURPOSE: Headless entry point. Loads the dashboard against the mock data
// source and prints every widget's props as JSON.
//
// Usage: admin-console [config.json] [admin|editor|viewer]

use std::path::PathBuf;
use std::process::ExitCode;

use console_lib::{
    create_console_state, init_log_file, init_logger, log_error, log_info, ConsoleConfig,
    ConsoleError, LoadPhase, MockDataSource,
};
use grid_engine::Role;

fn run() -> Result<(), ConsoleError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ConsoleConfig::load(&PathBuf::from(path))?,
        None => ConsoleConfig::default(),
    };
    let role = match args.next() {
        Some(role) => role.parse::<Role>().map_err(ConsoleError::InvalidArgument)?,
        None => Role::Viewer,
    };

    console_lib::logging::set_echo(false);
    if let Some(path) = &config.log_file {
        init_log_file(path)?;
    }
    init_logger(log::LevelFilter::Info)?;
    log::info!("admin-console starting role={}", role);

    let mut state = create_console_state(config, role)?;

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let phase = runtime.block_on(state.dashboard.load(&MockDataSource::new())).clone();
    if let LoadPhase::Error(message) = phase {
        log_error!("SYS", "dashboard unavailable: {}", message);
        eprintln!("Dashboard failed to load: {}", message);
        return Ok(());
    }

    let props: serde_json::Map<String, serde_json::Value> =
        state.dashboard.all_props().into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&props)?);

    let view = state.accounts.view();
    log_info!(
        "SYS",
        "accounts page {}/{} rows={}",
        view.current_page,
        view.total_pages,
        view.total_filtered
    );
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("admin-console: {}", e);
            ExitCode::FAILURE
        }
    }
}
