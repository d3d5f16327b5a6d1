use std::env;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use log::info;
use crate::config::load_config;
use crate::logging::setup_logger;
use crate::manager_sems::SemsClient;

mod config;
mod energy;
mod errors;
mod logging;
mod manager_sems;
mod models;
mod worker;

/// What to do once configured
#[derive(Debug, PartialEq)]
enum Command {
    Poll,
    Current,
    Day(NaiveDate),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("goodwe-poller: {:?}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (config_path, command) = parse_args(&args)?;

    let config = load_config(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path))?;
    let _log_handle = setup_logger(&config.general).context("failed to set up logging")?;

    info!("goodwe-poller version: {}", env!("CARGO_PKG_VERSION"));

    let mut sems = SemsClient::new(&config.sems);

    match command {
        Command::Poll => worker::run(&config.poll, &mut sems),
        Command::Current => {
            let readings = sems.get_current_readings()?;
            println!("{}", serde_json::to_string_pretty(&readings)?);
        },
        Command::Day(date) => {
            let readings = sems.get_day_readings(date);
            for entry in &readings.entries {
                println!("{} {:>8.1} W {:>8.3} kWh", entry.date_time.format("%Y-%m-%d %H:%M"), entry.pgrid_w, entry.eday_kwh);
            }
        },
    }

    Ok(())
}

/// Returns the config path and command given on the command line.
/// The config path is given as --config=<path>, or else through CONFIG_PATH.
///
/// # Arguments
///
/// * 'args' - command line arguments, program name excluded
fn parse_args(args: &[String]) -> Result<(String, Command)> {
    let mut config_path: Option<String> = None;
    let mut words: Vec<&str> = Vec::new();

    for arg in args {
        match arg.strip_prefix("--config=") {
            Some(path) => config_path = Some(path.to_string()),
            None => words.push(arg.as_str()),
        }
    }

    let config_path = match config_path {
        Some(path) => path,
        None => env::var("CONFIG_PATH").context("no --config=<path> given and CONFIG_PATH not set")?,
    };

    let command = match words.as_slice() {
        [] | ["poll"] => Command::Poll,
        ["current"] => Command::Current,
        ["day", date] => Command::Day(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").with_context(|| format!("bad date: {}", date))?
        ),
        _ => bail!("usage: goodwe-poller [--config=<path>] [poll | current | day <YYYY-MM-DD>]"),
    };

    Ok((config_path, command))
}
