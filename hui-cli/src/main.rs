#![warn(clippy::uninlined_format_args)]

mod bootstrap;
mod cli;
mod commands;

use bootstrap::{AppConfig, init_logging};
use clap::Parser;
use cli::Args;
use commands::{App, CliResult};
use hui_application::{Clock, EventBus};
use hui_infrastructure::{JsonSnapshotStore, SystemClock, TimestampIdGenerator, sample_state};
use std::process;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse();
    init_logging();

    let config = AppConfig::from_env().with_data_file(args.data);
    tracing::debug!(data_file = %config.data_file.display(), "Resolved configuration");

    let clock = SystemClock;
    let ids = TimestampIdGenerator::default();
    let events = EventBus::new();
    let store = JsonSnapshotStore::new(config.data_file, sample_state(clock.today()));

    let output = App::new(&store, &clock, &ids, &events).execute(args.command)?;
    print!("{output}");
    Ok(())
}
