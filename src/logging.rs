// The terminal is in raw mode for the whole session, so logs go to
// <project_dir>/.beatgrid/beatgrid.log instead of stderr.
// Filter with RUST_LOG as usual, e.g. `RUST_LOG=beatgrid=debug`.
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Context;

const LOG_FILE: &str = "beatgrid.log";
const DEFAULT_LOG_FILTER: &str = "info";

pub fn setup(state_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(state_dir)
        .with_context(|| format!("could not create {}", state_dir.display()))?;
    let path = state_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("could not open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialised")?;
    Ok(())
}
