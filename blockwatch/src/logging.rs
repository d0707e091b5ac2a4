//! Log setup. The TUI owns the terminal, so logs only go to the file named by
//! `BLOCKWATCH_LOG`; without it nothing is installed and events are dropped.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "BLOCKWATCH_LOG";

pub fn init_from_env() -> anyhow::Result<bool> {
    match std::env::var_os(LOG_ENV) {
        Some(path) if !path.is_empty() => {
            init_file(Path::new(&path))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

pub fn init_file(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("log init failed: {e}"))?;
    Ok(())
}
