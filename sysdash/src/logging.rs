//! tracing setup. The terminal belongs to the TUI, so events go to a file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

pub const LOG_ENV: &str = "SYSDASH_LOG";

/// Filter from `SYSDASH_LOG` (default `info`); `None` discards everything.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating log dir {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow!(e))
}
