//! Entry point for the sysdash TUI. Parses args, sets up logging and runs the App.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sysdash::app::App;
use sysdash::client::HttpClient;
use sysdash::config::{Settings, DEFAULT_INTERVAL_MS, DEFAULT_TIMEOUT_MS, DEFAULT_URL};
use sysdash::logging;
use sysdash::prefs::{config_dir, Prefs, Theme};
use sysdash::refresh::Dashboard;
use sysdash::ui::screen::Screen;

/// sysdash - terminal dashboard for a system monitoring backend
#[derive(Parser, Debug)]
#[command(name = "sysdash", version, about = "Live terminal dashboard for a system monitoring HTTP backend")]
struct Cli {
    /// Backend base URL (e.g. http://127.0.0.1:5000)
    #[arg(value_name = "URL")]
    target: Option<String>,

    /// Backend base URL; the positional form wins if both are given
    #[arg(long, env = "SYSDASH_URL")]
    url: Option<String>,

    /// Refresh interval in milliseconds
    #[arg(long, short = 'i', default_value_t = DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Color theme for this run (overrides the saved preference)
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Log file (default: <config dir>/sysdash/sysdash.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the resolved settings and exit
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn resolve(self) -> Settings {
        let prefs = Prefs::default_location();
        let theme = self.theme.unwrap_or_else(|| prefs.load_theme());
        Settings {
            base_url: self
                .target
                .or(self.url)
                .unwrap_or_else(|| DEFAULT_URL.to_string()),
            interval: Duration::from_millis(self.interval_ms),
            request_timeout: Duration::from_millis(self.timeout_ms),
            theme,
            prefs_path: prefs.path().to_path_buf(),
            log_file: self
                .log_file
                .unwrap_or_else(|| config_dir().join("sysdash.log")),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dry_run = cli.dry_run;
    let settings = cli.resolve();

    let client = HttpClient::new(&settings.base_url, settings.request_timeout)
        .with_context(|| format!("invalid backend url {}", settings.base_url))?;

    if dry_run {
        println!("url: {}", client.base_url());
        println!("interval_ms: {}", settings.interval.as_millis());
        println!("timeout_ms: {}", settings.request_timeout.as_millis());
        println!("theme: {}", settings.theme.as_str());
        println!("prefs: {}", settings.prefs_path.display());
        println!("log_file: {}", settings.log_file.display());
        return Ok(());
    }

    logging::init(Some(&settings.log_file))?;
    info!(url = %client.base_url(), interval_ms = settings.interval.as_millis() as u64, "starting sysdash");

    let dash = Dashboard::new(
        Rc::new(client),
        Screen::new(),
        Prefs::at(settings.prefs_path.clone()),
        settings.theme,
        settings.interval,
    );
    App::new(dash).run().await
}
