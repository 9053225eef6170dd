//! Defaults and the resolved runtime settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::prefs::Theme;

pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Cadences offered by `+` / `-`.
pub const INTERVAL_PRESETS_MS: [u64; 4] = [1000, 2000, 5000, 10_000];

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub interval: Duration,
    pub request_timeout: Duration,
    pub theme: Theme,
    pub prefs_path: PathBuf,
    pub log_file: PathBuf,
}

/// Next preset above (`up`) or below the current cadence; stays put at the ends.
pub fn step_preset(current: Duration, up: bool) -> Duration {
    let ms = current.as_millis() as u64;
    let next = if up {
        INTERVAL_PRESETS_MS.iter().copied().find(|&p| p > ms)
    } else {
        INTERVAL_PRESETS_MS.iter().rev().copied().find(|&p| p < ms)
    };
    Duration::from_millis(next.unwrap_or(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_step_and_saturate() {
        let d = |ms| Duration::from_millis(ms);
        assert_eq!(step_preset(d(2000), true), d(5000));
        assert_eq!(step_preset(d(2000), false), d(1000));
        assert_eq!(step_preset(d(10_000), true), d(10_000));
        assert_eq!(step_preset(d(1000), false), d(1000));
        // off-preset values snap to the neighbour
        assert_eq!(step_preset(d(3000), true), d(5000));
        assert_eq!(step_preset(d(3000), false), d(2000));
    }
}
