//! User actions. View mutations re-render from the stored process list and never
//! fetch; actions that need the backend go through the client and report back via
//! the banner.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::banner::Severity;
use crate::client::MetricsSource;
use crate::config::step_preset;
use crate::error::ClientError;
use crate::prefs::Theme;
use crate::refresh::Dashboard;
use crate::render::Render;
use crate::types::Thresholds;
use crate::view::SortKey;

/// A blocking yes/no decision for destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub fn kill_prompt(pid: u32, name: &str) -> String {
    format!(
        "Are you sure you want to terminate process \"{name}\" (PID: {pid})?\n\n\
         This action cannot be undone and may cause data loss or system instability."
    )
}

impl<C, R> Dashboard<C, R>
where
    C: MetricsSource + 'static,
    R: Render,
{
    pub fn set_sort_key(&mut self, key: SortKey) {
        debug!(sort = key.label(), "sort key changed");
        self.view.set_sort_key(key);
        self.render_table();
    }

    pub fn cycle_sort_key(&mut self) {
        let next = self.view.sort_key().next();
        self.set_sort_key(next);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.set_search_term(term);
        debug!(term = self.view.search_term(), "search term changed");
        self.render_table();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.prefs.save_theme(self.theme) {
            warn!(error = %e, path = %self.prefs.path().display(), "could not save theme preference");
        }
        self.render.theme(self.theme);
        self.theme
    }

    pub fn manual_refresh(&mut self) {
        info!("manual refresh triggered");
        self.trigger_once();
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.reconfigure(interval);
    }

    /// Move to the next longer or shorter preset cadence.
    pub fn step_interval(&mut self, longer: bool) {
        let next = step_preset(self.interval(), longer);
        if next != self.interval() {
            self.reconfigure(next);
        }
    }

    pub fn update_thresholds(&mut self, thresholds: Thresholds) {
        info!(
            cpu = thresholds.cpu,
            memory = thresholds.memory,
            disk = thresholds.disk,
            "updating alert thresholds"
        );
        self.send_thresholds(thresholds);
    }

    /// Ask, then request termination. Returns whether a request was sent.
    pub fn kill_process(&mut self, pid: u32, name: &str, confirm: &mut impl Confirm) -> bool {
        if !confirm.confirm(&kill_prompt(pid, name)) {
            debug!(pid, "kill declined");
            return false;
        }
        info!(pid, name, "requesting process termination");
        self.send_kill(pid);
        true
    }

    /// Surface a problem with local input (e.g. an unparsable threshold).
    pub fn report_error(&mut self, text: impl Into<String>) {
        self.notify(Severity::Error, text.into());
    }

    pub(crate) fn apply_kill(&mut self, res: Result<String, ClientError>) {
        match res {
            Ok(message) => {
                self.notify(Severity::Success, format!("✓ {message}"));
                // The backend is authoritative; the row may still be there.
                self.fetch_processes();
            }
            Err(ClientError::Rejected { message, .. }) => {
                warn!(error = %message, "kill-process rejected");
                self.notify(
                    Severity::Error,
                    format!("✗ Failed to kill process: {message}"),
                );
            }
            Err(e) => {
                warn!(error = %e, "kill-process request failed");
                self.notify(Severity::Error, "✗ Error communicating with server".into());
            }
        }
    }

    pub(crate) fn apply_thresholds(&mut self, res: Result<(), ClientError>) {
        match res {
            Ok(()) => self.notify(
                Severity::Success,
                "✓ Alert thresholds updated successfully".into(),
            ),
            Err(ClientError::Rejected { message, .. }) => {
                warn!(error = %message, "update-thresholds rejected");
                self.notify(
                    Severity::Error,
                    format!("✗ Failed to update thresholds: {message}"),
                );
            }
            Err(e) => {
                warn!(error = %e, "update-thresholds request failed");
                self.notify(Severity::Error, "✗ Error communicating with server".into());
            }
        }
    }
}
