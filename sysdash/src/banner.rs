//! The single banner slot shared by server alerts and local notifications.
//!
//! Last write wins. Server alerts stay until the next alert fetch replaces or
//! clears them; local notifications dismiss themselves after [`NOTIFICATION_TTL`],
//! but only if nothing has been written over them in the meantime.

use std::time::Duration;

use tokio::time::Instant;

use crate::types::Alert;

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);
const ALERT_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSource {
    Server,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub source: BannerSource,
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct BannerSlot {
    current: Option<Banner>,
    expires_at: Option<Instant>,
}

impl BannerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }

    /// When the local notification currently showing should disappear.
    pub fn deadline(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Write one alert batch. An empty batch hides the banner, whatever it showed.
    pub fn show_server_alerts(&mut self, alerts: &[Alert]) {
        self.expires_at = None;
        if alerts.is_empty() {
            self.current = None;
            return;
        }
        let text = alerts
            .iter()
            .map(|a| a.message.as_str())
            .collect::<Vec<_>>()
            .join(ALERT_SEPARATOR);
        let severity = if alerts.iter().any(|a| a.severity.as_deref() == Some("error")) {
            Severity::Error
        } else {
            Severity::Warning
        };
        self.current = Some(Banner {
            source: BannerSource::Server,
            severity,
            text: format!("⚠️ {text}"),
        });
    }

    pub fn notify(&mut self, severity: Severity, text: impl Into<String>, now: Instant) {
        self.current = Some(Banner {
            source: BannerSource::Local,
            severity,
            text: text.into(),
        });
        self.expires_at = Some(now + NOTIFICATION_TTL);
    }

    /// Drop an expired local notification. Returns true if the slot changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(at) if now >= at => {
                self.expires_at = None;
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(msg: &str, sev: Option<&str>) -> Alert {
        Alert {
            message: msg.into(),
            severity: sev.map(str::to_string),
        }
    }

    #[test]
    fn alert_batch_is_joined() {
        let mut s = BannerSlot::new();
        s.show_server_alerts(&[alert("CPU high", Some("warning")), alert("Disk full", Some("error"))]);
        let b = s.current().unwrap();
        assert_eq!(b.text, "⚠️ CPU high | Disk full");
        assert_eq!(b.source, BannerSource::Server);
        assert_eq!(b.severity, Severity::Error);
        assert!(s.deadline().is_none());
    }

    #[test]
    fn empty_batch_clears_even_a_notification() {
        let mut s = BannerSlot::new();
        s.notify(Severity::Success, "✓ done", Instant::now());
        s.show_server_alerts(&[]);
        assert!(s.current().is_none());
        assert!(s.deadline().is_none());
    }

    #[test]
    fn notification_overrides_alert_and_expires() {
        let now = Instant::now();
        let mut s = BannerSlot::new();
        s.show_server_alerts(&[alert("CPU high", None)]);
        s.notify(Severity::Error, "✗ failed", now);
        assert_eq!(s.current().unwrap().source, BannerSource::Local);
        assert!(!s.expire(now + Duration::from_secs(4)));
        assert!(s.expire(now + NOTIFICATION_TTL));
        assert!(s.current().is_none());
    }

    #[test]
    fn alert_written_over_notification_is_not_expired() {
        let now = Instant::now();
        let mut s = BannerSlot::new();
        s.notify(Severity::Info, "hello", now);
        s.show_server_alerts(&[alert("Memory high", None)]);
        assert!(!s.expire(now + NOTIFICATION_TTL));
        assert_eq!(s.current().unwrap().text, "⚠️ Memory high");
    }
}
