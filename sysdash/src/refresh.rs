//! Refresh orchestration: the repeating poll, the per-tick fan-out, and applying
//! settled results to view state and the renderer.
//!
//! Everything runs on one task. A cycle's eight fetches are in flight together and
//! joined before anything is written, so the screen never shows half a cycle.
//! Cycles may overlap when a fetch outlasts the interval; each one is applied when
//! it settles and the last to settle wins. Every fragment replaces its own slice
//! of state in full, so overlapping applies cannot mix two cycles in one widget.

use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Local};
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::banner::{BannerSlot, Severity};
use crate::client::MetricsSource;
use crate::error::ClientError;
use crate::prefs::{Prefs, Theme};
use crate::render::Render;
use crate::schedule::{Ticker, TimerStats};
use crate::types::{
    AlertList, CpuSnapshot, DiskSnapshot, HistorySeries, MemorySnapshot, NetworkSnapshot,
    ProcessList, SystemInfo, Thresholds,
};
use crate::view::ViewState;

/// Settled outcome of every fragment fetch in one cycle.
#[derive(Debug)]
pub struct CycleReport {
    pub system_info: Result<SystemInfo, ClientError>,
    pub cpu: Result<CpuSnapshot, ClientError>,
    pub memory: Result<MemorySnapshot, ClientError>,
    pub disk: Result<DiskSnapshot, ClientError>,
    pub network: Result<NetworkSnapshot, ClientError>,
    pub processes: Result<ProcessList, ClientError>,
    pub alerts: Result<AlertList, ClientError>,
    pub history: Result<HistorySeries, ClientError>,
    pub finished_at: DateTime<Local>,
}

impl CycleReport {
    pub fn failures(&self) -> usize {
        [
            self.system_info.is_err(),
            self.cpu.is_err(),
            self.memory.is_err(),
            self.disk.is_err(),
            self.network.is_err(),
            self.processes.is_err(),
            self.alerts.is_err(),
            self.history.is_err(),
        ]
        .iter()
        .filter(|&&failed| failed)
        .count()
    }
}

/// Fetch all fragments concurrently and wait for every one to settle.
pub async fn fetch_cycle<C: MetricsSource>(client: &C) -> CycleReport {
    let (system_info, cpu, memory, disk, network, processes, alerts, history) = tokio::join!(
        client.system_info(),
        client.cpu(),
        client.memory(),
        client.disk(),
        client.network(),
        client.processes(),
        client.alerts(),
        client.history(),
    );
    CycleReport {
        system_info,
        cpu,
        memory,
        disk,
        network,
        processes,
        alerts,
        history,
        finished_at: Local::now(),
    }
}

/// Work that was started earlier and has now settled.
#[derive(Debug)]
pub(crate) enum Completion {
    Cycle(Box<CycleReport>),
    Processes(Result<ProcessList, ClientError>),
    Kill(Result<String, ClientError>),
    Thresholds(Result<(), ClientError>),
}

/// What one call to [`Dashboard::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The timer fired and a new cycle was started.
    Tick,
    /// Some in-flight request settled and was applied.
    Applied,
    /// A local notification timed out.
    BannerExpired,
}

/// Orchestrator plus the state it owns. Interaction handlers live in `handlers.rs`.
pub struct Dashboard<C, R> {
    pub(crate) client: Rc<C>,
    pub(crate) render: R,
    pub(crate) view: ViewState,
    pub(crate) banner: BannerSlot,
    pub(crate) ticker: Ticker,
    pub(crate) prefs: Prefs,
    pub(crate) theme: Theme,
    in_flight: FuturesUnordered<LocalBoxFuture<'static, Completion>>,
    last_updated: Option<DateTime<Local>>,
    cycles_completed: u64,
}

impl<C, R> Dashboard<C, R>
where
    C: MetricsSource + 'static,
    R: Render,
{
    pub fn new(client: Rc<C>, mut render: R, prefs: Prefs, theme: Theme, interval: Duration) -> Self {
        render.theme(theme);
        Self {
            client,
            render,
            view: ViewState::new(),
            banner: BannerSlot::new(),
            ticker: Ticker::new(interval),
            prefs,
            theme,
            in_flight: FuturesUnordered::new(),
            last_updated: None,
            cycles_completed: 0,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.render
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn banner(&self) -> &BannerSlot {
        &self.banner
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn interval(&self) -> Duration {
        self.ticker.interval()
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn timer_stats(&self) -> TimerStats {
        self.ticker.stats()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Arm the repeating poll.
    pub fn start(&mut self, interval: Duration) {
        self.ticker.start(interval);
        info!(interval_ms = self.ticker.interval().as_millis() as u64, "auto refresh started");
    }

    /// New cadence from the next tick on. No fetch is forced.
    pub fn reconfigure(&mut self, interval: Duration) {
        self.ticker.reconfigure(interval);
        info!(interval_ms = self.ticker.interval().as_millis() as u64, "refresh interval updated");
    }

    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    /// Run one cycle now without touching the schedule.
    pub fn trigger_once(&mut self) {
        let client = Rc::clone(&self.client);
        self.in_flight.push(Box::pin(async move {
            Completion::Cycle(Box::new(fetch_cycle(&*client).await))
        }));
    }

    pub(crate) fn fetch_processes(&mut self) {
        let client = Rc::clone(&self.client);
        self.in_flight
            .push(Box::pin(async move { Completion::Processes(client.processes().await) }));
    }

    pub(crate) fn send_kill(&mut self, pid: u32) {
        let client = Rc::clone(&self.client);
        self.in_flight
            .push(Box::pin(async move { Completion::Kill(client.kill_process(pid).await) }));
    }

    pub(crate) fn send_thresholds(&mut self, t: Thresholds) {
        let client = Rc::clone(&self.client);
        self.in_flight.push(Box::pin(async move {
            Completion::Thresholds(client.update_thresholds(t).await)
        }));
    }

    /// Wait for the next event and handle it: a timer tick, a settled request, or
    /// a notification timing out. Cancel-safe: dropping the future loses nothing.
    pub async fn step(&mut self) -> Step {
        let deadline = self.banner.deadline();
        tokio::select! {
            _ = self.ticker.tick() => {
                debug!("refresh tick");
                self.trigger_once();
                Step::Tick
            }
            Some(done) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                self.complete(done);
                Step::Applied
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if self.banner.expire(Instant::now()) {
                    self.render.banner(self.banner.current());
                }
                Step::BannerExpired
            }
        }
    }

    /// Apply every in-flight request, including follow-ups they start. Ticks are ignored.
    pub async fn settle(&mut self) {
        while let Some(done) = self.in_flight.next().await {
            self.complete(done);
        }
    }

    fn complete(&mut self, done: Completion) {
        match done {
            Completion::Cycle(report) => self.apply_cycle(*report),
            Completion::Processes(res) => self.apply_processes(res),
            Completion::Kill(res) => self.apply_kill(res),
            Completion::Thresholds(res) => self.apply_thresholds(res),
        }
    }

    /// Write each successful fragment; leave failed ones as last rendered.
    pub fn apply_cycle(&mut self, report: CycleReport) {
        let failures = report.failures();
        match report.system_info {
            Ok(v) => self.render.system_info(&v),
            Err(e) => fragment_failed("system-info", &e),
        }
        match report.cpu {
            Ok(v) => self.render.cpu(&v),
            Err(e) => fragment_failed("cpu", &e),
        }
        match report.memory {
            Ok(v) => self.render.memory(&v),
            Err(e) => fragment_failed("memory", &e),
        }
        match report.disk {
            Ok(v) => self.render.disk(&v),
            Err(e) => fragment_failed("disk", &e),
        }
        match report.network {
            Ok(v) => self.render.network(&v),
            Err(e) => fragment_failed("network", &e),
        }
        self.apply_processes(report.processes);
        match report.alerts {
            Ok(v) => {
                self.banner.show_server_alerts(&v.alerts);
                self.render.banner(self.banner.current());
            }
            Err(e) => fragment_failed("alerts", &e),
        }
        match report.history {
            Ok(v) => self.render.history(&v),
            Err(e) => fragment_failed("history", &e),
        }

        // The cycle counts as done however many fragments failed.
        self.last_updated = Some(report.finished_at);
        self.cycles_completed += 1;
        self.render.last_updated(report.finished_at);
        debug!(failures, "refresh cycle applied");
    }

    fn apply_processes(&mut self, res: Result<ProcessList, ClientError>) {
        match res {
            Ok(list) => {
                self.view.set_processes(list.processes);
                self.render_table();
            }
            Err(e) => fragment_failed("processes", &e),
        }
    }

    pub(crate) fn render_table(&mut self) {
        let table = self.view.table();
        self.render.processes(&table);
    }

    pub(crate) fn notify(&mut self, severity: Severity, text: String) {
        self.banner.notify(severity, text, Instant::now());
        self.render.banner(self.banner.current());
    }
}

fn fragment_failed(fragment: &'static str, err: &ClientError) {
    warn!(fragment, error = %err, "fragment fetch failed; keeping previous values");
}
