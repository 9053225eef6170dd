//! Render layer seam: the `Render` trait plus pure builders that turn a fetched
//! fragment into the values its widgets display.
//!
//! Builders never fail on missing optional data. They return `None` (or leave a
//! field `None`) and the renderer keeps whatever it showed before.

use chrono::{DateTime, Local};

use crate::banner::Banner;
use crate::prefs::Theme;
use crate::types::{
    CpuSnapshot, DiskSnapshot, HistorySeries, MemorySnapshot, NetworkSnapshot, ProcessRecord,
    ProcessStatus, SystemInfo,
};
use crate::view::{ProcessTable, SortKey};

/// Displays one snapshot per call. Implementations must not fetch or touch view state.
pub trait Render {
    fn system_info(&mut self, info: &SystemInfo);
    fn cpu(&mut self, cpu: &CpuSnapshot);
    fn memory(&mut self, mem: &MemorySnapshot);
    fn disk(&mut self, disk: &DiskSnapshot);
    fn network(&mut self, net: &NetworkSnapshot);
    fn processes(&mut self, table: &ProcessTable<'_>);
    fn history(&mut self, hist: &HistorySeries);
    fn banner(&mut self, banner: Option<&Banner>);
    fn last_updated(&mut self, at: DateTime<Local>);
    fn theme(&mut self, theme: Theme);
}

/// Severity tier of a usage bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Low,
    Medium,
    High,
}

impl UsageLevel {
    pub fn of(percent: f64) -> Self {
        if percent < 60.0 {
            UsageLevel::Low
        } else if percent < 80.0 {
            UsageLevel::Medium
        } else {
            UsageLevel::High
        }
    }
}

// Per-process cells above this are flagged
const HOT_PERCENT: f64 = 50.0;
const NAME_MAX: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub percent: f64,
    pub level: UsageLevel,
}

impl Bar {
    pub fn new(percent: f64) -> Self {
        Self {
            percent,
            level: UsageLevel::of(percent),
        }
    }

    /// Gauge ratio in 0..=1.
    pub fn ratio(&self) -> f64 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemPanel {
    pub platform: String,
    pub uptime: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreCell {
    pub label: String,
    pub value: String,
    pub bar: Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpuPanel {
    pub percent: String,
    pub bar: Bar,
    pub cores: String,
    pub logical: String,
    pub frequency: Option<String>,
    pub per_core: Vec<CoreCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemPanel {
    pub percent: String,
    pub bar: Bar,
    pub total: String,
    pub used: String,
    pub available: String,
    pub swap: Option<SwapLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwapLine {
    pub percent: String,
    pub bar: Bar,
    pub used: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskPanel {
    pub percent: String,
    pub bar: Bar,
    pub total: String,
    pub used: String,
    pub free: String,
    pub device: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetPanel {
    pub sent: String,
    pub recv: String,
    pub packets_sent: String,
    pub packets_recv: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Running,
    Sleeping,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub pid: u32,
    pub name: String,
    pub full_name: String,
    pub cpu: String,
    pub cpu_hot: bool,
    pub mem: String,
    pub mem_hot: bool,
    pub status: String,
    pub status_class: StatusClass,
    pub threads: String,
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TablePanel {
    pub rows: Vec<ProcessRow>,
    pub total: usize,
    pub sort_key: SortKey,
    pub search_term: String,
}

/// Chart points: x is the sample index, y the percentage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryPanel {
    pub cpu: Vec<(f64, f64)>,
    pub memory: Vec<(f64, f64)>,
}

pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    format!("{days}d {hours}h {minutes}m")
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn truncate_name(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

fn gb(v: f64) -> String {
    format!("{v} GB")
}

fn pct(v: f64) -> String {
    format!("{v}%")
}

fn count(v: Option<u32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "N/A".into())
}

pub fn system_panel(info: &SystemInfo) -> SystemPanel {
    SystemPanel {
        platform: format!("{} {}", info.platform, info.platform_release)
            .trim()
            .to_string(),
        uptime: format_uptime(info.uptime_seconds),
    }
}

pub fn cpu_panel(cpu: &CpuSnapshot) -> CpuPanel {
    CpuPanel {
        percent: pct(cpu.overall_usage),
        bar: Bar::new(cpu.overall_usage),
        cores: count(cpu.core_count),
        logical: count(cpu.logical_count),
        frequency: cpu.frequency.as_ref().map(|f| format!("{} MHz", f.current)),
        per_core: cpu
            .per_core
            .iter()
            .enumerate()
            .map(|(i, &v)| CoreCell {
                label: format!("Core {i}"),
                value: pct(v),
                bar: Bar::new(v),
            })
            .collect(),
    }
}

pub fn memory_panel(mem: &MemorySnapshot) -> MemPanel {
    let v = &mem.virtual_mem;
    MemPanel {
        percent: pct(v.percent),
        bar: Bar::new(v.percent),
        total: gb(v.total_gb),
        used: gb(v.used_gb),
        available: gb(v.available_gb),
        swap: mem
            .swap
            .as_ref()
            .filter(|s| s.total_gb > 0.0)
            .map(|s| SwapLine {
                percent: pct(s.percent),
                bar: Bar::new(s.percent),
                used: gb(s.used_gb),
                total: gb(s.total_gb),
            }),
    }
}

/// First partition only (usually the main drive). `None` when there are none.
pub fn disk_panel(disk: &DiskSnapshot) -> Option<DiskPanel> {
    let d = disk.partitions.first()?;
    let device = match (&d.device, &d.mountpoint) {
        (Some(dev), Some(mp)) => Some(format!("{dev} on {mp}")),
        (Some(dev), None) => Some(dev.clone()),
        (None, Some(mp)) => Some(mp.clone()),
        (None, None) => None,
    };
    Some(DiskPanel {
        percent: pct(d.percent),
        bar: Bar::new(d.percent),
        total: gb(d.total_gb),
        used: gb(d.used_gb),
        free: gb(d.free_gb),
        device,
    })
}

pub fn network_panel(net: &NetworkSnapshot) -> NetPanel {
    NetPanel {
        sent: format!("{:.2} MB", net.sent_mb),
        recv: format!("{:.2} MB", net.recv_mb),
        packets_sent: group_thousands(net.packets_sent),
        packets_recv: group_thousands(net.packets_recv),
    }
}

pub fn process_row(p: &ProcessRecord) -> ProcessRow {
    let status_class = match p.status {
        ProcessStatus::Running => StatusClass::Running,
        ProcessStatus::Sleeping => StatusClass::Sleeping,
        ProcessStatus::Other(_) => StatusClass::Other,
    };
    ProcessRow {
        pid: p.pid,
        name: truncate_name(&p.name, NAME_MAX),
        full_name: p.name.clone(),
        cpu: pct(p.cpu_percent),
        cpu_hot: p.cpu_percent > HOT_PERCENT,
        mem: format!("{:.2}%", p.memory_percent),
        mem_hot: p.memory_percent > HOT_PERCENT,
        status: p.status.to_string(),
        status_class,
        threads: p.num_threads.to_string(),
        created: p.create_time.clone(),
    }
}

pub fn table_panel(table: &ProcessTable<'_>) -> TablePanel {
    TablePanel {
        rows: table.rows.iter().map(|p| process_row(p)).collect(),
        total: table.total,
        sort_key: table.sort_key,
        search_term: table.search_term.to_string(),
    }
}

/// `None` when the backend has no samples yet.
pub fn history_panel(hist: &HistorySeries) -> Option<HistoryPanel> {
    if hist.cpu.is_empty() {
        return None;
    }
    let points = |vals: &[f64]| -> Vec<(f64, f64)> {
        vals.iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    };
    Some(HistoryPanel {
        cpu: points(&hist.cpu),
        memory: points(&hist.memory),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Frequency, Partition, VirtualMemory};

    #[test]
    fn usage_level_boundaries() {
        assert_eq!(UsageLevel::of(59.9), UsageLevel::Low);
        assert_eq!(UsageLevel::of(60.0), UsageLevel::Medium);
        assert_eq!(UsageLevel::of(79.9), UsageLevel::Medium);
        assert_eq!(UsageLevel::of(80.0), UsageLevel::High);
        assert_eq!(UsageLevel::of(0.0), UsageLevel::Low);
    }

    #[test]
    fn uptime_is_days_hours_minutes() {
        assert_eq!(format_uptime(0), "0d 0h 0m");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
        assert_eq!(format_uptime(3 * 86_400 + 59), "3d 0h 0m");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "a".repeat(31);
        assert_eq!(truncate_name(&long, 30), format!("{}...", "a".repeat(30)));
        assert_eq!(truncate_name("short", 30), "short");
    }

    #[test]
    fn cpu_panel_without_frequency() {
        let p = cpu_panel(&CpuSnapshot {
            overall_usage: 72.5,
            core_count: Some(4),
            logical_count: Some(8),
            frequency: None,
            per_core: vec![10.0, 90.0],
        });
        assert_eq!(p.percent, "72.5%");
        assert_eq!(p.bar.level, UsageLevel::Medium);
        assert!(p.frequency.is_none());
        assert_eq!(p.per_core[1].label, "Core 1");
        assert_eq!(p.per_core[1].bar.level, UsageLevel::High);

        let p = cpu_panel(&CpuSnapshot {
            frequency: Some(Frequency {
                current: 2400.5,
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(p.frequency.as_deref(), Some("2400.5 MHz"));
        assert_eq!(p.cores, "N/A");
    }

    #[test]
    fn memory_and_disk_panels() {
        let m = memory_panel(&MemorySnapshot {
            virtual_mem: VirtualMemory {
                percent: 85.0,
                total_gb: 16.0,
                used_gb: 13.6,
                available_gb: 2.4,
            },
            swap: None,
        });
        assert_eq!(m.total, "16 GB");
        assert_eq!(m.used, "13.6 GB");
        assert_eq!(m.bar.level, UsageLevel::High);

        assert!(disk_panel(&DiskSnapshot::default()).is_none());
        let d = disk_panel(&DiskSnapshot {
            partitions: vec![Partition {
                device: Some("/dev/sda1".into()),
                mountpoint: Some("/".into()),
                percent: 40.0,
                total_gb: 100.0,
                used_gb: 40.0,
                free_gb: 60.0,
            }],
        })
        .unwrap();
        assert_eq!(d.free, "60 GB");
        assert_eq!(d.device.as_deref(), Some("/dev/sda1 on /"));
    }

    #[test]
    fn network_panel_formats() {
        let n = network_panel(&NetworkSnapshot {
            sent_mb: 12.0,
            recv_mb: 3.14159,
            packets_sent: 12345,
            packets_recv: 7,
        });
        assert_eq!(n.sent, "12.00 MB");
        assert_eq!(n.recv, "3.14 MB");
        assert_eq!(n.packets_sent, "12,345");
    }

    #[test]
    fn process_row_flags_hot_cells() {
        let r = process_row(&ProcessRecord {
            pid: 9,
            name: "stress".into(),
            cpu_percent: 75.0,
            memory_percent: 3.14159,
            status: ProcessStatus::Running,
            num_threads: 4,
            create_time: "2024-01-01 00:00:00".into(),
        });
        assert!(r.cpu_hot);
        assert!(!r.mem_hot);
        assert_eq!(r.mem, "3.14%");
        assert_eq!(r.status_class, StatusClass::Running);
    }

    #[test]
    fn empty_history_is_none() {
        assert!(history_panel(&HistorySeries::default()).is_none());
        let h = history_panel(&HistorySeries {
            timestamps: vec!["a".into(), "b".into()],
            cpu: vec![1.0, 2.0],
            memory: vec![3.0, 4.0],
        })
        .unwrap();
        assert_eq!(h.cpu, vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(h.memory[1], (1.0, 4.0));
    }
}
