//! Retained widget values: the terminal renderer.
//!
//! Each `Render` call overwrites only its own panel. A panel whose fetch failed
//! is simply not written, so it keeps showing the last good values.

use chrono::{DateTime, Local};

use crate::banner::Banner;
use crate::prefs::Theme;
use crate::render::{
    cpu_panel, disk_panel, history_panel, memory_panel, network_panel, system_panel, table_panel,
    CpuPanel, DiskPanel, HistoryPanel, MemPanel, NetPanel, Render, SystemPanel, TablePanel,
};
use crate::types::{
    CpuSnapshot, DiskSnapshot, HistorySeries, MemorySnapshot, NetworkSnapshot, SystemInfo,
};
use crate::view::ProcessTable;

#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub theme: Theme,
    pub system: Option<SystemPanel>,
    pub cpu: Option<CpuPanel>,
    pub memory: Option<MemPanel>,
    pub disk: Option<DiskPanel>,
    pub network: Option<NetPanel>,
    pub table: TablePanel,
    pub history: Option<HistoryPanel>,
    pub banner: Option<Banner>,
    pub last_updated: Option<String>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Render for Screen {
    fn system_info(&mut self, info: &SystemInfo) {
        self.system = Some(system_panel(info));
    }

    fn cpu(&mut self, cpu: &CpuSnapshot) {
        let mut panel = cpu_panel(cpu);
        // no frequency reported: keep the last one shown
        if panel.frequency.is_none() {
            panel.frequency = self.cpu.as_ref().and_then(|p| p.frequency.clone());
        }
        self.cpu = Some(panel);
    }

    fn memory(&mut self, mem: &MemorySnapshot) {
        self.memory = Some(memory_panel(mem));
    }

    fn disk(&mut self, disk: &DiskSnapshot) {
        if let Some(panel) = disk_panel(disk) {
            self.disk = Some(panel);
        }
    }

    fn network(&mut self, net: &NetworkSnapshot) {
        self.network = Some(network_panel(net));
    }

    fn processes(&mut self, table: &ProcessTable<'_>) {
        self.table = table_panel(table);
    }

    fn history(&mut self, hist: &HistorySeries) {
        if let Some(panel) = history_panel(hist) {
            self.history = Some(panel);
        }
    }

    fn banner(&mut self, banner: Option<&Banner>) {
        self.banner = banner.cloned();
    }

    fn last_updated(&mut self, at: DateTime<Local>) {
        self.last_updated = Some(at.format("%H:%M:%S").to_string());
    }

    fn theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Frequency, Partition};

    #[test]
    fn missing_frequency_keeps_previous_value() {
        let mut s = Screen::new();
        s.cpu(&CpuSnapshot {
            overall_usage: 10.0,
            frequency: Some(Frequency {
                current: 3000.0,
                ..Default::default()
            }),
            ..Default::default()
        });
        s.cpu(&CpuSnapshot {
            overall_usage: 20.0,
            ..Default::default()
        });
        let cpu = s.cpu.unwrap();
        assert_eq!(cpu.percent, "20%");
        assert_eq!(cpu.frequency.as_deref(), Some("3000 MHz"));
    }

    #[test]
    fn empty_partitions_leave_disk_untouched() {
        let mut s = Screen::new();
        s.disk(&DiskSnapshot {
            partitions: vec![Partition {
                percent: 55.0,
                total_gb: 10.0,
                used_gb: 5.5,
                free_gb: 4.5,
                ..Default::default()
            }],
        });
        s.disk(&DiskSnapshot::default());
        assert_eq!(s.disk.unwrap().percent, "55%");
    }
}
