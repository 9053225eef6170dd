//! Types that mirror the backend's JSON schema.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// The backend emits `null` for fields it could not read (e.g. a process name).
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform_release: String,
    pub uptime_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frequency {
    pub current: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub overall_usage: f64,
    // physical core count is unknown on some platforms
    #[serde(default)]
    pub core_count: Option<u32>,
    #[serde(default)]
    pub logical_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default)]
    pub per_core: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VirtualMemory {
    pub percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
    pub available_gb: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapMemory {
    pub percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySnapshot {
    #[serde(rename = "virtual")]
    pub virtual_mem: VirtualMemory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap: Option<SwapMemory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Partition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mountpoint: Option<String>,
    pub percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiskSnapshot {
    #[serde(default)]
    pub partitions: Vec<Partition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub sent_mb: f64,
    pub recv_mb: f64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

/// Scheduler state of a process. Anything but running/sleeping keeps its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProcessStatus {
    Running,
    Sleeping,
    Other(String),
}

impl Default for ProcessStatus {
    fn default() -> Self {
        ProcessStatus::Other(String::new())
    }
}

impl From<String> for ProcessStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "running" => ProcessStatus::Running,
            "sleeping" => ProcessStatus::Sleeping,
            _ => ProcessStatus::Other(s),
        }
    }
}

impl From<ProcessStatus> for String {
    fn from(s: ProcessStatus) -> Self {
        s.to_string()
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Running => f.write_str("running"),
            ProcessStatus::Sleeping => f.write_str("sleeping"),
            ProcessStatus::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpu_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub memory_percent: f64,
    #[serde(default)]
    pub status: ProcessStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_threads: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessList {
    #[serde(default)]
    pub processes: Vec<ProcessRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alert {
    pub message: String,
    // "warning" | "error"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertList {
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistorySeries {
    #[serde(default)]
    pub timestamps: Vec<String>,
    #[serde(default)]
    pub cpu: Vec<f64>,
    #[serde(default)]
    pub memory: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KillRequest {
    pub pid: u32,
}

/// Body of a kill-process reply: `message` on success, `error` otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: 80.0,
            memory: 85.0,
            disk: 90.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_record_tolerates_nulls_and_unknown_status() {
        let js = r#"{"pid": 7, "name": null, "cpu_percent": 1.5, "memory_percent": null,
                     "status": "disk-sleep", "num_threads": 3, "create_time": "2024-01-01 10:00:00"}"#;
        let p: ProcessRecord = serde_json::from_str(js).unwrap();
        assert_eq!(p.pid, 7);
        assert_eq!(p.name, "");
        assert_eq!(p.memory_percent, 0.0);
        assert_eq!(p.status, ProcessStatus::Other("disk-sleep".into()));
        assert_eq!(p.status.to_string(), "disk-sleep");
    }

    #[test]
    fn cpu_snapshot_without_frequency() {
        let js = r#"{"overall_usage": 12.5, "core_count": null, "logical_count": 8,
                     "frequency": null, "per_core": [10.0, 15.0]}"#;
        let c: CpuSnapshot = serde_json::from_str(js).unwrap();
        assert!(c.frequency.is_none());
        assert!(c.core_count.is_none());
        assert_eq!(c.logical_count, Some(8));
        assert_eq!(c.per_core.len(), 2);
    }

    #[test]
    fn memory_reads_virtual_key() {
        let js = r#"{"virtual": {"percent": 42.0, "total_gb": 16.0, "used_gb": 6.7, "available_gb": 9.3, "total": 1}}"#;
        let m: MemorySnapshot = serde_json::from_str(js).unwrap();
        assert_eq!(m.virtual_mem.percent, 42.0);
        assert!(m.swap.is_none());
    }
}
