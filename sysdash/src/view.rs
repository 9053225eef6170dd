//! Client-side view state for the process table: last fetched list, sort key, search text.
//!
//! The table shown on screen is always `filter(sort(processes, key), term)` cut to
//! [`TABLE_LIMIT`] rows. Nothing is cached; every call to [`ViewState::table`]
//! recomputes it from the stored list.

use std::cmp::Ordering;

use crate::types::ProcessRecord;

/// Rows shown in the process table.
pub const TABLE_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Cpu,
    Memory,
    Name,
    Pid,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Cpu, SortKey::Memory, SortKey::Name, SortKey::Pid];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Cpu => "CPU",
            SortKey::Memory => "Memory",
            SortKey::Name => "Name",
            SortKey::Pid => "PID",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortKey::Cpu => SortKey::Memory,
            SortKey::Memory => SortKey::Name,
            SortKey::Name => SortKey::Pid,
            SortKey::Pid => SortKey::Cpu,
        }
    }

    fn compare(self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        match self {
            SortKey::Cpu => b
                .cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(Ordering::Equal),
            SortKey::Memory => b
                .memory_percent
                .partial_cmp(&a.memory_percent)
                .unwrap_or(Ordering::Equal),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Pid => a.pid.cmp(&b.pid),
        }
    }
}

/// Stable sort: equal keys keep their server order.
pub fn sort_processes(procs: &[ProcessRecord], key: SortKey) -> Vec<&ProcessRecord> {
    let mut out: Vec<&ProcessRecord> = procs.iter().collect();
    out.sort_by(|a, b| key.compare(a, b));
    out
}

/// Case-insensitive substring match on name, or substring match on the decimal pid.
pub fn matches_search(p: &ProcessRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    p.name.to_lowercase().contains(&needle) || p.pid.to_string().contains(&needle)
}

pub fn filter_processes<'a, I>(procs: I, term: &str) -> Vec<&'a ProcessRecord>
where
    I: IntoIterator<Item = &'a ProcessRecord>,
{
    procs
        .into_iter()
        .filter(|p| matches_search(p, term))
        .collect()
}

/// What the table shows: at most [`TABLE_LIMIT`] rows plus the untruncated count.
#[derive(Debug, Clone)]
pub struct ProcessTable<'a> {
    pub rows: Vec<&'a ProcessRecord>,
    pub total: usize,
    pub sort_key: SortKey,
    pub search_term: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    processes: Vec<ProcessRecord>,
    sort_key: SortKey,
    search_term: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection (server order). Does not render by itself.
    pub fn set_processes(&mut self, list: Vec<ProcessRecord>) {
        self.processes = list;
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn table(&self) -> ProcessTable<'_> {
        let sorted = sort_processes(&self.processes, self.sort_key);
        let mut rows = filter_processes(sorted, &self.search_term);
        let total = rows.len();
        rows.truncate(TABLE_LIMIT);
        ProcessTable {
            rows,
            total,
            sort_key: self.sort_key,
            search_term: &self.search_term,
        }
    }
}
