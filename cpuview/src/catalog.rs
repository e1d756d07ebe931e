//! Host CPU catalog
//!
//! A one-time snapshot of the host's `/proc/cpuinfo`, split into one text
//! block per CPU. The catalog is built before any reader exists and is never
//! mutated afterwards, so it is shared between readers as a plain
//! `Arc<HostCpuCatalog>`.

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::domain::{CpuId, CpuInfoError};

/// Where the host publishes per-CPU information on Linux
pub const HOST_CPUINFO_PATH: &str = "/proc/cpuinfo";

/// One CPU's block from the host dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCpuRecord {
    pub host_cpu_id: CpuId,
    /// Verbatim block lines, each newline-terminated, followed by the blank
    /// separator line.
    pub text: String,
}

/// Immutable per-host collection of CPU blocks, indexed by host CPU id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostCpuCatalog {
    records: Vec<HostCpuRecord>,
}

impl HostCpuCatalog {
    /// Build the catalog at process start.
    ///
    /// Never fails: an unreadable dump (non-Linux host, permission denied)
    /// yields an empty catalog, which disables filtering for the lifetime of
    /// the process. There is no retry.
    #[must_use]
    pub fn build(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(catalog) => {
                info!("Host CPU catalog built with {} CPUs", catalog.len());
                catalog
            }
            Err(e) => {
                debug!("{e}; virtual cpuinfo will be empty");
                Self::default()
            }
        }
    }

    /// Read and split a dump file.
    ///
    /// # Errors
    /// Returns [`CpuInfoError::CatalogUnreadable`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CpuInfoError> {
        let path = path.as_ref();
        let dump = fs::read_to_string(path)
            .map_err(|source| CpuInfoError::CatalogUnreadable { path: path.to_path_buf(), source })?;
        Ok(Self::from_dump(&dump))
    }

    /// Split dump text into blank-line-delimited blocks numbered in order.
    ///
    /// Runs of blank lines count as a single separator, and a final block
    /// without a trailing blank line is still kept.
    #[must_use]
    pub fn from_dump(dump: &str) -> Self {
        let mut records = Vec::new();
        let mut block = String::new();

        for line in dump.lines() {
            if line.trim().is_empty() {
                push_block(&mut records, &mut block);
                continue;
            }
            block.push_str(line);
            block.push('\n');
        }
        push_block(&mut records, &mut block);

        Self { records }
    }

    /// Record text for a host CPU id, if the host reported that CPU
    #[must_use]
    pub fn lookup(&self, id: CpuId) -> Option<&str> {
        let index = usize::try_from(id.0).ok()?;
        self.records.get(index).map(|r| r.text.as_str())
    }

    /// All records in ascending host-id order
    pub fn records(&self) -> impl Iterator<Item = &HostCpuRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn push_block(records: &mut Vec<HostCpuRecord>, block: &mut String) {
    if block.is_empty() {
        return;
    }
    let mut text = std::mem::take(block);
    text.push('\n');
    // Block count is bounded by the host's CPU count
    #[allow(clippy::cast_possible_truncation)]
    let host_cpu_id = CpuId(records.len() as u32);
    records.push(HostCpuRecord { host_cpu_id, text });
}
