//! Cpuset range parsing
//!
//! Turns the cgroup `cpuset.cpus` list format (e.g. `"0-3,8,10-11"`) into the
//! ascending sequence of host CPU ids a container may use.
//!
//! # Trust boundary
//!
//! The kernel validates `cpuset.cpus` before accepting a write, so this parser
//! does not reject malformed input. What it does with such input is fixed:
//!
//! - a bound that is not a non-negative integer counts as `0`
//! - a token with more than one `-` contributes nothing
//! - a range `A-B` with `A > B` contributes nothing
//! - blank tokens contribute nothing
//!
//! Duplicates are kept; well-formed kernel output never produces them.

use log::debug;
use std::fs;
use std::path::Path;

use crate::domain::{CpuId, CpuInfoError};

/// Name of the cpuset controller file listing allowed CPUs
pub const CPUSET_CPUS_FILE: &str = "cpuset.cpus";

/// Ascending host CPU ids derived from one read of `cpuset.cpus`
///
/// Built fresh for every read and never cached: the orchestrator may rewrite
/// the cgroup file at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpusetSelection {
    ids: Vec<CpuId>,
}

impl CpusetSelection {
    #[must_use]
    pub fn ids(&self) -> &[CpuId] {
        &self.ids
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Parse a cpuset list into an ascending selection.
///
/// Empty or whitespace-only input yields an empty selection.
#[must_use]
pub fn parse(raw: &str) -> CpusetSelection {
    let mut ids = Vec::new();

    for token in raw.trim().split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let parts: Vec<&str> = token.split('-').collect();
        match parts.as_slice() {
            [single] => ids.push(CpuId(parse_bound(single))),
            [start, end] => {
                ids.extend((parse_bound(start)..=parse_bound(end)).map(CpuId));
            }
            _ => {}
        }
    }

    ids.sort_unstable();
    CpusetSelection { ids }
}

fn parse_bound(s: &str) -> u32 {
    s.trim().parse().unwrap_or(0)
}

/// Read the raw contents of `<cgroup_dir>/cpuset.cpus`.
///
/// # Errors
/// Returns [`CpuInfoError::CpusetUnreadable`] if the file is missing or
/// cannot be read (including a race with cgroup teardown).
pub fn read_cpuset_file(cgroup_dir: &Path) -> Result<String, CpuInfoError> {
    let path = cgroup_dir.join(CPUSET_CPUS_FILE);
    fs::read_to_string(&path).map_err(|source| CpuInfoError::CpusetUnreadable { path, source })
}

/// Current selection for a cgroup.
///
/// A read failure is logged and treated exactly like an empty file.
#[must_use]
pub fn current_selection(cgroup_dir: &Path) -> CpusetSelection {
    match read_cpuset_file(cgroup_dir) {
        Ok(raw) => parse(&raw),
        Err(e) => {
            debug!("{e}");
            CpusetSelection::default()
        }
    }
}
