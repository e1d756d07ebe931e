//! Pre-flight checks for cpuview
//!
//! Validates the environment before building the virtual file.
//! Provides clear, actionable error messages when requirements aren't met.

use anyhow::{bail, Result};
use log::warn;
use std::path::Path;

use crate::catalog::HostCpuCatalog;
use crate::cpuset::CPUSET_CPUS_FILE;

/// Run all pre-flight checks for a cgroup directory
pub fn run_preflight_checks(cgroup_dir: &Path) -> Result<()> {
    check_linux_host()?;
    check_cgroup_dir(cgroup_dir)?;
    Ok(())
}

/// cpusets and `/proc/cpuinfo` only exist on Linux
fn check_linux_host() -> Result<()> {
    if cfg!(target_os = "linux") {
        return Ok(());
    }
    bail!("cpuview requires Linux: cgroup cpusets are a Linux kernel feature");
}

/// Check that the cgroup directory exists
///
/// A missing `cpuset.cpus` is not an error (the cpuset controller may not be
/// enabled for this cgroup); the document then falls back to all host CPUs.
fn check_cgroup_dir(cgroup_dir: &Path) -> Result<()> {
    if !cgroup_dir.is_dir() {
        bail!(
            "cgroup directory not found: {}\n\n\
             Check the path, or pass --pid to resolve it from /proc/<pid>/cgroup",
            cgroup_dir.display()
        );
    }
    if !cgroup_dir.join(CPUSET_CPUS_FILE).exists() {
        warn!("{} has no {CPUSET_CPUS_FILE}; showing all host CPUs", cgroup_dir.display());
    }
    Ok(())
}

/// Warn when the host catalog came out empty
pub fn check_catalog(catalog: &HostCpuCatalog, cpuinfo_path: &Path, quiet: bool) {
    if catalog.is_empty() && !quiet {
        eprintln!(
            "warning: no CPU blocks read from {}, output will be empty",
            cpuinfo_path.display()
        );
    }
}
