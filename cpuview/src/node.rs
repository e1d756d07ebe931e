//! Filesystem-facing cpuinfo node
//!
//! The hosting virtual-filesystem layer owns mounting, path lookup and request
//! framing. It talks to each file through [`VirtualFile`], which only knows
//! how to describe itself and produce its bytes. Writes, truncation and
//! directory operations are not part of the trait and are refused by the host
//! layer before they get here.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::HostCpuCatalog;
use crate::cpuset;
use crate::domain::Inode;
use crate::render::VirtualCpuInfoRenderer;

/// Stable inode of the virtual cpuinfo file
pub const INODE_CPUINFO: Inode = Inode(2);

/// Read-only for everyone
pub const READ_ONLY_MODE: u32 = 0o444;

/// Attributes reported for a virtual file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileAttr {
    pub inode: Inode,
    pub mode: u32,
    pub size: u64,
}

/// A read-only file whose content is produced on demand
///
/// Implementations are called concurrently from many threads and must not
/// fail: a degraded environment yields less content, never an error.
pub trait VirtualFile: Send + Sync {
    /// File name inside the mounted directory
    fn name(&self) -> &'static str;

    fn attr(&self) -> FileAttr;

    fn read_all(&self) -> Vec<u8>;
}

/// `cpuinfo` restricted to one cgroup's cpuset
#[derive(Debug, Clone)]
pub struct CpuInfoFileNode {
    cgroup_dir: PathBuf,
    renderer: VirtualCpuInfoRenderer,
}

impl CpuInfoFileNode {
    #[must_use]
    pub fn new(cgroup_dir: impl Into<PathBuf>, catalog: Arc<HostCpuCatalog>) -> Self {
        Self { cgroup_dir: cgroup_dir.into(), renderer: VirtualCpuInfoRenderer::new(catalog) }
    }

    #[must_use]
    pub fn cgroup_dir(&self) -> &Path {
        &self.cgroup_dir
    }

    /// Current document, rebuilt from the live cpuset on every call
    #[must_use]
    pub fn render(&self) -> String {
        if self.renderer.catalog().is_empty() {
            return String::new();
        }
        let selection = cpuset::current_selection(&self.cgroup_dir);
        self.renderer.render(selection.ids())
    }
}

impl VirtualFile for CpuInfoFileNode {
    fn name(&self) -> &'static str {
        "cpuinfo"
    }

    /// Size is recomputed from a fresh render because the cpuset may have
    /// changed since the last read.
    fn attr(&self) -> FileAttr {
        FileAttr { inode: INODE_CPUINFO, mode: READ_ONLY_MODE, size: self.render().len() as u64 }
    }

    fn read_all(&self) -> Vec<u8> {
        self.render().into_bytes()
    }
}
