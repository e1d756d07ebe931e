//! # cpuview - cpuset-aware `/proc/cpuinfo`
//!
//! A process confined to a few CPUs by a cgroup cpuset still sees every host
//! CPU in `/proc/cpuinfo`, so tools that size thread pools from it oversubscribe.
//! cpuview produces the document such a process should see instead: only the
//! CPUs its cpuset grants, renumbered from zero.
//!
//! ## Architecture Overview
//!
//! ```text
//!   process start                      every read / attr request
//! ┌────────────────┐      ┌──────────────────────────────────────────────┐
//! │ /proc/cpuinfo  │      │ <cgroup>/cpuset.cpus ──▶ cpuset::parse       │
//! └───────┬────────┘      │                               │              │
//!         ▼               │                               ▼              │
//! ┌────────────────┐ Arc  │  ┌──────────────┐     ┌──────────────────┐   │
//! │ HostCpuCatalog │─────▶│  │ CpuInfoFile  │────▶│ VirtualCpuInfo   │   │
//! │  (immutable)   │      │  │    Node      │◀────│    Renderer      │   │
//! └────────────────┘      │  └──────┬───────┘     └──────────────────┘   │
//!                         └─────────┼────────────────────────────────────┘
//!                                   ▼
//!                         hosting filesystem layer (VirtualFile)
//! ```
//!
//! ## Module Structure
//!
//! - [`catalog`]: one-time split of the host dump into per-CPU blocks
//! - [`cpuset`]: `cpuset.cpus` list parsing and per-read loading
//! - [`render`]: filtering and `processor` field renumbering
//! - [`node`]: the [`node::VirtualFile`] seam and the cpuinfo node
//! - [`registry`]: virtual files known to the hosting layer
//! - [`cgroup`]: resolving a process's cpuset cgroup directory
//! - [`preflight`], [`cli`]: support for the `cpuview` binary
//! - [`domain`]: newtypes and errors
//!
//! ## Failure Model
//!
//! Reads never fail. An unreadable host dump leaves the catalog empty and
//! every read returns zero bytes; an unreadable or empty cpuset shows every
//! host CPU unchanged; CPUs the host never reported are left out.

pub mod catalog;
pub mod cgroup;
pub mod cli;
pub mod cpuset;
pub mod domain;
pub mod node;
pub mod preflight;
pub mod registry;
pub mod render;
