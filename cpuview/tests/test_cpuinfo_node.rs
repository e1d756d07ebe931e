use cpuview::catalog::HostCpuCatalog;
use cpuview::cpuset::{self, CPUSET_CPUS_FILE};
use cpuview::node::{CpuInfoFileNode, VirtualFile};
use cpuview::render::VirtualCpuInfoRenderer;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Four x86-style blocks, distinguishable by their `core id`
fn host_dump() -> String {
    (0..4)
        .map(|i| {
            format!(
                "processor\t: {i}\n\
                 vendor_id\t: GenuineIntel\n\
                 core id\t\t: {}\n\
                 cpu cores\t: 4\n\n",
                10 + i
            )
        })
        .collect()
}

fn catalog() -> Arc<HostCpuCatalog> {
    Arc::new(HostCpuCatalog::from_dump(&host_dump()))
}

fn set_cpus(dir: &Path, cpus: &str) {
    fs::write(dir.join(CPUSET_CPUS_FILE), cpus).expect("Failed to write cpuset.cpus");
}

/// Replace cpuset.cpus in one step so readers never see a partial write
fn swap_cpus(dir: &Path, cpus: &str) {
    let tmp = dir.join("cpuset.cpus.tmp");
    fs::write(&tmp, cpus).expect("Failed to write staging file");
    fs::rename(&tmp, dir.join(CPUSET_CPUS_FILE)).expect("Failed to swap cpuset.cpus");
}

fn blocks(doc: &str) -> Vec<String> {
    doc.split_inclusive("\n\n").map(str::to_string).collect()
}

fn field<'a>(block: &'a str, name: &str) -> Option<&'a str> {
    block
        .lines()
        .find(|l| l.starts_with(name))
        .and_then(|l| l.split(':').nth(1))
        .map(str::trim)
}

#[test]
fn test_sparse_selection_is_renumbered() {
    let dir = tempfile::tempdir().unwrap();
    set_cpus(dir.path(), "1,3\n");
    let node = CpuInfoFileNode::new(dir.path(), catalog());

    let doc = String::from_utf8(node.read_all()).expect("Invalid UTF-8");
    let blocks = blocks(&doc);

    assert_eq!(blocks.len(), 2);
    assert_eq!(field(&blocks[0], "processor"), Some("0"));
    assert_eq!(field(&blocks[0], "core id"), Some("11"));
    assert_eq!(field(&blocks[1], "processor"), Some("1"));
    assert_eq!(field(&blocks[1], "core id"), Some("13"));
}

#[test]
fn test_unknown_cpu_is_omitted() {
    let dir = tempfile::tempdir().unwrap();
    set_cpus(dir.path(), "1,99\n");
    let node = CpuInfoFileNode::new(dir.path(), catalog());

    let doc = String::from_utf8(node.read_all()).unwrap();
    let blocks = blocks(&doc);

    assert_eq!(blocks.len(), 1);
    assert_eq!(field(&blocks[0], "processor"), Some("0"));
    assert_eq!(field(&blocks[0], "core id"), Some("11"));
}

#[test]
fn test_read_all_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    set_cpus(dir.path(), "0-2\n");
    let node = CpuInfoFileNode::new(dir.path(), catalog());

    assert_eq!(node.read_all(), node.read_all());
}

#[test]
fn test_fallback_emits_every_record() {
    let catalog = catalog();
    let expected: HashSet<String> = catalog.records().map(|r| r.text.clone()).collect();

    // Missing file
    let missing = tempfile::tempdir().unwrap();
    let node = CpuInfoFileNode::new(missing.path(), Arc::clone(&catalog));
    let doc = String::from_utf8(node.read_all()).unwrap();
    let emitted = blocks(&doc);
    assert_eq!(emitted.len(), catalog.len());
    assert_eq!(emitted.into_iter().collect::<HashSet<_>>(), expected);

    // Empty file
    let empty = tempfile::tempdir().unwrap();
    set_cpus(empty.path(), "\n");
    let node = CpuInfoFileNode::new(empty.path(), Arc::clone(&catalog));
    let doc = String::from_utf8(node.read_all()).unwrap();
    let emitted = blocks(&doc);
    assert_eq!(emitted.len(), catalog.len());
    assert_eq!(emitted.into_iter().collect::<HashSet<_>>(), expected);
}

#[test]
fn test_real_host_catalog_round_trip() {
    // This test relies on /proc/cpuinfo being available (Linux only)
    let catalog = Arc::new(HostCpuCatalog::build("/proc/cpuinfo"));
    if catalog.is_empty() {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    set_cpus(dir.path(), "0\n");
    let node = CpuInfoFileNode::new(dir.path(), Arc::clone(&catalog));
    let doc = String::from_utf8(node.read_all()).unwrap();

    assert_eq!(blocks(&doc).len(), 1);
    assert_eq!(node.attr().size, doc.len() as u64);
}

#[test]
fn test_concurrent_reads_see_whole_snapshots() {
    const SNAPSHOTS: [&str; 5] = ["0-1\n", "2-3\n", "1,3\n", "0-3\n", "\n"];
    const READERS: usize = 8;
    const READS_PER_READER: usize = 200;

    let catalog = catalog();
    let renderer = VirtualCpuInfoRenderer::new(Arc::clone(&catalog));
    let valid: HashSet<Vec<u8>> = SNAPSHOTS
        .iter()
        .map(|cpus| renderer.render(cpuset::parse(cpus).ids()).into_bytes())
        .collect();

    let dir = tempfile::tempdir().unwrap();
    set_cpus(dir.path(), SNAPSHOTS[0]);
    let node = CpuInfoFileNode::new(dir.path(), catalog);
    let done = AtomicBool::new(false);
    let (node, valid) = (&node, &valid);

    std::thread::scope(|s| {
        s.spawn(|| {
            for cpus in SNAPSHOTS.iter().cycle() {
                if done.load(Ordering::Relaxed) {
                    break;
                }
                swap_cpus(dir.path(), cpus);
            }
        });

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                s.spawn(move || {
                    for _ in 0..READS_PER_READER {
                        let doc = node.read_all();
                        assert!(
                            valid.contains(&doc),
                            "Read returned a document matching no snapshot:\n{}",
                            String::from_utf8_lossy(&doc)
                        );
                    }
                })
            })
            .collect();

        let results: Vec<_> = readers.into_iter().map(|reader| reader.join()).collect();
        done.store(true, Ordering::Relaxed);
        for result in results {
            result.expect("Reader thread panicked");
        }
    });
}
