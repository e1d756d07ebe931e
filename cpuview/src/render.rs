//! Virtual cpuinfo rendering
//!
//! Builds the document a container sees: the host blocks for its selected
//! CPUs, renumbered so that the `processor` field runs 0, 1, 2, ... in output
//! order regardless of which host CPUs back them.

use regex::{Captures, Regex};
use std::sync::{Arc, LazyLock};

use crate::catalog::HostCpuCatalog;
use crate::domain::{CpuId, Ordinal};

/// `processor<ws>:<ws><number>` at the start of a line. Group 1 keeps the
/// label and its padding so column alignment survives the rewrite.
static ORDINAL_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(processor[ \t]*:[ \t]*)\d+").expect("ordinal field pattern is valid")
});

/// Renders documents from a shared host catalog
#[derive(Debug, Clone)]
pub struct VirtualCpuInfoRenderer {
    catalog: Arc<HostCpuCatalog>,
}

impl VirtualCpuInfoRenderer {
    #[must_use]
    pub fn new(catalog: Arc<HostCpuCatalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &HostCpuCatalog {
        &self.catalog
    }

    /// Render the document for a selection.
    ///
    /// `ids` is taken in the order given; callers pass the parser's ascending
    /// output. Ids the catalog does not know are skipped without consuming an
    /// ordinal. An empty selection renders every host block unchanged, in
    /// host order.
    #[must_use]
    pub fn render(&self, ids: &[CpuId]) -> String {
        let mut out = String::new();

        if ids.is_empty() {
            for record in self.catalog.records() {
                out.push_str(&record.text);
            }
            return out;
        }

        let blocks = ids.iter().filter_map(|&id| self.catalog.lookup(id));
        for (index, text) in blocks.enumerate() {
            out.push_str(&rewrite_ordinal(text, Ordinal(index)));
        }
        out
    }
}

/// Replace the number in a block's `processor` line with `ordinal`.
#[must_use]
pub fn rewrite_ordinal(text: &str, ordinal: Ordinal) -> String {
    ORDINAL_FIELD
        .replace(text, |caps: &Captures<'_>| format!("{}{ordinal}", &caps[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_catalog(count: u32) -> Arc<HostCpuCatalog> {
        let dump: String = (0..count)
            .map(|i| format!("processor\t: {i}\ncore id\t\t: {}\n\n", i + 100))
            .collect();
        Arc::new(HostCpuCatalog::from_dump(&dump))
    }

    fn ordinals(doc: &str) -> Vec<String> {
        doc.lines()
            .filter(|l| l.starts_with("processor"))
            .map(|l| l.rsplit(' ').next().unwrap_or_default().to_string())
            .collect()
    }

    fn core_ids(doc: &str) -> Vec<String> {
        doc.lines()
            .filter(|l| l.starts_with("core id"))
            .map(|l| l.rsplit(' ').next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_rewrite_ordinal_preserves_alignment() {
        let block = "processor\t: 17\nvendor_id\t: GenuineIntel\n\n";
        assert_eq!(
            rewrite_ordinal(block, Ordinal(0)),
            "processor\t: 0\nvendor_id\t: GenuineIntel\n\n"
        );
    }

    #[test]
    fn test_rewrite_ordinal_space_padded_label() {
        let block = "processor       : 3\nBogoMIPS        : 50.00\n\n";
        assert_eq!(
            rewrite_ordinal(block, Ordinal(12)),
            "processor       : 12\nBogoMIPS        : 50.00\n\n"
        );
    }

    #[test]
    fn test_rewrite_ordinal_without_field() {
        let block = "vendor_id\t: GenuineIntel\n\n";
        assert_eq!(rewrite_ordinal(block, Ordinal(1)), block);
    }

    #[test]
    fn test_render_renumbers_sparse_selection() {
        let renderer = VirtualCpuInfoRenderer::new(synthetic_catalog(4));
        let doc = renderer.render(&[CpuId(1), CpuId(3)]);
        assert_eq!(ordinals(&doc), vec!["0", "1"]);
        assert_eq!(core_ids(&doc), vec!["101", "103"]);
    }

    #[test]
    fn test_render_does_not_resort() {
        let renderer = VirtualCpuInfoRenderer::new(synthetic_catalog(4));
        let doc = renderer.render(&[CpuId(2), CpuId(0)]);
        assert_eq!(ordinals(&doc), vec!["0", "1"]);
        assert_eq!(core_ids(&doc), vec!["102", "100"]);
    }

    #[test]
    fn test_render_skips_unknown_ids() {
        let renderer = VirtualCpuInfoRenderer::new(synthetic_catalog(4));
        let doc = renderer.render(&[CpuId(1), CpuId(99)]);
        assert_eq!(ordinals(&doc), vec!["0"]);
        assert_eq!(core_ids(&doc), vec!["101"]);
    }

    #[test]
    fn test_render_empty_selection_dumps_catalog() {
        let catalog = synthetic_catalog(3);
        let renderer = VirtualCpuInfoRenderer::new(Arc::clone(&catalog));
        let doc = renderer.render(&[]);
        let expected: String = catalog.records().map(|r| r.text.as_str()).collect();
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_render_empty_catalog() {
        let renderer = VirtualCpuInfoRenderer::new(Arc::new(HostCpuCatalog::default()));
        assert!(renderer.render(&[CpuId(0)]).is_empty());
        assert!(renderer.render(&[]).is_empty());
    }
}
