//! Whole-catalog audit: issue tallies and cross-entry duplicate
//! detection. Reporting only — an audit never mutates or filters the
//! catalog it inspects.

use std::collections::{BTreeMap, HashMap};

use paintdb_core::PaintEntry;

use crate::validate::{passes, Validator};

/// Aggregate findings for one finished catalog.
#[derive(Debug, Default)]
pub struct CatalogAudit {
    pub total: usize,
    /// Entries with no issues at all.
    pub clean: usize,
    /// Entry count per issue label.
    pub issue_counts: BTreeMap<String, usize>,
    /// Ids appearing more than once (the id invariant forbids this).
    pub duplicate_ids: Vec<String>,
    /// Non-empty SKUs appearing more than once.
    pub duplicate_skus: Vec<String>,
    pub missing_hex: usize,
}

/// Audits a finished entry sequence against a vendor's validator.
#[must_use]
pub fn audit_catalog(entries: &[PaintEntry], validator: &Validator) -> CatalogAudit {
    let mut audit = CatalogAudit {
        total: entries.len(),
        ..CatalogAudit::default()
    };

    let mut id_seen: HashMap<&str, usize> = HashMap::new();
    let mut sku_seen: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        *id_seen.entry(entry.id.as_str()).or_insert(0) += 1;
        if !entry.sku.is_empty() {
            *sku_seen.entry(entry.sku.as_str()).or_insert(0) += 1;
        }
        if entry.hex.is_empty() {
            audit.missing_hex += 1;
        }

        let issues = validator.validate(entry);
        if issues.is_empty() {
            audit.clean += 1;
        }
        if !passes(&issues) {
            tracing::warn!(id = %entry.id, name = %entry.name, "audited entry has critical issues");
        }
        for issue in issues {
            *audit.issue_counts.entry(issue.to_string()).or_insert(0) += 1;
        }
    }

    audit.duplicate_ids = id_seen
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(id, _)| id.to_string())
        .collect();
    audit.duplicate_ids.sort_unstable();

    audit.duplicate_skus = sku_seen
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(sku, _)| sku.to_string())
        .collect();
    audit.duplicate_skus.sort_unstable();

    audit
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintdb_core::vendors::green_stuff_world;
    use paintdb_core::{BrandData, Impcat};

    fn make_entry(id: &str, name: &str, sku: &str, hex: &str) -> PaintEntry {
        PaintEntry {
            brand: "Green Stuff World".to_string(),
            brand_data: BrandData::default(),
            category: String::new(),
            discontinued: false,
            hex: hex.to_string(),
            id: id.to_string(),
            impcat: Impcat::default(),
            name: name.to_string(),
            range: "Acrylic Paints".to_string(),
            sku: sku.to_string(),
            paint_type: "opaque".to_string(),
            url: "https://www.greenstuffworld.com/en/x.html".to_string(),
        }
    }

    fn validator() -> Validator {
        Validator::new(&green_stuff_world()).expect("valid policy")
    }

    #[test]
    fn clean_catalog_audits_clean() {
        let entries = vec![
            make_entry("gsw-1", "Abyss Blue", "8436574502466ES", "#112233"),
            make_entry("gsw-2", "Fire Dip", "8436574502467ES", "#445566"),
        ];
        let audit = audit_catalog(&entries, &validator());
        assert_eq!(audit.total, 2);
        assert_eq!(audit.clean, 2);
        assert!(audit.issue_counts.is_empty());
        assert!(audit.duplicate_ids.is_empty());
        assert!(audit.duplicate_skus.is_empty());
        assert_eq!(audit.missing_hex, 0);
    }

    #[test]
    fn duplicate_ids_are_detected() {
        let entries = vec![
            make_entry("gsw-1", "Abyss Blue", "8436574502466ES", "#112233"),
            make_entry("gsw-1", "Abyss Blue Mk2", "8436574502467ES", "#112234"),
        ];
        let audit = audit_catalog(&entries, &validator());
        assert_eq!(audit.duplicate_ids, ["gsw-1"]);
    }

    #[test]
    fn duplicate_skus_are_detected_but_empty_skus_are_not() {
        let entries = vec![
            make_entry("gsw-1", "Abyss Blue", "8436574502466ES", "#112233"),
            make_entry("gsw-2", "Abyss Green", "8436574502466ES", "#112233"),
            make_entry("gsw-3", "Abyss Red", "", "#112233"),
            make_entry("gsw-4", "Abyss Teal", "", "#112233"),
        ];
        let audit = audit_catalog(&entries, &validator());
        assert_eq!(audit.duplicate_skus, ["8436574502466ES"]);
    }

    #[test]
    fn issue_counts_tally_by_label() {
        let entries = vec![
            make_entry("gsw-1", "Abyss Blue", "bad-sku", ""),
            make_entry("gsw-2", "Fire Dip", "also-bad", "#112233"),
        ];
        let audit = audit_catalog(&entries, &validator());
        assert_eq!(audit.issue_counts.get("invalid sku"), Some(&2));
        assert_eq!(audit.clean, 0);
        assert_eq!(audit.missing_hex, 1);
    }
}
