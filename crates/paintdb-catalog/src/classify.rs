//! Classifies raw records as individually sellable paints or not.
//!
//! Matching is deliberately substring-based on raw lowercase text, never
//! whole-word: vendor punctuation is too inconsistent for word boundaries
//! ("6-count", "6 count", "6count" all mean the same bundle).

use paintdb_core::{RawProductRecord, VendorPolicy};

/// Decides whether a record denotes an individually sellable paint.
///
/// Evaluation order:
/// 1. any include-override phrase in the lowercased title keeps the
///    record — an override always wins over exclusion;
/// 2. any exclude keyword in the lowercased title or URL drops it;
/// 3. a configured SKU allowlist, when present, drops records whose SKU
///    matches no allowed prefix;
/// 4. otherwise the record is kept.
#[must_use]
pub fn is_individual_paint(record: &RawProductRecord, policy: &VendorPolicy) -> bool {
    let title = record.title.to_lowercase();

    if policy
        .include_overrides
        .iter()
        .any(|phrase| title.contains(phrase.as_str()))
    {
        return true;
    }

    let url = record.url.to_lowercase();
    if policy
        .exclude_keywords
        .iter()
        .any(|keyword| title.contains(keyword.as_str()) || url.contains(keyword.as_str()))
    {
        return false;
    }

    if !policy.sku_allow_prefixes.is_empty() {
        let sku = record.sku.to_uppercase();
        return policy
            .sku_allow_prefixes
            .iter()
            .any(|prefix| sku.starts_with(prefix.as_str()));
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintdb_core::vendors::{green_stuff_world, kimera};

    fn make_record(title: &str, url: &str, sku: &str) -> RawProductRecord {
        RawProductRecord {
            title: title.to_string(),
            identifier: "1192".to_string(),
            sku: sku.to_string(),
            url: url.to_string(),
            image_refs: vec![],
            tags: vec![],
            type_hint: None,
        }
    }

    #[test]
    fn plain_paint_title_is_kept() {
        let record = make_record(
            "Acrylic Color ABYSS BLUE",
            "https://www.greenstuffworld.com/en/paint.html",
            "8436574502466ES",
        );
        assert!(is_individual_paint(&record, &green_stuff_world()));
    }

    #[test]
    fn exclude_keyword_in_title_drops_record() {
        let record = make_record(
            "Paint Set - Starter Collection",
            "https://www.greenstuffworld.com/en/set.html",
            "",
        );
        assert!(!is_individual_paint(&record, &green_stuff_world()));
    }

    #[test]
    fn exclude_keyword_in_url_drops_record() {
        let record = make_record(
            "Abyss Blue",
            "https://www.greenstuffworld.com/en/starter-kit.html",
            "",
        );
        assert!(!is_individual_paint(&record, &green_stuff_world()));
    }

    #[test]
    fn include_override_beats_exclusion() {
        // "Dry Brush - ..." contains the excluded "brush" but the
        // override phrase marks it as a paint.
        let record = make_record(
            "Dry Brush - ALPHA TURQUOISE 30 ml",
            "https://www.greenstuffworld.com/en/dry-brush.html",
            "",
        );
        assert!(is_individual_paint(&record, &green_stuff_world()));
    }

    #[test]
    fn matching_is_case_insensitive_on_title() {
        let record = make_record(
            "PAINT BUNDLE DELUXE",
            "https://www.greenstuffworld.com/en/x.html",
            "",
        );
        assert!(!is_individual_paint(&record, &green_stuff_world()));
    }

    #[test]
    fn sku_allowlist_keeps_matching_sku() {
        let record = make_record(
            "The Red - Series 1",
            "https://www.elgrecominiatures.co.uk/products/the-red-series-1",
            "KM-PPS1-03",
        );
        assert!(is_individual_paint(&record, &kimera()));
    }

    #[test]
    fn sku_allowlist_drops_foreign_sku() {
        let record = make_record(
            "Some Other Brand Paint",
            "https://www.elgrecominiatures.co.uk/products/other",
            "AK-11001",
        );
        assert!(!is_individual_paint(&record, &kimera()));
    }

    #[test]
    fn sku_allowlist_compare_is_case_insensitive() {
        let record = make_record(
            "The Red - Series 1",
            "https://www.elgrecominiatures.co.uk/products/the-red-series-1",
            "km-pps1-03",
        );
        assert!(is_individual_paint(&record, &kimera()));
    }
}
