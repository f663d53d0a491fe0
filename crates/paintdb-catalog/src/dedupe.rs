//! Collapses entries that refer to the same logical paint.
//!
//! Vendors list the same paint at several pack sizes ("17ml" and "60ml"
//! dropper of the same color); after name normalization those records
//! share a display name and only one should survive.

use std::collections::HashMap;

use paintdb_core::PaintEntry;

/// Result of a dedup pass: surviving entries plus the collapse count.
#[derive(Debug)]
pub struct DedupeOutcome {
    pub entries: Vec<PaintEntry>,
    pub collapsed: usize,
}

/// Collapses duplicates grouped by case-insensitive name.
///
/// Within a group the first-seen entry is kept at its original position.
/// A later duplicate replaces it in place only when it carries a
/// non-empty hex and the kept entry does not; when both already have hex,
/// the first-seen one wins silently. Running the pass on its own output
/// is a no-op.
#[must_use]
pub fn dedupe(entries: Vec<PaintEntry>) -> DedupeOutcome {
    let mut kept: Vec<PaintEntry> = Vec::with_capacity(entries.len());
    let mut index_by_name: HashMap<String, usize> = HashMap::new();
    let mut collapsed = 0usize;

    for entry in entries {
        let key = entry.name.to_lowercase();
        if let Some(&index) = index_by_name.get(&key) {
            collapsed += 1;
            if kept[index].hex.is_empty() && !entry.hex.is_empty() {
                tracing::debug!(
                    name = %entry.name,
                    replacement_id = %entry.id,
                    "duplicate with sampled color replaces colorless entry"
                );
                kept[index] = entry;
            }
        } else {
            index_by_name.insert(key, kept.len());
            kept.push(entry);
        }
    }

    DedupeOutcome {
        entries: kept,
        collapsed,
    }
}
