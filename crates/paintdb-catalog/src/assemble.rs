//! Final catalog ordering and range partitioning.

use serde::Serialize;

use paintdb_core::PaintEntry;

/// Sorts entries case-insensitively by name. The sort is stable, so
/// entries with identical names keep their pre-sort relative order.
#[must_use]
pub fn assemble(mut entries: Vec<PaintEntry>) -> Vec<PaintEntry> {
    entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    entries
}

/// One output partition: all entries of a range, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct RangeGroup {
    pub range: String,
    pub entries: Vec<PaintEntry>,
}

/// Partitions an ordered entry sequence by declared range, preserving the
/// order of entries within each group and ordering groups by first
/// appearance. No further mutation happens here.
#[must_use]
pub fn partition_by_range(entries: Vec<PaintEntry>) -> Vec<RangeGroup> {
    let mut groups: Vec<RangeGroup> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|g| g.range == entry.range) {
            Some(group) => group.entries.push(entry),
            None => groups.push(RangeGroup {
                range: entry.range.clone(),
                entries: vec![entry],
            }),
        }
    }
    groups
}
