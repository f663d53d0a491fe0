//! Per-batch counters surfaced to external logging/CLI layers.

use serde::{Deserialize, Serialize};

/// What happened to one batch of records, as counts. The core never
/// renders these; reporting surfaces do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Records received from the collector.
    pub total_records: usize,

    /// Records classified as non-paint products and skipped.
    pub skipped_non_paint: usize,

    /// Entries dropped for a critical validation issue (missing id,
    /// invalid name, invalid URL).
    pub rejected_critical: usize,

    /// Kept entries that ended up with an empty hex (no image, fetch or
    /// decode failure, or sampling disabled).
    pub missing_hex: usize,

    /// Kept entries whose SKU is empty or malformed.
    pub missing_sku: usize,

    /// Entries collapsed into an earlier duplicate of the same name.
    pub duplicates_collapsed: usize,
}

impl BatchReport {
    /// Entries that made it into the final catalog.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.total_records
            .saturating_sub(self.skipped_non_paint)
            .saturating_sub(self.duplicates_collapsed)
            .saturating_sub(self.rejected_critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emitted_subtracts_all_drop_categories() {
        let report = BatchReport {
            total_records: 20,
            skipped_non_paint: 3,
            rejected_critical: 2,
            missing_hex: 5,
            missing_sku: 1,
            duplicates_collapsed: 4,
        };
        assert_eq!(report.emitted(), 11);
    }

    #[test]
    fn emitted_saturates_rather_than_underflows() {
        let report = BatchReport {
            total_records: 1,
            skipped_non_paint: 2,
            ..BatchReport::default()
        };
        assert_eq!(report.emitted(), 0);
    }
}
