//! Structural validation of finished entries.
//!
//! Issues split into two severities. Critical issues (no id, unusable
//! name, off-domain URL) make an entry worthless downstream, so it is
//! dropped. Advisory issues (malformed SKU, malformed hex, unrecognized
//! type) are recorded and the entry kept as-is — an entry without a
//! swatch color is still a catalog entry, and the type vocabulary is
//! expected to grow.

use std::sync::LazyLock;

use regex::Regex;

use paintdb_core::{is_known_type, PaintEntry, VendorPolicy};

use crate::error::CatalogError;

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-F]{6}$").expect("valid hex regex"));

/// One validation finding for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
    MissingId,
    InvalidName,
    InvalidUrl,
    InvalidSku,
    InvalidHex,
    InvalidType,
}

impl Issue {
    /// Critical issues cause the entry to be dropped from the catalog.
    #[must_use]
    pub fn is_critical(self) -> bool {
        matches!(self, Issue::MissingId | Issue::InvalidName | Issue::InvalidUrl)
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Issue::MissingId => "missing id",
            Issue::InvalidName => "invalid name",
            Issue::InvalidUrl => "invalid url",
            Issue::InvalidSku => "invalid sku",
            Issue::InvalidHex => "invalid hex",
            Issue::InvalidType => "invalid type",
        };
        f.write_str(label)
    }
}

/// Per-vendor entry validator with the policy's patterns pre-compiled.
#[derive(Debug)]
pub struct Validator {
    url_prefix: String,
    sku_pattern: Option<Regex>,
}

impl Validator {
    /// Compiles a vendor's validation patterns.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Policy`] if the policy's SKU regex does
    /// not compile.
    pub fn new(policy: &VendorPolicy) -> Result<Self, CatalogError> {
        let sku_pattern = policy
            .sku_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| CatalogError::Policy {
                vendor: policy.id_prefix.clone(),
                reason: format!("invalid sku_pattern regex: {e}"),
            })?;
        Ok(Self {
            url_prefix: policy.url_prefix.clone(),
            sku_pattern,
        })
    }

    /// Checks one entry, returning every issue found (criticals and
    /// advisories alike). An empty list means the entry is clean.
    #[must_use]
    pub fn validate(&self, entry: &PaintEntry) -> Vec<Issue> {
        let mut issues = Vec::new();

        if entry.id.is_empty() {
            issues.push(Issue::MissingId);
        }
        if entry.name.is_empty() || !entry.name.chars().any(char::is_alphabetic) {
            issues.push(Issue::InvalidName);
        }
        if entry.url.is_empty() || !entry.url.starts_with(self.url_prefix.as_str()) {
            issues.push(Issue::InvalidUrl);
        }

        let sku_ok = match &self.sku_pattern {
            Some(pattern) => pattern.is_match(&entry.sku),
            None => !entry.sku.is_empty(),
        };
        if !sku_ok {
            issues.push(Issue::InvalidSku);
        }

        if !entry.hex.is_empty() && !HEX_RE.is_match(&entry.hex) {
            issues.push(Issue::InvalidHex);
        }

        if !is_known_type(&entry.paint_type) {
            issues.push(Issue::InvalidType);
        }

        issues
    }
}

/// Whether an issue list allows the entry into the catalog.
#[must_use]
pub fn passes(issues: &[Issue]) -> bool {
    !issues.iter().any(|issue| issue.is_critical())
}
