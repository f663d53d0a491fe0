//! The canonical catalog entry and its JSON contract.
//!
//! ## Observed shape of the persisted catalog
//!
//! Entries serialize to a flat JSON object with exactly the fields below.
//! `brandData` and `impcat` are nested objects; a brand attribute that was
//! not detected is an **omitted key**, never `null`. The two `impcat`
//! fields are the opposite: always present and always `null` at this layer
//! (a downstream system fills them in).
//!
//! ## `type`
//!
//! Kept as a validated string rather than a closed enum. The Validator
//! treats an unrecognized tag as an advisory issue, not a rejection, and
//! externally supplied vendor policies may introduce tags before the
//! vocabulary catches up — both of which an enum would make
//! unrepresentable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The closed set of paint type tags known to this catalog layer.
pub const PAINT_TYPES: [&str; 12] = [
    "opaque",
    "metallic",
    "wash",
    "contrast",
    "ink",
    "fluorescent",
    "transparent",
    "primer",
    "varnish",
    "technical",
    "air",
    "medium",
];

/// Returns `true` if `tag` is one of the known paint types.
#[must_use]
pub fn is_known_type(tag: &str) -> bool {
    PAINT_TYPES.contains(&tag)
}

/// A canonical paint entry, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintEntry {
    /// Display brand, fixed per vendor (e.g. `"Green Stuff World"`).
    pub brand: String,

    /// Vendor-specific structured attributes. Empty object when none fired.
    #[serde(rename = "brandData")]
    pub brand_data: BrandData,

    /// Reserved for downstream categorization; always empty at this layer.
    pub category: String,

    /// Always `false` at ingestion; flipped downstream when a paint is
    /// retired from the vendor catalog.
    pub discontinued: bool,

    /// Representative swatch color as `"#RRGGBB"` (uppercase), or `""`
    /// when no color could be sampled.
    pub hex: String,

    /// `"<vendor-prefix>-<slug>"`, unique across a catalog run.
    pub id: String,

    /// Downstream classification placeholder; both fields always null here.
    pub impcat: Impcat,

    /// Normalized display name.
    pub name: String,

    /// Human-readable product line (e.g. `"Chameleon Paints"`).
    pub range: String,

    /// Vendor stock-keeping identifier. May be empty or malformed; the
    /// Validator flags but does not repair it.
    pub sku: String,

    /// Paint type tag; see [`PAINT_TYPES`].
    #[serde(rename = "type")]
    pub paint_type: String,

    /// Absolute product URL on the vendor's own domain.
    pub url: String,
}

/// Open mapping from brand attribute name to value.
///
/// Keys are camelCase (`colorShift`, `uvReactive`, `secondaryHex`,
/// `pigmentCode`, ...). A `BTreeMap` keeps emitted key order stable across
/// runs. Absence means "not applicable" — never store `false`/`null` to
/// mean "not detected".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandData(pub BTreeMap<String, serde_json::Value>);

impl BrandData {
    /// Marks a boolean attribute as present (e.g. `colorShift`).
    pub fn set_flag(&mut self, attr: &str) {
        self.0
            .insert(attr.to_string(), serde_json::Value::Bool(true));
    }

    /// Sets a string-valued attribute (e.g. `tone`, `secondaryHex`).
    pub fn set_text(&mut self, attr: &str, value: impl Into<String>) {
        self.0
            .insert(attr.to_string(), serde_json::Value::String(value.into()));
    }

    /// Returns `true` if the boolean attribute is present and set.
    #[must_use]
    pub fn flag(&self, attr: &str) -> bool {
        matches!(self.0.get(attr), Some(serde_json::Value::Bool(true)))
    }

    /// Returns the string value of an attribute, if present.
    #[must_use]
    pub fn text(&self, attr: &str) -> Option<&str> {
        match self.0.get(attr) {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` when no attribute fired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Downstream layer/shade placeholder. Serialized with both keys present
/// and null — downstream tooling relies on the keys existing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Impcat {
    #[serde(rename = "layerId")]
    pub layer_id: Option<String>,
    #[serde(rename = "shadeId")]
    pub shade_id: Option<String>,
}

/// Generate a URL-safe slug: lowercase, non-alphanumeric runs collapsed
/// to single dashes, no leading/trailing dash.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
