//! Per-vendor policy tables.
//!
//! Every vendor integration is the same engine fed different data: keyword
//! lists, a type priority table, name prefix rules, sample-point layouts,
//! and brand metadata triggers. A [`VendorPolicy`] carries that data and
//! nothing else — no behavior, no per-vendor code paths. Policies are
//! immutable once constructed and passed explicitly to each pipeline
//! stage; there is no process-wide mutable table.
//!
//! Built-in policies for the shipped vendors live in [`crate::vendors`];
//! additional vendors can be supplied as a YAML file and are validated on
//! load the same way the built-ins are validated in tests.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::record::ImageKind;

/// Default neighborhood radius for sample-point averaging, in pixels.
pub const DEFAULT_SAMPLE_RADIUS: u32 = 8;
/// Default stride when walking the averaging neighborhood.
pub const DEFAULT_SAMPLE_STRIDE: u32 = 2;
/// Default accept band: mean brightness below this is treated as shadow.
pub const DEFAULT_MIN_BRIGHTNESS: f64 = 15.0;
/// Default accept band: mean brightness above this is treated as background.
pub const DEFAULT_MAX_BRIGHTNESS: f64 = 240.0;

/// Declarative configuration for one vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorPolicy {
    /// Display brand written into every entry (e.g. `"Scale 75"`).
    pub brand: String,

    /// Entry-id prefix and vendor lookup key (e.g. `"scale75"`).
    pub id_prefix: String,

    /// URL prefix every valid product URL must start with.
    pub url_prefix: String,

    /// Lowercase substrings that mark a listing as a non-paint product
    /// (bundles, tools, merch). Matched against title and URL.
    #[serde(default)]
    pub exclude_keywords: Vec<String>,

    /// Lowercase phrases that force-classify a listing as a paint even
    /// when an exclude keyword also matches (`"dry brush -"` contains
    /// `"brush"`). An override always wins.
    #[serde(default)]
    pub include_overrides: Vec<String>,

    /// If non-empty, a listing is only kept when its SKU starts with one
    /// of these prefixes (uppercase compare). Used by vendors whose feed
    /// mixes paints with unrelated product lines.
    #[serde(default)]
    pub sku_allow_prefixes: Vec<String>,

    /// Ordered type inference table; the first keyword found wins.
    /// Order here is the priority order — never rebuild this from an
    /// unordered map.
    #[serde(default)]
    pub type_priority: Vec<TypeRule>,

    /// Display-name prefixes to strip, ordered most-specific first.
    /// Only the first match is applied.
    #[serde(default)]
    pub name_prefixes: Vec<String>,

    /// Strip a trailing volume marker (`"30 ml"`) from names.
    #[serde(default = "default_true")]
    pub strip_volume_suffix: bool,

    /// Strip a trailing `"- Series N"` pack-size marker from names.
    #[serde(default)]
    pub strip_series_suffix: bool,

    /// Which record field the entry-id slug is derived from.
    #[serde(default)]
    pub id_source: IdSource,

    /// Literal suffixes trimmed from the derived slug (e.g. the `-1`
    /// that storefronts append to re-listed product handles).
    #[serde(default)]
    pub id_strip_suffixes: Vec<String>,

    /// Regex removed from raw SKUs before use (e.g. `_\d+$` variant
    /// suffixes).
    #[serde(default)]
    pub sku_trim: Option<String>,

    /// Regex a well-formed SKU must match; mismatches are advisory.
    #[serde(default)]
    pub sku_pattern: Option<String>,

    /// Sample layout used when an image carries no framing hint.
    pub primary_layout: SampleLayout,

    /// Layout overrides keyed by image framing style.
    #[serde(default)]
    pub kind_layouts: Vec<KindLayout>,

    /// Off-center layout for the secondary color of shifting paints.
    /// Vendors without shifting paints leave this unset.
    #[serde(default)]
    pub secondary_layout: Option<SampleLayout>,

    /// Brand metadata trigger rules.
    #[serde(default)]
    pub brand_rules: BrandRules,

    /// Product ranges this vendor ships.
    pub ranges: Vec<RangePolicy>,
}

impl VendorPolicy {
    /// Looks up a range by key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRange`] if no range has that key.
    pub fn range(&self, key: &str) -> Result<&RangePolicy, ConfigError> {
        self.ranges
            .iter()
            .find(|r| r.key == key)
            .ok_or_else(|| ConfigError::UnknownRange {
                vendor: self.id_prefix.clone(),
                key: key.to_string(),
            })
    }

    /// Returns the sample layout for an image framing style, falling back
    /// to the primary layout when no override is configured.
    #[must_use]
    pub fn layout_for(&self, kind: ImageKind) -> &SampleLayout {
        self.kind_layouts
            .iter()
            .find(|kl| kl.kind == kind)
            .map_or(&self.primary_layout, |kl| &kl.layout)
    }

    /// Classifies a SKU into one of this vendor's ranges by prefix.
    ///
    /// Convenience for collectors whose vendor exposes one mixed feed
    /// (range membership encoded in the SKU); the pipeline itself always
    /// processes one declared range per batch.
    #[must_use]
    pub fn range_for_sku(&self, sku: &str) -> Option<&RangePolicy> {
        let sku = sku.to_uppercase();
        self.ranges.iter().find(|r| {
            r.sku_prefixes
                .iter()
                .any(|prefix| sku.starts_with(prefix.as_str()))
        })
    }
}

/// One product line of a vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangePolicy {
    /// Stable lookup key (e.g. `"chameleon"`).
    pub key: String,

    /// Human-readable range name written into entries.
    pub range: String,

    /// Type assigned when the priority table matches nothing.
    pub default_type: String,

    /// SKU prefixes identifying this range in a mixed vendor feed.
    #[serde(default)]
    pub sku_prefixes: Vec<String>,
}

/// One row of the type priority table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRule {
    /// Lowercase keyword searched in the title and vendor type hint.
    pub keyword: String,
    /// Type tag assigned on match.
    #[serde(rename = "type")]
    pub paint_type: String,
}

impl TypeRule {
    #[must_use]
    pub fn new(keyword: &str, paint_type: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            paint_type: paint_type.to_string(),
        }
    }
}

/// Which record field the entry-id slug is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdSource {
    /// The vendor product identifier / handle.
    #[default]
    Identifier,
    /// The normalized display name.
    Name,
    /// The (cleaned) SKU.
    Sku,
}

/// An ordered set of fractional sample points plus averaging and
/// accept-band parameters, tuned to how a vendor frames product photos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleLayout {
    pub points: Vec<SamplePoint>,

    /// Averaging neighborhood half-width in pixels.
    #[serde(default = "default_radius")]
    pub radius: u32,

    /// Step between sampled pixels inside the neighborhood.
    #[serde(default = "default_stride")]
    pub stride: u32,

    /// Brightness accept band; outside it a point is treated as
    /// background or shadow.
    #[serde(default = "default_min_brightness")]
    pub min_brightness: f64,
    #[serde(default = "default_max_brightness")]
    pub max_brightness: f64,
}

impl SampleLayout {
    /// Layout over the given fractional points with default averaging
    /// (radius 8, stride 2) and accept band (15–240).
    #[must_use]
    pub fn new(points: &[(f64, f64)]) -> Self {
        Self {
            points: points.iter().map(|&(x, y)| SamplePoint { x, y }).collect(),
            radius: DEFAULT_SAMPLE_RADIUS,
            stride: DEFAULT_SAMPLE_STRIDE,
            min_brightness: DEFAULT_MIN_BRIGHTNESS,
            max_brightness: DEFAULT_MAX_BRIGHTNESS,
        }
    }

    /// Overrides the averaging neighborhood.
    #[must_use]
    pub fn with_sampling(mut self, radius: u32, stride: u32) -> Self {
        self.radius = radius;
        self.stride = stride;
        self
    }

    /// Overrides the brightness accept band.
    #[must_use]
    pub fn with_band(mut self, min_brightness: f64, max_brightness: f64) -> Self {
        self.min_brightness = min_brightness;
        self.max_brightness = max_brightness;
        self
    }
}

/// A fractional (x, y) position within an image, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// Layout override for one image framing style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindLayout {
    pub kind: ImageKind,
    pub layout: SampleLayout,
}

/// Brand metadata trigger rules. Rules are independent — several may fire
/// for the same record, and none short-circuits another.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandRules {
    /// Boolean attributes set when a keyword appears in the title, type
    /// hint, or a tag, or when the batch range key matches.
    #[serde(default)]
    pub flags: Vec<FlagRule>,

    /// String attributes lifted from `prefix:value` tags.
    #[serde(default)]
    pub tag_attrs: Vec<TagAttrRule>,

    /// Tag prefix whose remainder names the shift color pair verbatim
    /// (e.g. `"zeni:pink-gold"` → `shiftColors = "pink-gold"`).
    #[serde(default)]
    pub shift_tag_prefix: Option<String>,

    /// Tag prefix for individual color names; the first two collected
    /// are joined into `shiftColors` when no verbatim pair was tagged.
    #[serde(default)]
    pub color_tag_prefix: Option<String>,

    /// Normalized-name lookup for pigment codes; a hit also marks the
    /// paint as single-pigment.
    #[serde(default)]
    pub pigment_codes: Vec<PigmentRule>,

    /// Normalized-name prefixes identifying signature-series artists.
    #[serde(default)]
    pub artist_prefixes: Vec<ArtistRule>,
}

/// Sets a boolean brand attribute when any keyword or range key matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagRule {
    /// camelCase attribute name (e.g. `"colorShift"`).
    pub attr: String,
    /// Lowercase substrings matched against title, type hint, and tags.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Range keys that imply the attribute for every entry in the range.
    #[serde(default)]
    pub range_keys: Vec<String>,
}

/// Lifts `prefix:value` tags into a string attribute, Title-Cased.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAttrRule {
    /// Lowercase tag prefix including the colon (e.g. `"tone:"`).
    pub prefix: String,
    /// camelCase attribute name (e.g. `"recommendedBasecoat"`).
    pub attr: String,
}

/// Maps a normalized paint name to its pigment code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PigmentRule {
    /// Lowercase normalized name (e.g. `"phthalo green"`).
    pub name: String,
    /// Colour Index code (e.g. `"PG36"`).
    pub code: String,
}

/// Maps a normalized-name prefix to a signature artist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRule {
    /// Lowercase name prefix (e.g. `"pisarski"`).
    pub prefix: String,
    /// Full artist name (e.g. `"Michal Pisarski"`).
    pub artist: String,
}

/// Root of an external vendor policy file.
#[derive(Debug, Deserialize)]
pub struct VendorsFile {
    pub vendors: Vec<VendorPolicy>,
}

/// An immutable, validated collection of vendor policies.
#[derive(Debug, Clone)]
pub struct PolicySet {
    vendors: Vec<VendorPolicy>,
}

impl PolicySet {
    /// Builds a policy set from already-constructed policies.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any policy is malformed.
    pub fn new(vendors: Vec<VendorPolicy>) -> Result<Self, ConfigError> {
        validate_vendors(&vendors)?;
        Ok(Self { vendors })
    }

    /// Loads and validates vendor policies from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails
    /// validation.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PolicyFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let file: VendorsFile = serde_yaml::from_str(&content)?;
        Self::new(file.vendors)
    }

    /// Looks up a vendor by its id prefix.
    #[must_use]
    pub fn get(&self, id_prefix: &str) -> Option<&VendorPolicy> {
        self.vendors.iter().find(|v| v.id_prefix == id_prefix)
    }

    /// Looks up a vendor, failing on unknown keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownVendor`] if no vendor has that prefix.
    pub fn require(&self, id_prefix: &str) -> Result<&VendorPolicy, ConfigError> {
        self.get(id_prefix)
            .ok_or_else(|| ConfigError::UnknownVendor(id_prefix.to_string()))
    }

    /// Iterates all vendors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &VendorPolicy> {
        self.vendors.iter()
    }
}

fn validate_vendors(vendors: &[VendorPolicy]) -> Result<(), ConfigError> {
    let mut seen_prefixes = HashSet::new();

    for vendor in vendors {
        if vendor.brand.trim().is_empty() {
            return Err(ConfigError::Validation(
                "vendor brand must be non-empty".to_string(),
            ));
        }
        if vendor.id_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' has an empty id prefix",
                vendor.brand
            )));
        }
        if !seen_prefixes.insert(vendor.id_prefix.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate vendor id prefix: '{}'",
                vendor.id_prefix
            )));
        }
        if vendor.url_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' has an empty url prefix",
                vendor.id_prefix
            )));
        }

        if vendor.ranges.is_empty() {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' declares no ranges",
                vendor.id_prefix
            )));
        }
        let mut seen_ranges = HashSet::new();
        for range in &vendor.ranges {
            if range.key.trim().is_empty() || range.range.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "vendor '{}' has a range with an empty key or name",
                    vendor.id_prefix
                )));
            }
            if !seen_ranges.insert(range.key.clone()) {
                return Err(ConfigError::Validation(format!(
                    "vendor '{}' has duplicate range key '{}'",
                    vendor.id_prefix, range.key
                )));
            }
        }

        validate_layout(&vendor.id_prefix, "primary_layout", &vendor.primary_layout)?;
        for kl in &vendor.kind_layouts {
            validate_layout(&vendor.id_prefix, "kind_layouts", &kl.layout)?;
        }
        if let Some(layout) = &vendor.secondary_layout {
            validate_layout(&vendor.id_prefix, "secondary_layout", layout)?;
        }

        for (field, pattern) in [
            ("sku_trim", vendor.sku_trim.as_deref()),
            ("sku_pattern", vendor.sku_pattern.as_deref()),
        ] {
            if let Some(pattern) = pattern {
                if let Err(e) = regex::Regex::new(pattern) {
                    return Err(ConfigError::Validation(format!(
                        "vendor '{}' has invalid {field} regex: {e}",
                        vendor.id_prefix
                    )));
                }
            }
        }
    }

    Ok(())
}

fn validate_layout(vendor: &str, field: &str, layout: &SampleLayout) -> Result<(), ConfigError> {
    if layout.points.is_empty() {
        return Err(ConfigError::Validation(format!(
            "vendor '{vendor}' {field} has no sample points"
        )));
    }
    for point in &layout.points {
        if !(0.0..=1.0).contains(&point.x) || !(0.0..=1.0).contains(&point.y) {
            return Err(ConfigError::Validation(format!(
                "vendor '{vendor}' {field} point ({}, {}) is outside [0, 1]",
                point.x, point.y
            )));
        }
    }
    if layout.stride == 0 {
        return Err(ConfigError::Validation(format!(
            "vendor '{vendor}' {field} stride must be non-zero"
        )));
    }
    if layout.min_brightness >= layout.max_brightness {
        return Err(ConfigError::Validation(format!(
            "vendor '{vendor}' {field} brightness band is empty ({} >= {})",
            layout.min_brightness, layout.max_brightness
        )));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_radius() -> u32 {
    DEFAULT_SAMPLE_RADIUS
}

fn default_stride() -> u32 {
    DEFAULT_SAMPLE_STRIDE
}

fn default_min_brightness() -> f64 {
    DEFAULT_MIN_BRIGHTNESS
}

fn default_max_brightness() -> f64 {
    DEFAULT_MAX_BRIGHTNESS
}
