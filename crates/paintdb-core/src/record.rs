//! Vendor-neutral input records handed to the core by per-vendor
//! collectors.
//!
//! Collectors own everything site-specific (markup traversal, pagination,
//! URL resolution); by the time a record reaches this layer it is plain
//! data. Records are produced once and consumed once — nothing here
//! mutates them.

use serde::{Deserialize, Serialize};

/// A raw product listing as supplied by a vendor collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProductRecord {
    /// Raw product title as shown on the vendor page. May carry range
    /// prefixes, volume suffixes, and SHOUTING CASE.
    pub title: String,

    /// Vendor product id, unique within the vendor (numeric id or URL
    /// handle depending on the storefront platform).
    pub identifier: String,

    /// Stock-keeping identifier. May be empty or malformed.
    #[serde(default)]
    pub sku: String,

    /// Absolute product URL.
    pub url: String,

    /// Image descriptors in vendor display order, resolvable to pixel
    /// data by the external image fetcher.
    #[serde(default)]
    pub image_refs: Vec<ImageRef>,

    /// Free-text tags (e.g. `"tone:warm"`, `"color:pink"`).
    #[serde(default)]
    pub tags: Vec<String>,

    /// Vendor taxonomy string (e.g. Shopify `product_type`), when the
    /// platform exposes one.
    #[serde(default)]
    pub type_hint: Option<String>,
}

/// A resolvable reference to one product image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    /// Opaque location understood by the image fetcher (usually a URL).
    pub location: String,

    /// How the vendor frames this shot, when the collector can tell.
    /// Drives sample-layout selection; `Unknown` uses the vendor default.
    #[serde(default)]
    pub kind: ImageKind,
}

impl ImageRef {
    /// Convenience constructor for a reference with no framing hint.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            kind: ImageKind::Unknown,
        }
    }

    /// Convenience constructor with an explicit framing hint.
    #[must_use]
    pub fn with_kind(location: impl Into<String>, kind: ImageKind) -> Self {
        Self {
            location: location.into(),
            kind,
        }
    }
}

/// Product-photo framing styles observed across vendors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Flat painted swatch, color centered in frame.
    Swatch,
    /// Bottle/dropper shot, paint visible through the container.
    Bottle,
    /// Side-lit artist-signature composite, bottle off-center.
    Signature,
    #[default]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_ref_defaults_to_unknown_kind() {
        let image = ImageRef::new("https://cdn.example.com/p/1.jpg");
        assert_eq!(image.kind, ImageKind::Unknown);
    }

    #[test]
    fn record_deserializes_with_optional_fields_absent() {
        let record: RawProductRecord = serde_json::from_str(
            r#"{"title":"Abyss Blue","identifier":"1192","url":"https://www.greenstuffworld.com/en/paint.html"}"#,
        )
        .expect("deserialization failed");
        assert!(record.sku.is_empty());
        assert!(record.image_refs.is_empty());
        assert!(record.tags.is_empty());
        assert!(record.type_hint.is_none());
    }

    #[test]
    fn image_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ImageKind::Signature).expect("serialization failed");
        assert_eq!(json, "\"signature\"");
    }
}
