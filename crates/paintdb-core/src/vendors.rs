//! Built-in vendor policies.
//!
//! Four vendors ship with the engine. Each function below is pure data:
//! the keyword tables, prefix lists, and sample layouts that describe one
//! storefront. Adding a vendor means adding data here (or supplying a
//! YAML file) — never adding code paths to the pipeline.

use crate::policy::{
    ArtistRule, BrandRules, FlagRule, IdSource, KindLayout, PigmentRule, PolicySet, RangePolicy,
    SampleLayout, TagAttrRule, TypeRule, VendorPolicy,
};
use crate::record::ImageKind;

/// Brightness band for secondary (shift) color acceptance. Tighter than
/// the primary band: edge samples sit close to background and shadow.
pub const SECONDARY_MIN_BRIGHTNESS: f64 = 20.0;
/// See [`SECONDARY_MIN_BRIGHTNESS`].
pub const SECONDARY_MAX_BRIGHTNESS: f64 = 235.0;

impl PolicySet {
    /// The four built-in vendors.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![green_stuff_world(), turbodork(), scale75(), kimera()])
            .expect("built-in vendor policies are valid")
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn range(key: &str, name: &str, default_type: &str) -> RangePolicy {
    RangePolicy {
        key: key.to_string(),
        range: name.to_string(),
        default_type: default_type.to_string(),
        sku_prefixes: vec![],
    }
}

/// Green Stuff World: PrestaShop storefront, numeric product ids,
/// EAN-13 SKUs, heavily prefixed display names.
#[must_use]
pub fn green_stuff_world() -> VendorPolicy {
    VendorPolicy {
        brand: "Green Stuff World".to_string(),
        id_prefix: "gsw".to_string(),
        url_prefix: "https://www.greenstuffworld.com/".to_string(),
        exclude_keywords: strings(&[
            "bundle",
            " set",
            "case",
            "collection",
            "kit",
            "pack",
            "combo",
            "palette",
            "tool",
            "cup",
            "handle",
            "mixing ball",
            "display",
            "rack",
            "holder",
            "organizer",
            "texture paste",
            "putty",
            "sculpt",
            "empty pot",
            "empty dropper",
            "empty bottle",
            "stir stick",
            "mixing stick",
            "paint brush",
            "synthetic brush",
            "kolinsky",
        ]),
        // "Dry Brush - ..." would otherwise trip the "brush" exclusions.
        include_overrides: strings(&["dry brush paint", "dry brush -", "crackle paint"]),
        sku_allow_prefixes: vec![],
        type_priority: vec![
            TypeRule::new("metallic", "metallic"),
            TypeRule::new("metal", "metallic"),
            TypeRule::new("chrome", "metallic"),
            TypeRule::new("gold", "metallic"),
            TypeRule::new("silver", "metallic"),
            TypeRule::new("copper", "metallic"),
            TypeRule::new("bronze", "metallic"),
            TypeRule::new("wash", "wash"),
            TypeRule::new("shade", "wash"),
            TypeRule::new("dipping ink", "contrast"),
            TypeRule::new("contrast", "contrast"),
            TypeRule::new("ink", "ink"),
            TypeRule::new("tinta", "ink"),
            TypeRule::new("fluor", "fluorescent"),
            TypeRule::new("fluorescent", "fluorescent"),
            TypeRule::new("neon", "fluorescent"),
            TypeRule::new("uv reactive", "fluorescent"),
            TypeRule::new("candy", "transparent"),
            TypeRule::new("transparent", "transparent"),
            TypeRule::new("clear", "transparent"),
            TypeRule::new("primer", "primer"),
            TypeRule::new("surface primer", "primer"),
            TypeRule::new("varnish", "varnish"),
            TypeRule::new("barniz", "varnish"),
            TypeRule::new("effect", "technical"),
            TypeRule::new("crackle", "technical"),
            TypeRule::new("texture", "technical"),
            TypeRule::new("blood", "technical"),
            TypeRule::new("slime", "technical"),
            TypeRule::new("rust", "technical"),
        ],
        // Ordered most-specific first; only the first match is stripped.
        name_prefixes: strings(&[
            "Acrylic Color ",
            "Acrylic Ink Opaque- ",
            "Acrylic Ink Opaque - ",
            "Transparent Acrylic Ink - ",
            "Metallic Dry Brush - ",
            "Metallic Paint ",
            "Chameleon Paint ",
            "Chrome Paint - ",
            "Fluor Acrylic Ink - ",
            "Fluor Paint ",
            "Dipping ink 60 ml - ",
            "Dipping ink 17 ml - ",
            "Candy Ink ",
            "Intensity Ink ",
            "Wash Ink ",
            "Opaque Colors - ",
            "Dry Brush - ",
            "Crackle Paint - ",
            "Metal Filters - ",
            "Liquid Pigments ",
            "Blood effect - ",
            "Acrylic white paint ",
        ]),
        strip_volume_suffix: true,
        strip_series_suffix: false,
        id_source: IdSource::Identifier,
        id_strip_suffixes: vec![],
        sku_trim: None,
        // EAN-13 barcode, optionally followed by a locale suffix like "ES".
        sku_pattern: Some(r"^\d{13}[A-Z]{0,2}$".to_string()),
        primary_layout: SampleLayout::new(&[
            (0.5, 0.4),
            (0.5, 0.5),
            (0.5, 0.6),
            (0.3, 0.5),
            (0.4, 0.5),
            (0.6, 0.5),
            (0.7, 0.5),
            (0.5, 0.3),
        ]),
        kind_layouts: vec![],
        secondary_layout: Some(
            SampleLayout::new(&[(0.2, 0.3), (0.8, 0.7), (0.2, 0.7), (0.8, 0.3)])
                .with_sampling(5, 2)
                .with_band(SECONDARY_MIN_BRIGHTNESS, SECONDARY_MAX_BRIGHTNESS),
        ),
        brand_rules: BrandRules {
            flags: vec![
                FlagRule {
                    attr: "colorShift".to_string(),
                    keywords: strings(&["chameleon", "colorshift"]),
                    range_keys: strings(&["chameleon"]),
                },
                FlagRule {
                    attr: "uvReactive".to_string(),
                    keywords: strings(&["fluor", "uv", "neon"]),
                    range_keys: strings(&["fluor"]),
                },
                FlagRule {
                    attr: "transparent".to_string(),
                    keywords: strings(&["candy", "transparent"]),
                    range_keys: vec![],
                },
                FlagRule {
                    attr: "glowInDark".to_string(),
                    keywords: strings(&["glow"]),
                    range_keys: vec![],
                },
            ],
            ..BrandRules::default()
        },
        ranges: vec![
            range("acrylic", "Acrylic Paints", "opaque"),
            range("military", "Military Paints", "opaque"),
            range("metallic", "Metallic Paints", "metallic"),
            range("chameleon", "Chameleon Paints", "metallic"),
            range("chrome", "Chrome Paints", "metallic"),
            range("fluor", "Fluorescent Paints", "fluorescent"),
            range("dipping_ink", "Dipping Inks", "contrast"),
            range("acrylic_ink", "Acrylic Inks", "ink"),
            range("dry_brush", "Dry Brush Paints", "opaque"),
            range("opaque", "Opaque Colors", "opaque"),
            range("effect", "Effect Paints", "technical"),
            range("crackle", "Crackle Paint", "technical"),
            range("airbrush", "Airbrush Paint", "air"),
        ],
    }
}

/// Turbodork: Shopify storefront, URL-handle identifiers, tag-driven
/// shift metadata, photographed swatch cards.
#[must_use]
pub fn turbodork() -> VendorPolicy {
    VendorPolicy {
        brand: "Turbodork".to_string(),
        id_prefix: "turbodork".to_string(),
        url_prefix: "https://turbodork.com/".to_string(),
        exclude_keywords: strings(&[
            "bundle",
            "set",
            "case",
            "full case",
            "collection",
            "kit",
            "pack",
            "brush",
            "palette",
            "tool",
            "cup",
            "handle",
            "stick",
            "mixing",
            "gift card",
            "hat",
            "sticker",
            "merchandise",
            "6 count",
            "12 count",
            "24 count",
        ]),
        include_overrides: vec![],
        sku_allow_prefixes: vec![],
        type_priority: vec![
            TypeRule::new("turboshift", "metallic"),
            TypeRule::new("zenishift", "metallic"),
            TypeRule::new("metallic", "metallic"),
            TypeRule::new("medium", "technical"),
        ],
        name_prefixes: vec![],
        strip_volume_suffix: true,
        strip_series_suffix: false,
        id_source: IdSource::Identifier,
        // Shopify appends "-1" to handles of re-listed products.
        id_strip_suffixes: strings(&["-1"]),
        // Variant suffixes like "TDK015014_1".
        sku_trim: Some(r"_\d+$".to_string()),
        sku_pattern: None,
        primary_layout: SampleLayout::new(&[
            (0.5, 0.5),
            (0.4, 0.5),
            (0.6, 0.5),
            (0.5, 0.4),
            (0.5, 0.6),
        ])
        .with_sampling(10, 3),
        kind_layouts: vec![KindLayout {
            kind: ImageKind::Bottle,
            layout: SampleLayout::new(&[(0.5, 0.3), (0.4, 0.35), (0.6, 0.35), (0.5, 0.25)])
                .with_sampling(10, 3),
        }],
        secondary_layout: Some(
            SampleLayout::new(&[(0.2, 0.2), (0.8, 0.8), (0.2, 0.8), (0.8, 0.2)])
                .with_sampling(5, 2)
                .with_band(SECONDARY_MIN_BRIGHTNESS, SECONDARY_MAX_BRIGHTNESS),
        ),
        brand_rules: BrandRules {
            flags: vec![FlagRule {
                attr: "colorShift".to_string(),
                keywords: strings(&["turboshift", "zenishift", "shift"]),
                range_keys: strings(&["turboshift", "zenishift"]),
            }],
            tag_attrs: vec![
                TagAttrRule {
                    prefix: "tone:".to_string(),
                    attr: "tone".to_string(),
                },
                TagAttrRule {
                    prefix: "primer:".to_string(),
                    attr: "recommendedBasecoat".to_string(),
                },
            ],
            shift_tag_prefix: Some("zeni:".to_string()),
            color_tag_prefix: Some("color:".to_string()),
            ..BrandRules::default()
        },
        ranges: vec![
            range("turboshift", "Turboshift", "metallic"),
            range("metallic", "Metallic", "metallic"),
            range("zenishift", "ZeniShift", "metallic"),
            range("mediums", "Mediums", "technical"),
        ],
    }
}

/// Scale 75: Shopify storefront, SKU-derived ids, ALL-CAPS names,
/// horizontal paint-stripe swatch photos.
#[must_use]
pub fn scale75() -> VendorPolicy {
    VendorPolicy {
        brand: "Scale 75".to_string(),
        id_prefix: "scale75".to_string(),
        url_prefix: "https://scale75.com/".to_string(),
        exclude_keywords: vec![],
        include_overrides: vec![],
        sku_allow_prefixes: vec![],
        type_priority: vec![
            TypeRule::new("metallic", "metallic"),
            TypeRule::new("metal", "metallic"),
            TypeRule::new("gold", "metallic"),
            TypeRule::new("silver", "metallic"),
            TypeRule::new("copper", "metallic"),
            TypeRule::new("bronze", "metallic"),
            TypeRule::new("brass", "metallic"),
            TypeRule::new("alchemy", "metallic"),
            TypeRule::new("chrome", "metallic"),
            TypeRule::new("ink", "ink"),
            TypeRule::new("wash", "wash"),
            TypeRule::new("primer", "primer"),
            TypeRule::new("varnish", "varnish"),
            TypeRule::new("glaze", "transparent"),
        ],
        name_prefixes: vec![],
        strip_volume_suffix: true,
        strip_series_suffix: false,
        id_source: IdSource::Sku,
        id_strip_suffixes: vec![],
        sku_trim: None,
        sku_pattern: None,
        // The paint color is a horizontal stripe across the middle of the
        // swatch photo; walk it at y=0.5.
        primary_layout: SampleLayout::new(&[
            (0.35, 0.50),
            (0.40, 0.50),
            (0.45, 0.50),
            (0.50, 0.50),
            (0.55, 0.50),
            (0.60, 0.50),
            (0.65, 0.50),
            (0.50, 0.48),
            (0.50, 0.52),
        ])
        .with_band(10.0, 245.0),
        kind_layouts: vec![KindLayout {
            kind: ImageKind::Bottle,
            layout: SampleLayout::new(&[
                (0.40, 0.40),
                (0.45, 0.40),
                (0.50, 0.40),
                (0.55, 0.40),
                (0.60, 0.40),
                (0.50, 0.35),
                (0.50, 0.45),
                (0.45, 0.38),
                (0.55, 0.42),
            ])
            .with_band(10.0, 245.0),
        }],
        secondary_layout: None,
        brand_rules: BrandRules::default(),
        ranges: vec![
            range("scalecolor", "Scale Color", "opaque"),
            range("fantasy-games", "Fantasy & Games", "opaque"),
            range("metal-n-alchemy", "Metal n' Alchemy", "metallic"),
            range("instant-colors", "Instant Colors", "contrast"),
            range("artist", "Scalecolor Artist", "opaque"),
            range("inktensity", "Inktensity", "ink"),
            range("fx-fluor", "FX Fluor", "opaque"),
            range("warfront", "Warfront", "opaque"),
            range("drop-paint", "Drop & Paint", "opaque"),
            range("flow", "Flow", "opaque"),
            range("scalecolor-games", "Scalecolor Games", "opaque"),
        ],
    }
}

/// Kimera Kolors (sold through El Greco Miniatures): single mixed feed
/// split into ranges by SKU prefix, pigment-coded artist paints.
#[must_use]
pub fn kimera() -> VendorPolicy {
    VendorPolicy {
        brand: "Kimera".to_string(),
        id_prefix: "kimera".to_string(),
        url_prefix: "https://www.elgrecominiatures.co.uk/".to_string(),
        exclude_keywords: strings(&[
            "set",
            "palette",
            "blend",
            "velvet inks",
            "signature blend",
            "masclans",
            "richiero",
        ]),
        include_overrides: vec![],
        // The El Greco feed mixes Kimera with other brands; only these
        // SKU families are individual Kimera paints.
        sku_allow_prefixes: strings(&["KM-PPS1", "KMP-", "KM-SS"]),
        type_priority: vec![TypeRule::new("satin medium", "medium")],
        name_prefixes: vec![],
        strip_volume_suffix: false,
        strip_series_suffix: true,
        id_source: IdSource::Name,
        id_strip_suffixes: vec![],
        sku_trim: None,
        sku_pattern: None,
        primary_layout: SampleLayout::new(&[
            (0.50, 0.35),
            (0.45, 0.35),
            (0.55, 0.35),
            (0.50, 0.40),
            (0.50, 0.30),
            (0.50, 0.45),
        ])
        .with_band(10.0, 245.0),
        kind_layouts: vec![
            KindLayout {
                kind: ImageKind::Swatch,
                layout: SampleLayout::new(&[
                    (0.5, 0.5),
                    (0.4, 0.5),
                    (0.6, 0.5),
                    (0.5, 0.4),
                    (0.5, 0.6),
                ])
                .with_band(10.0, 245.0),
            },
            KindLayout {
                kind: ImageKind::Signature,
                // Bottle sits left of a dark backdrop; exact position
                // varies by artist, so cover the left third broadly.
                layout: SampleLayout::new(&[
                    (0.30, 0.35),
                    (0.30, 0.40),
                    (0.20, 0.45),
                    (0.25, 0.45),
                    (0.20, 0.50),
                    (0.25, 0.50),
                    (0.15, 0.45),
                    (0.30, 0.45),
                ])
                .with_band(10.0, 245.0),
            },
        ],
        secondary_layout: None,
        brand_rules: BrandRules {
            pigment_codes: vec![
                PigmentRule::new("the white", "PW6"),
                PigmentRule::new("carbon black", "PBk7"),
                PigmentRule::new("the red", "PR254"),
                PigmentRule::new("orange", "PO73"),
                PigmentRule::new("warm yellow", "PY83"),
                PigmentRule::new("cold yellow", "PY175"),
                PigmentRule::new("phthalo blue (red shade)", "PB15:1"),
                PigmentRule::new("phthalo blue (green shade)", "PB15:3"),
                PigmentRule::new("magenta", "PR122"),
                PigmentRule::new("phthalo green", "PG36"),
                PigmentRule::new("violet", "PV23"),
                PigmentRule::new("yellow oxide", "PY42"),
                PigmentRule::new("red oxide", "PR101"),
                PigmentRule::new("oxide brown dark", "PBr7"),
                PigmentRule::new("oxide brown medium", "PBr7"),
                PigmentRule::new("oxide brown light", "PY42"),
                PigmentRule::new("dark ochre", "PY43"),
                PigmentRule::new("mars orange", "PR101"),
                PigmentRule::new("honeymoon yellow", "PY42"),
                PigmentRule::new("diarylide yellow", "PY170"),
                PigmentRule::new("alizarine crimson", "PR177"),
                PigmentRule::new("royal brown", "PBr7"),
                PigmentRule::new("ultramarine blue", "PB29"),
                PigmentRule::new("toludine red", "PR3"),
                PigmentRule::new("purple", "PV23"),
                PigmentRule::new("oxide green", "PG17"),
                PigmentRule::new("cobalt bluegreen", "PB36"),
            ],
            artist_prefixes: vec![
                ArtistRule::new("pisarski", "Michal Pisarski"),
                ArtistRule::new("cartacci", "Danilo Cartacci"),
                ArtistRule::new("karlsson", "Robert Karlsson"),
                ArtistRule::new("russo", "Fabrizio Russo"),
            ],
            ..BrandRules::default()
        },
        ranges: vec![
            RangePolicy {
                key: "pure-pigments".to_string(),
                range: "Pure Pigments".to_string(),
                default_type: "opaque".to_string(),
                sku_prefixes: strings(&["KM-PPS1", "KMP-"]),
            },
            RangePolicy {
                key: "signatures".to_string(),
                range: "Signatures".to_string(),
                default_type: "opaque".to_string(),
                sku_prefixes: strings(&["KM-SSMP", "KM-SSDC", "KM-SSRK", "KM-SSFR"]),
            },
        ],
    }
}

impl PigmentRule {
    #[must_use]
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
        }
    }
}

impl ArtistRule {
    #[must_use]
    pub fn new(prefix: &str, artist: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            artist: artist.to_string(),
        }
    }
}
