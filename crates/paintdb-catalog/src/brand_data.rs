//! Vendor-specific brand metadata extraction.
//!
//! Trigger rules are independent: each sets at most one attribute, none
//! short-circuits another, and several may fire for one record. The
//! attribute is simply absent when nothing fires — downstream consumers
//! read absence as "not applicable", never as `false`.

use paintdb_core::{BrandData, BrandRules, RawProductRecord};

use crate::name::title_case;
use crate::sampler::{brightness, hex_string, Rgb};

/// Secondary colors whose mean brightness falls outside this open band
/// are edge artifacts (background or shadow), not the paint's second
/// tone, and are suppressed.
pub const SECONDARY_HEX_MIN_BRIGHTNESS: f64 = 20.0;
/// See [`SECONDARY_HEX_MIN_BRIGHTNESS`].
pub const SECONDARY_HEX_MAX_BRIGHTNESS: f64 = 235.0;

/// Applies a vendor's trigger rules to one record.
///
/// `range_key` is the batch's range; `normalized_name` is the output of
/// name normalization (pigment and artist lookups key on it, while flag
/// keywords match the raw title, type hint, and tags).
#[must_use]
pub fn extract_brand_data(
    record: &RawProductRecord,
    range_key: &str,
    normalized_name: &str,
    rules: &BrandRules,
) -> BrandData {
    let mut data = BrandData::default();

    let title = record.title.to_lowercase();
    let hint = record.type_hint.as_deref().map(str::to_lowercase);
    let tags: Vec<String> = record.tags.iter().map(|t| t.to_lowercase()).collect();

    for rule in &rules.flags {
        let keyword_hit = rule.keywords.iter().any(|kw| {
            title.contains(kw.as_str())
                || hint.as_deref().is_some_and(|h| h.contains(kw.as_str()))
                || tags.iter().any(|tag| tag.contains(kw.as_str()))
        });
        let range_hit = rule.range_keys.iter().any(|key| key == range_key);
        if keyword_hit || range_hit {
            data.set_flag(&rule.attr);
        }
    }

    for rule in &rules.tag_attrs {
        if let Some(value) = tags
            .iter()
            .find_map(|tag| tag.strip_prefix(rule.prefix.as_str()))
        {
            data.set_text(&rule.attr, title_case(value));
        }
    }

    if data.flag("colorShift") {
        let shift_pair = rules.shift_tag_prefix.as_deref().and_then(|prefix| {
            tags.iter()
                .find_map(|tag| tag.strip_prefix(prefix))
                .map(str::to_string)
        });
        if let Some(pair) = shift_pair {
            data.set_text("shiftColors", pair);
        } else if let Some(prefix) = rules.color_tag_prefix.as_deref() {
            let colors: Vec<&str> = tags
                .iter()
                .filter_map(|tag| tag.strip_prefix(prefix))
                .collect();
            if colors.len() >= 2 {
                data.set_text("shiftColors", colors[..2].join("-"));
            }
        }
    }

    let name_key = normalized_name.to_lowercase();
    if let Some(rule) = rules.pigment_codes.iter().find(|r| r.name == name_key) {
        data.set_text("pigmentCode", rule.code.clone());
        data.set_flag("singlePigment");
    }

    if let Some(rule) = rules
        .artist_prefixes
        .iter()
        .find(|r| name_key.starts_with(r.prefix.as_str()))
    {
        data.set_text("artist", rule.artist.clone());
    }

    data
}

/// Folds a sampled secondary color into `brandData.secondaryHex`.
///
/// Only applies to color-shift paints, and only when the secondary color
/// differs from the primary and its mean brightness falls strictly inside
/// the non-degenerate band — a near-black or near-white "second color" is
/// a background/shadow artifact, not a shift tone.
pub fn fold_secondary_hex(data: &mut BrandData, primary_hex: &str, secondary: Option<Rgb>) {
    if !data.flag("colorShift") {
        return;
    }
    let Some(rgb) = secondary else { return };

    let hex = hex_string(rgb);
    if hex == primary_hex {
        return;
    }
    let b = brightness(rgb);
    if b > SECONDARY_HEX_MIN_BRIGHTNESS && b < SECONDARY_HEX_MAX_BRIGHTNESS {
        data.set_text("secondaryHex", hex);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintdb_core::vendors::{green_stuff_world, kimera, turbodork};

    fn make_record(title: &str, tags: &[&str], type_hint: Option<&str>) -> RawProductRecord {
        RawProductRecord {
            title: title.to_string(),
            identifier: "x".to_string(),
            sku: String::new(),
            url: "https://turbodork.com/products/x".to_string(),
            image_refs: vec![],
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            type_hint: type_hint.map(str::to_string),
        }
    }

    // -----------------------------------------------------------------------
    // flag rules
    // -----------------------------------------------------------------------

    #[test]
    fn range_key_sets_flag_for_whole_range() {
        let gsw = green_stuff_world();
        let record = make_record("Abyss Blue", &[], None);
        let data = extract_brand_data(&record, "chameleon", "Abyss Blue", &gsw.brand_rules);
        assert!(data.flag("colorShift"));
    }

    #[test]
    fn title_keyword_sets_flag_outside_its_range() {
        let gsw = green_stuff_world();
        let record = make_record("Chameleon Paint BLUE RAPTOR", &[], None);
        let data = extract_brand_data(&record, "acrylic", "Blue Raptor", &gsw.brand_rules);
        assert!(data.flag("colorShift"));
    }

    #[test]
    fn multiple_independent_rules_fire_together() {
        let gsw = green_stuff_world();
        let record = make_record("Candy Fluor GLOW RED", &[], None);
        let data = extract_brand_data(&record, "acrylic", "Glow Red", &gsw.brand_rules);
        assert!(data.flag("uvReactive"));
        assert!(data.flag("transparent"));
        assert!(data.flag("glowInDark"));
    }

    #[test]
    fn no_trigger_leaves_data_empty() {
        let gsw = green_stuff_world();
        let record = make_record("Abyss Blue", &[], None);
        let data = extract_brand_data(&record, "acrylic", "Abyss Blue", &gsw.brand_rules);
        assert!(data.is_empty());
    }

    #[test]
    fn shift_tag_sets_flag_via_keyword() {
        let td = turbodork();
        let record = make_record("3D Glasses", &["shift"], None);
        let data = extract_brand_data(&record, "metallic", "3D Glasses", &td.brand_rules);
        assert!(data.flag("colorShift"));
    }

    // -----------------------------------------------------------------------
    // tag attributes
    // -----------------------------------------------------------------------

    #[test]
    fn tone_tag_is_lifted_and_title_cased() {
        let td = turbodork();
        let record = make_record("3D Glasses", &["tone:warm"], None);
        let data = extract_brand_data(&record, "metallic", "3D Glasses", &td.brand_rules);
        assert_eq!(data.text("tone"), Some("Warm"));
    }

    #[test]
    fn primer_tag_becomes_recommended_basecoat() {
        let td = turbodork();
        let record = make_record("3D Glasses", &["primer:black"], None);
        let data = extract_brand_data(&record, "metallic", "3D Glasses", &td.brand_rules);
        assert_eq!(data.text("recommendedBasecoat"), Some("Black"));
    }

    // -----------------------------------------------------------------------
    // shift colors
    // -----------------------------------------------------------------------

    #[test]
    fn zeni_tag_names_shift_pair_verbatim() {
        let td = turbodork();
        let record = make_record("Spaceman Bill", &["zeni:pink-gold"], Some("ZeniShift"));
        let data = extract_brand_data(&record, "zenishift", "Spaceman Bill", &td.brand_rules);
        assert_eq!(data.text("shiftColors"), Some("pink-gold"));
    }

    #[test]
    fn color_tags_join_first_two_when_no_pair_tag() {
        let td = turbodork();
        let record = make_record(
            "Spaceman Bill",
            &["color:pink", "color:gold", "color:green"],
            Some("Turboshift"),
        );
        let data = extract_brand_data(&record, "turboshift", "Spaceman Bill", &td.brand_rules);
        assert_eq!(data.text("shiftColors"), Some("pink-gold"));
    }

    #[test]
    fn single_color_tag_is_not_a_shift_pair() {
        let td = turbodork();
        let record = make_record("Spaceman Bill", &["color:pink"], Some("Turboshift"));
        let data = extract_brand_data(&record, "turboshift", "Spaceman Bill", &td.brand_rules);
        assert_eq!(data.text("shiftColors"), None);
    }

    #[test]
    fn shift_colors_ignored_without_color_shift_flag() {
        let td = turbodork();
        let record = make_record("Plain Metallic", &["zeni:pink-gold"], None);
        let data = extract_brand_data(&record, "metallic", "Plain Metallic", &td.brand_rules);
        // "zeni" tags never appear on non-shift paints in practice; if one
        // does, it must not invent a shift pair.
        assert!(!data.flag("colorShift"));
        assert_eq!(data.text("shiftColors"), None);
    }

    // -----------------------------------------------------------------------
    // pigment codes and artists
    // -----------------------------------------------------------------------

    #[test]
    fn pigment_code_lookup_marks_single_pigment() {
        let km = kimera();
        let record = make_record("The Red - Series 1", &[], None);
        let data = extract_brand_data(&record, "pure-pigments", "The Red", &km.brand_rules);
        assert_eq!(data.text("pigmentCode"), Some("PR254"));
        assert!(data.flag("singlePigment"));
    }

    #[test]
    fn artist_prefix_resolves_full_name() {
        let km = kimera();
        let record = make_record("Pisarski Shadow", &[], None);
        let data = extract_brand_data(&record, "signatures", "Pisarski Shadow", &km.brand_rules);
        assert_eq!(data.text("artist"), Some("Michal Pisarski"));
    }

    #[test]
    fn unknown_name_gets_no_pigment_code() {
        let km = kimera();
        let record = make_record("Mystery Color", &[], None);
        let data = extract_brand_data(&record, "pure-pigments", "Mystery Color", &km.brand_rules);
        assert_eq!(data.text("pigmentCode"), None);
        assert!(!data.flag("singlePigment"));
    }

    // -----------------------------------------------------------------------
    // secondary hex folding
    // -----------------------------------------------------------------------

    fn shift_data() -> BrandData {
        let mut data = BrandData::default();
        data.set_flag("colorShift");
        data
    }

    #[test]
    fn secondary_in_band_is_folded() {
        let mut data = shift_data();
        fold_secondary_hex(&mut data, "#8B4513", Some((0x11, 0x22, 0x33)));
        assert_eq!(data.text("secondaryHex"), Some("#112233"));
    }

    #[test]
    fn secondary_equal_to_primary_is_dropped() {
        let mut data = shift_data();
        fold_secondary_hex(&mut data, "#112233", Some((0x11, 0x22, 0x33)));
        assert_eq!(data.text("secondaryHex"), None);
    }

    #[test]
    fn near_black_secondary_is_dropped() {
        let mut data = shift_data();
        fold_secondary_hex(&mut data, "#8B4513", Some((10, 10, 10)));
        assert_eq!(data.text("secondaryHex"), None);
    }

    #[test]
    fn near_white_secondary_is_dropped() {
        let mut data = shift_data();
        fold_secondary_hex(&mut data, "#8B4513", Some((250, 250, 250)));
        assert_eq!(data.text("secondaryHex"), None);
    }

    #[test]
    fn band_edges_are_exclusive() {
        let mut data = shift_data();
        fold_secondary_hex(&mut data, "#8B4513", Some((20, 20, 20)));
        assert_eq!(data.text("secondaryHex"), None);
        fold_secondary_hex(&mut data, "#8B4513", Some((235, 235, 235)));
        assert_eq!(data.text("secondaryHex"), None);
    }

    #[test]
    fn non_shift_paint_never_gets_secondary() {
        let mut data = BrandData::default();
        fold_secondary_hex(&mut data, "#8B4513", Some((0x11, 0x22, 0x33)));
        assert_eq!(data.text("secondaryHex"), None);
    }

    #[test]
    fn missing_secondary_is_a_no_op() {
        let mut data = shift_data();
        fold_secondary_hex(&mut data, "#8B4513", None);
        assert_eq!(data.text("secondaryHex"), None);
    }
}
