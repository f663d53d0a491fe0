//! Display-name normalization.
//!
//! Raw vendor titles carry range prefixes (`"Acrylic Color ABYSS BLUE"`),
//! volume suffixes (`"... 30 ml"`), pack-size series markers
//! (`"The Red - Series 1"`), and SHOUTING CASE. Normalization strips the
//! noise and re-cases, and is idempotent: feeding a normalized name back
//! in returns it unchanged.

use std::sync::LazyLock;

use regex::Regex;

use paintdb_core::VendorPolicy;

static VOLUME_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\d+\s*ml\s*$").expect("valid volume suffix regex"));
static SERIES_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*-\s*series\s*\d+\s*$").expect("valid series suffix regex"));

/// Derives a clean display name from a raw title.
///
/// Steps, in order: strip the first matching policy prefix (prefixes are
/// listed most-specific first, and prefix matching is case-insensitive so
/// all-caps titles still shed theirs), strip a trailing volume marker,
/// strip a trailing series marker, then Title-Case the result if it has
/// no lowercase letters. Mixed-case input keeps its casing.
#[must_use]
pub fn normalize_name(title: &str, policy: &VendorPolicy) -> String {
    let mut name = title.trim();

    for prefix in &policy.name_prefixes {
        if let Some(rest) = strip_prefix_ci(name, prefix) {
            name = rest;
            break;
        }
    }

    let mut name = name.to_string();
    if policy.strip_volume_suffix {
        if let Some(m) = VOLUME_SUFFIX_RE.find(&name) {
            name.truncate(m.start());
        }
    }
    if policy.strip_series_suffix {
        if let Some(m) = SERIES_SUFFIX_RE.find(&name) {
            name.truncate(m.start());
        }
    }

    let name = name.trim();
    if is_shouting(name) {
        title_case(name)
    } else {
        name.to_string()
    }
}

/// ASCII case-insensitive prefix strip. Returns the remainder on match.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// A string shouts when it contains letters but none of them lowercase.
fn is_shouting(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Title-cases a string: every letter that follows a non-letter is
/// uppercased, everything else lowered. Capitalizes after hyphens too,
/// so `"OLIVE-BROWN"` becomes `"Olive-Brown"`.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintdb_core::vendors::{green_stuff_world, kimera, scale75};

    // -----------------------------------------------------------------------
    // prefix + suffix stripping
    // -----------------------------------------------------------------------

    #[test]
    fn strips_prefix_and_recases_all_caps_title() {
        let gsw = green_stuff_world();
        assert_eq!(
            normalize_name("ACRYLIC COLOR OLIVE-BROWN OPS", &gsw),
            "Olive-Brown Ops"
        );
    }

    #[test]
    fn strips_prefix_volume_suffix_and_recases() {
        let gsw = green_stuff_world();
        assert_eq!(
            normalize_name("Dry Brush - ALPHA TURQUOISE 30 ml", &gsw),
            "Alpha Turquoise"
        );
    }

    #[test]
    fn strips_mid_specificity_prefix() {
        let gsw = green_stuff_world();
        assert_eq!(
            normalize_name("Dipping ink 17 ml - Zombie Dip", &gsw),
            "Zombie Dip"
        );
    }

    #[test]
    fn only_first_matching_prefix_is_stripped() {
        let gsw = green_stuff_world();
        // "Metallic Dry Brush - " is listed before "Dry Brush - "; only the
        // more specific one applies.
        assert_eq!(
            normalize_name("Metallic Dry Brush - GOLD 30 ml", &gsw),
            "Gold"
        );
    }

    #[test]
    fn volume_suffix_without_space_is_stripped() {
        let gsw = green_stuff_world();
        assert_eq!(normalize_name("Wash Ink GREEN 17ml", &gsw), "Green");
    }

    #[test]
    fn series_suffix_is_stripped_when_enabled() {
        let km = kimera();
        assert_eq!(normalize_name("The Red - Series 1", &km), "The Red");
    }

    #[test]
    fn series_suffix_kept_when_disabled() {
        let gsw = green_stuff_world();
        assert_eq!(
            normalize_name("Odd Name - Series 2", &gsw),
            "Odd Name - Series 2"
        );
    }

    // -----------------------------------------------------------------------
    // re-casing
    // -----------------------------------------------------------------------

    #[test]
    fn all_caps_becomes_title_case() {
        let s75 = scale75();
        assert_eq!(normalize_name("DECAY BLACK", &s75), "Decay Black");
    }

    #[test]
    fn mixed_case_is_left_untouched() {
        let s75 = scale75();
        assert_eq!(normalize_name("McVronsky Green", &s75), "McVronsky Green");
    }

    #[test]
    fn hyphenated_caps_capitalize_each_segment() {
        let s75 = scale75();
        assert_eq!(normalize_name("BLUE-GREEN", &s75), "Blue-Green");
    }

    #[test]
    fn digits_do_not_block_recasing() {
        let s75 = scale75();
        assert_eq!(normalize_name("FS 34094", &s75), "Fs 34094");
    }

    // -----------------------------------------------------------------------
    // idempotence
    // -----------------------------------------------------------------------

    #[test]
    fn normalize_is_idempotent() {
        let gsw = green_stuff_world();
        let km = kimera();
        let cases = [
            ("ACRYLIC COLOR OLIVE-BROWN OPS", &gsw),
            ("Dry Brush - ALPHA TURQUOISE 30 ml", &gsw),
            ("Dipping ink 60 ml - Fire Dip", &gsw),
            ("The Red - Series 1", &km),
            ("Already Normal", &gsw),
        ];
        for (title, policy) in cases {
            let once = normalize_name(title, policy);
            let twice = normalize_name(&once, policy);
            assert_eq!(once, twice, "not idempotent for '{title}'");
        }
    }

    // -----------------------------------------------------------------------
    // edge cases
    // -----------------------------------------------------------------------

    #[test]
    fn whitespace_only_title_normalizes_to_empty() {
        let gsw = green_stuff_world();
        assert_eq!(normalize_name("   ", &gsw), "");
    }

    #[test]
    fn title_with_only_prefix_and_volume_normalizes_to_empty() {
        let gsw = green_stuff_world();
        assert_eq!(normalize_name("Acrylic Color 17ml", &gsw), "");
    }
}
