//! Paint type inference from free text.

use paintdb_core::TypeRule;

/// Infers the paint type tag from a title and optional vendor taxonomy
/// hint.
///
/// The priority table is an ordered sequence; the first rule whose keyword
/// appears as a substring of the lowercased title or hint wins, by table
/// order, not by position in the input. When nothing matches, the range's
/// declared default applies.
#[must_use]
pub fn infer_type(
    title: &str,
    type_hint: Option<&str>,
    default_type: &str,
    table: &[TypeRule],
) -> String {
    let title = title.to_lowercase();
    let hint = type_hint.map(str::to_lowercase);

    for rule in table {
        if title.contains(rule.keyword.as_str())
            || hint
                .as_deref()
                .is_some_and(|h| h.contains(rule.keyword.as_str()))
        {
            return rule.paint_type.clone();
        }
    }
    default_type.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintdb_core::vendors::{green_stuff_world, scale75, turbodork};

    #[test]
    fn keyword_in_title_wins_over_default() {
        let gsw = green_stuff_world();
        assert_eq!(
            infer_type("Metallic Paint SHINY GOLD", None, "opaque", &gsw.type_priority),
            "metallic"
        );
    }

    #[test]
    fn no_match_falls_back_to_default() {
        let gsw = green_stuff_world();
        assert_eq!(
            infer_type("Abyss Blue", None, "opaque", &gsw.type_priority),
            "opaque"
        );
    }

    #[test]
    fn table_order_decides_between_competing_keywords() {
        let gsw = green_stuff_world();
        // "Metallic Wash Ink" matches metallic, wash, and ink rules; the
        // table lists metallic first, so metallic wins regardless of where
        // the words sit in the title.
        assert_eq!(
            infer_type("Wash Metallic Ink", None, "opaque", &gsw.type_priority),
            "metallic"
        );
    }

    #[test]
    fn dipping_ink_beats_plain_ink_by_order() {
        let gsw = green_stuff_world();
        assert_eq!(
            infer_type("Dipping ink 17 ml - Zombie Dip", None, "opaque", &gsw.type_priority),
            "contrast"
        );
    }

    #[test]
    fn vendor_type_hint_is_consulted() {
        let td = turbodork();
        assert_eq!(
            infer_type("3D Glasses", Some("Turboshift"), "opaque", &td.type_priority),
            "metallic"
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let s75 = scale75();
        assert_eq!(
            infer_type("ELVEN GOLD", None, "opaque", &s75.type_priority),
            "metallic"
        );
    }

    #[test]
    fn empty_table_always_defaults() {
        assert_eq!(infer_type("Anything Gold", None, "wash", &[]), "wash");
    }
}
