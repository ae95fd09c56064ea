//! Slug helpers for projects, gallery entries, and contractor profiles.
//!
//! Slugs are lowercase ASCII letters, digits, and single hyphens. Uniqueness
//! comes from a base-36 timestamp suffix.

use chrono::{DateTime, Utc};

/// Turn free text into a slug: lowercase, accents folded, every other run of
/// characters collapsed to one hyphen.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for ch in text.chars().flat_map(fold_accent) {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Slug of `text` followed by the base-36 millisecond timestamp of `at`.
///
/// Falls back to `fallback` when `text` has no sluggable characters.
#[must_use]
pub fn unique_slug(text: &str, fallback: &str, at: DateTime<Utc>) -> String {
    let slug = slugify(text);
    let base = if slug.is_empty() { fallback.to_owned() } else { slug };
    let millis = u64::try_from(at.timestamp_millis()).unwrap_or_default();
    format!("{base}-{}", to_base36(millis))
}

/// Return `true` when `value` is a valid slug.
#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::new();
    while value > 0 {
        let digit = usize::try_from(value.checked_rem(36).unwrap_or_default()).unwrap_or_default();
        out.push(DIGITS.get(digit).copied().unwrap_or(b'0'));
        value = value.checked_div(36).unwrap_or_default();
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn fold_accent(ch: char) -> impl Iterator<Item = char> {
    let folded: &str = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "a",
        'ç' | 'Ç' => "c",
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => "i",
        'ñ' | 'Ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => "o",
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => "u",
        'œ' | 'Œ' => "oe",
        'æ' | 'Æ' => "ae",
        '&' => " and ",
        _ => "",
    };
    let single = folded.is_empty().then_some(ch);
    folded.chars().chain(single)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("Cosy Living Room", "cosy-living-room")]
    #[case("  Salle de bain été  ", "salle-de-bain-ete")]
    #[case("Kitchen & Bath!!", "kitchen-and-bath")]
    #[case("---", "")]
    fn slugify_normalises_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[rstest]
    fn unique_slug_appends_base36_timestamp() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).single().expect("valid instant");
        assert_eq!(unique_slug("My Loft", "project", at), "my-loft-loyw3v28");
    }

    #[rstest]
    fn unique_slug_uses_fallback_for_symbols() {
        let at = Utc.timestamp_millis_opt(35).single().expect("valid instant");
        assert_eq!(unique_slug("!!!", "project", at), "project-z");
    }

    #[rstest]
    #[case("my-loft-1a", true)]
    #[case("My-Loft", false)]
    #[case("-loft", false)]
    #[case("", false)]
    fn validates_slugs(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }
}
