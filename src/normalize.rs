use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HYPHEN_SPACING: Regex = Regex::new(r"\s*-\s*").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Clean a scraped card name for presentation:
/// - Removes whitespace around hyphens ("K9- Lupis" -> "K9-Lupis")
/// - Collapses whitespace runs into a single space
/// - Strips leading/trailing whitespace
///
/// Case and punctuation are left untouched; this is the name that ends up
/// in the exported dataset.
pub fn normalize_display(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let hyphenated = HYPHEN_SPACING.replace_all(raw, "-");
    WHITESPACE_RUN
        .replace_all(hyphenated.trim(), " ")
        .into_owned()
}

/// Reduce a card name to its comparison key:
/// - Decodes HTML entities (e.g. "&amp;" -> "&")
/// - Lowercases
/// - Drops all whitespace, hyphens, underscores and any remaining
///   non-alphanumeric character (Unicode letters and digits survive)
///
/// Both the catalog index and the per-card lookup go through this exact
/// function; keys are never shown to users.
pub fn normalize_key(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    decode_entities(raw)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Decode the HTML entities that show up in card names: the common named
/// entities plus decimal ("&#39;") and hex ("&#x27;") character references.
/// Unknown or unterminated entities are passed through verbatim.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';') {
            Some(semi) if (2..=10).contains(&semi) => {
                if let Some(decoded) = decode_entity(&tail[1..semi]) {
                    out.push(decoded);
                    rest = &tail[semi + 1..];
                } else {
                    out.push('&');
                    rest = &tail[1..];
                }
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let code = name.strip_prefix('#')?;
            let value = if let Some(hex) = code.strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                code.parse::<u32>().ok()?
            };
            char::from_u32(value)?
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strips_and_collapses() {
        assert_eq!(normalize_display("K9- Lupis "), "K9-Lupis");
        assert_eq!(normalize_display("  A   B  "), "A B");
        assert_eq!(normalize_display(""), "");
    }

    #[test]
    fn display_hyphen_spacing_variants() {
        assert_eq!(normalize_display("A - B"), "A-B");
        assert_eq!(normalize_display("A- B"), "A-B");
        assert_eq!(normalize_display("A -B"), "A-B");
    }

    #[test]
    fn display_keeps_case_and_punctuation() {
        assert_eq!(normalize_display("Magician's Rod"), "Magician's Rod");
        assert_eq!(normalize_display("Pot of Greed"), "Pot of Greed");
    }

    #[test]
    fn key_collapses_hyphen_variants() {
        let expected = normalize_key("K9-Lupis");
        assert_eq!(normalize_key("K9- Lupis"), expected);
        assert_eq!(normalize_key("K9 - Lupis"), expected);
        assert_eq!(expected, "k9lupis");
    }

    #[test]
    fn key_decodes_entities() {
        assert_eq!(
            normalize_key("Poly&merization"),
            normalize_key("Poly&amp;merization")
        );
        assert_eq!(normalize_key("Poly&amp;merization"), "polymerization");
        assert_eq!(normalize_key("Magician&#39;s Rod"), "magiciansrod");
    }

    #[test]
    fn key_is_compacted_and_lowercased() {
        assert_eq!(normalize_key("Pot of Greed "), "potofgreed");
        assert_eq!(normalize_key("Dark_Magician"), "darkmagician");
        assert_eq!(normalize_key("Mystical Space Typhoon"), "mysticalspacetyphoon");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn key_keeps_unicode_letters() {
        assert_eq!(normalize_key("Fusión"), "fusión");
        assert_eq!(normalize_key("Øufs"), "øufs");
    }

    #[test]
    fn entities_decode_named_and_numeric() {
        assert_eq!(decode_entities("Fire &amp; Ice"), "Fire & Ice");
        assert_eq!(decode_entities("&#39;&#x27;"), "''");
        assert_eq!(decode_entities("A&nbsp;B"), "A\u{a0}B");
    }

    #[test]
    fn entities_pass_through_unknown_forms() {
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("&bogus;x"), "&bogus;x");
    }
}
