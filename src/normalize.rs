//! Name normalization for cross-source identity matching.
//!
//! The site publishes the same member under differently cased and spaced
//! names across its listings (the transcript pages, the phone list, and the
//! e-mail list). [`normalize`] maps a raw name to the canonical comparison
//! key used everywhere an entity has to be matched across sources.
//!
//! # Folding table
//!
//! The table below is correctness-critical configuration, not cosmetics: it
//! folds exactly the Turkish letter variants that the site itself uses
//! interchangeably between its listings. In particular all three of `İ`,
//! `I` and `ı` fold to plain `i`, because the listings mix dotted and
//! dotless forms for the same person.
//!
//! Folding runs *before* lower-casing. Unicode lower-casing of `İ` (U+0130)
//! decomposes to `i` plus a combining dot, which would silently break the
//! equivalence between `"ALİ VELİ"` and `"Ali Veli"`.
//!
//! Word order is deliberately not normalized: this function is
//! character-level only. A listing that flips given and family name will not
//! match, and that miss is handled upstream by dropping the secondary row.

/// Turkish letter variants and the base Latin letter each folds to.
const FOLDS: &[(char, char)] = &[
    ('İ', 'i'),
    ('I', 'i'),
    ('ı', 'i'),
    ('Ş', 's'),
    ('ş', 's'),
    ('Ç', 'c'),
    ('ç', 'c'),
    ('Ğ', 'g'),
    ('ğ', 'g'),
    ('Ü', 'u'),
    ('ü', 'u'),
    ('Ö', 'o'),
    ('ö', 'o'),
];

/// Map a raw human name to its canonical comparison key.
///
/// Deterministic, total, and idempotent: folds the configured Turkish letter
/// variants to base Latin letters, lower-cases the rest, and strips all
/// whitespace.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("ALİ VELİ"), "aliveli");
/// assert_eq!(normalize("Ali Veli"), "aliveli");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| match FOLDS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => vec![*to],
            None => c.to_lowercase().collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_turkish_variants() {
        assert_eq!(normalize("ŞÇĞÜÖİI"), "scguoii");
        assert_eq!(normalize("şçğüöı"), "scguoi");
    }

    #[test]
    fn test_dotted_and_dotless_i_agree() {
        // The site mixes all three forms for the same person.
        assert_eq!(normalize("ALİ VELİ"), "aliveli");
        assert_eq!(normalize("Alı Veli"), "aliveli");
        assert_eq!(normalize("ali veli"), "aliveli");
    }

    #[test]
    fn test_strips_all_whitespace() {
        assert_eq!(normalize("  Ayşe  Nur\tKaya "), "aysenurkaya");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["ALİ VELİ", "Şule Öztürk", "plain ascii", "Çağla IŞIK"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(normalize("John Smith"), "johnsmith");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
