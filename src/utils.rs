//! Small string helpers shared by both pipelines.

/// Title-case a scraped name or province for display.
///
/// The listings shout everything in upper case (`"ANKARA"`, `"ALİ VELİ"`);
/// stored display values use one capital per word. Words are split on
/// whitespace; runs of whitespace collapse to a single space.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(title_case("ANKARA"), "Ankara");
/// assert_eq!(title_case("ali  veli"), "Ali Veli");
/// ```
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
