use super::Taxonomy;

/// Map a raw color string to its canonical name.
///
/// Known synonyms are looked up case-insensitively; anything else is
/// title-cased. Applying this twice gives the same result as applying it once.
pub fn normalize_color(raw: &str, taxonomy: &Taxonomy) -> String {
    let trimmed = raw.trim();
    if let Some(canonical) = taxonomy.color_synonym(&trimmed.to_lowercase()) {
        return canonical.to_string();
    }
    // title-casing can turn a non-synonym into one ("ſand" -> "Sand")
    let titled = title_case(trimmed);
    match taxonomy.color_synonym(&titled.to_lowercase()) {
        Some(canonical) => canonical.to_string(),
        None => titled,
    }
}

/// Upper-case every letter that does not follow another letter and
/// lower-case the rest, so `heather/navy` becomes `Heather/Navy`.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if prev_letter {
            out.extend(c.to_lowercase());
        } else {
            // 'ß' upper-cases to "SS"; keep only the first letter upper
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
        }
        prev_letter = c.is_alphabetic();
    }
    out
}
