use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

/// Garment categories recognised by keyword in free-text size strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    ShortSleeve,
    ShortSleeveVNeck,
    TankTop,
    Sweatshirt,
    LongSleeve,
    Hoodie,
    Youth,
    Toddler,
    Baby,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::ShortSleeve,
        Category::ShortSleeveVNeck,
        Category::TankTop,
        Category::Sweatshirt,
        Category::LongSleeve,
        Category::Hoodie,
        Category::Youth,
        Category::Toddler,
        Category::Baby,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::ShortSleeve => "Short Sleeve",
            Category::ShortSleeveVNeck => "Short Sleeve V-Neck",
            Category::TankTop => "Tank Top",
            Category::Sweatshirt => "Sweatshirt",
            Category::LongSleeve => "Long Sleeve",
            Category::Hoodie => "Hoodie",
            Category::Youth => "Youth",
            Category::Toddler => "Toddler",
            Category::Baby => "Baby",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spellings of "v-neck" seen on order forms.
pub const VNECK_KEYWORDS: [&str; 4] = ["v-neck", "v neck", "v. neck", "vneck"];

pub fn has_vneck_keyword(lowered: &str) -> bool {
    VNECK_KEYWORDS.iter().any(|k| lowered.contains(k))
}

lazy_static! {
    static ref BABY_AFTER_DASH: Regex = Regex::new(r"(?i)[-–—]\s*(NB|\d+\s*-\s*\d+M)").unwrap();
    static ref BABY_MONTHS: Regex = Regex::new(r"(?i)(\d+\s*-\s*\d+M)").unwrap();
    static ref YOUTH_TOKEN: Regex = Regex::new(r"-\s*(\w+)").unwrap();
    static ref TODDLER_AFTER_SEP: Regex = Regex::new(r"(?i)[-:]\s*(\d+T)").unwrap();
    static ref TODDLER_ANY: Regex = Regex::new(r"(?i)(\d+T)\b").unwrap();
    static ref SHORT_SLEEVE: Regex = Regex::new(r"(?i)short sleeve.*?[-–]\s*([\w+]+)").unwrap();
    static ref SHORT_SLEEVE_VNECK: Regex =
        Regex::new(r"(?i)short sleeve.*?v[- ]?neck.*?[-–]\s*([\w+]+)").unwrap();
    static ref TANK_TOP: Regex = Regex::new(r"(?i)tank(?: top)?.*?[-–]\s*([\w+]+)").unwrap();
    static ref SWEATSHIRT: Regex = Regex::new(r"(?i)sweatshirt.*?[-–]\s*([\w+]+)").unwrap();
    static ref LONG_SLEEVE: Regex = Regex::new(r"(?i)long sleeve.*?[-–]\s*([\w+]+)").unwrap();
    static ref HOODIE: Regex = Regex::new(r"(?i)hoodie.*?[-–]\s*([\w+]+)").unwrap();
}

/// One category rule: a keyword test on the lower-cased text and a size
/// extractor run on the trimmed original.
struct Rule {
    category: Category,
    applies: fn(&str) -> bool,
    size: fn(&str) -> Option<String>,
}

/// Evaluated top to bottom; the first rule that applies decides the category.
static RULES: [Rule; 9] = [
    Rule {
        category: Category::Baby,
        applies: is_baby,
        size: baby_size,
    },
    Rule {
        category: Category::Youth,
        applies: is_youth,
        size: youth_size,
    },
    Rule {
        category: Category::Toddler,
        applies: is_toddler,
        size: toddler_size,
    },
    Rule {
        category: Category::ShortSleeveVNeck,
        applies: is_short_sleeve_vneck,
        size: short_sleeve_vneck_size,
    },
    Rule {
        category: Category::ShortSleeve,
        applies: is_short_sleeve,
        size: short_sleeve_size,
    },
    Rule {
        category: Category::TankTop,
        applies: is_tank_top,
        size: tank_top_size,
    },
    Rule {
        category: Category::Sweatshirt,
        applies: is_sweatshirt,
        size: sweatshirt_size,
    },
    Rule {
        category: Category::LongSleeve,
        applies: is_long_sleeve,
        size: long_sleeve_size,
    },
    Rule {
        category: Category::Hoodie,
        applies: is_hoodie,
        size: hoodie_size,
    },
];

/// Map a raw size string to a canonical `"<Category> - <Size>"` label.
///
/// A category without a recognisable size yields just the category name;
/// text without any category keyword is returned trimmed but otherwise as is.
pub fn normalize_size(raw: &str) -> String {
    let original = raw.trim();
    let Some(rule) = find_rule(original) else {
        return original.to_string();
    };
    match (rule.size)(original) {
        Some(size) => format!("{} - {}", rule.category, size),
        None => rule.category.name().to_string(),
    }
}

/// The category whose keyword rule claims `raw`, if any.
pub fn detect_category(raw: &str) -> Option<Category> {
    find_rule(raw.trim()).map(|rule| rule.category)
}

fn find_rule(original: &str) -> Option<&'static Rule> {
    let lowered = original.to_lowercase();
    RULES.iter().find(|rule| (rule.applies)(&lowered))
}

// ---------------------------------------------------------------------------
// Keyword tests (input is lower-cased)
// ---------------------------------------------------------------------------

fn is_baby(l: &str) -> bool {
    l.contains("baby") || l.contains("onesie")
}

fn is_youth(l: &str) -> bool {
    l.contains("youth")
}

fn is_toddler(l: &str) -> bool {
    l.contains("toddler")
}

fn is_short_sleeve_vneck(l: &str) -> bool {
    l.contains("short sleeve") && has_vneck_keyword(l)
}

fn is_short_sleeve(l: &str) -> bool {
    l.contains("short sleeve")
}

fn is_tank_top(l: &str) -> bool {
    l.contains("tank")
}

fn is_sweatshirt(l: &str) -> bool {
    l.contains("sweatshirt")
}

fn is_long_sleeve(l: &str) -> bool {
    l.contains("long sleeve")
}

fn is_hoodie(l: &str) -> bool {
    l.contains("hoodie")
}

// ---------------------------------------------------------------------------
// Size extractors (input is the trimmed original)
// ---------------------------------------------------------------------------

fn baby_size(original: &str) -> Option<String> {
    if let Some(c) = BABY_AFTER_DASH.captures(original) {
        return Some(compact_upper(&c[1]));
    }
    if original.to_lowercase().contains("nb") {
        return Some("NB".to_string());
    }
    BABY_MONTHS
        .captures(original)
        .map(|c| compact_upper(&c[1]))
}

fn youth_size(original: &str) -> Option<String> {
    let c = YOUTH_TOKEN.captures(original)?;
    let token = c[1].to_lowercase();
    Some(match token.as_str() {
        "medium" | "med" => "M".to_string(),
        _ => token.to_uppercase(),
    })
}

fn toddler_size(original: &str) -> Option<String> {
    TODDLER_AFTER_SEP
        .captures(original)
        .or_else(|| TODDLER_ANY.captures(original))
        .map(|c| c[1].to_uppercase())
}

// The dash must follow both "short sleeve" and the v-neck keyword. A miss
// leaves the label bare even when a size token appears elsewhere.
fn short_sleeve_vneck_size(original: &str) -> Option<String> {
    first_token_upper(&SHORT_SLEEVE_VNECK, original)
}

fn short_sleeve_size(original: &str) -> Option<String> {
    first_token_upper(&SHORT_SLEEVE, original)
}

fn tank_top_size(original: &str) -> Option<String> {
    first_token_upper(&TANK_TOP, original)
}

fn sweatshirt_size(original: &str) -> Option<String> {
    first_token_upper(&SWEATSHIRT, original)
}

fn long_sleeve_size(original: &str) -> Option<String> {
    first_token_upper(&LONG_SLEEVE, original)
}

fn hoodie_size(original: &str) -> Option<String> {
    first_token_upper(&HOODIE, original)
}

fn first_token_upper(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].to_uppercase())
}

fn compact_upper(s: &str) -> String {
    s.split_whitespace().collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baby() {
        assert_eq!(normalize_size("Baby Onesie - NB"), "Baby - NB");
        assert_eq!(normalize_size("Baby Onesie - 6-12m"), "Baby - 6-12M");
        assert_eq!(normalize_size("Onesie — 0 - 6M"), "Baby - 0-6M");
        assert_eq!(normalize_size("Baby Bodysuit (nb)"), "Baby - NB");
        assert_eq!(normalize_size("Baby Onesie 12-18M"), "Baby - 12-18M");
        assert_eq!(normalize_size("Baby Onesie"), "Baby");
    }

    #[test]
    fn test_youth() {
        assert_eq!(normalize_size("Youth - Medium"), "Youth - M");
        assert_eq!(normalize_size("Youth Tee - med"), "Youth - M");
        assert_eq!(normalize_size("Youth - small"), "Youth - SMALL");
        assert_eq!(normalize_size("Youth Large"), "Youth");
    }

    #[test]
    fn test_toddler() {
        assert_eq!(normalize_size("Toddler Size: 3T"), "Toddler - 3T");
        assert_eq!(normalize_size("Toddler - 2t"), "Toddler - 2T");
        assert_eq!(normalize_size("Toddler Tee 4T"), "Toddler - 4T");
        assert_eq!(normalize_size("Toddler Tee"), "Toddler");
    }

    #[test]
    fn test_adult_categories() {
        assert_eq!(normalize_size("Short Sleeve - xl"), "Short Sleeve - XL");
        assert_eq!(normalize_size("Unisex Short Sleeve Tee – 2XL"), "Short Sleeve - 2XL");
        assert_eq!(normalize_size("Tank Top - M"), "Tank Top - M");
        assert_eq!(normalize_size("Racerback Tank - s"), "Tank Top - S");
        assert_eq!(normalize_size("Crewneck Sweatshirt - 3XL"), "Sweatshirt - 3XL");
        assert_eq!(normalize_size("Long Sleeve - L"), "Long Sleeve - L");
        assert_eq!(normalize_size("Hoodie - L"), "Hoodie - L");
        assert_eq!(normalize_size("Zip Hoodie - 2X+"), "Hoodie - 2X+");
        assert_eq!(normalize_size("Hoodie"), "Hoodie");
    }

    #[test]
    fn test_vneck() {
        assert_eq!(normalize_size("Short Sleeve V-Neck - M"), "Short Sleeve V-Neck - M");
        assert_eq!(normalize_size("Short Sleeve Vneck – xs"), "Short Sleeve V-Neck - XS");
        assert_eq!(normalize_size("Short Sleeve V Neck - L"), "Short Sleeve V-Neck - L");
    }

    #[test]
    fn test_vneck_lossy_fallback() {
        // keyword spelled "v. neck" is detected but not matched by the size pattern
        assert_eq!(normalize_size("Short Sleeve V. Neck - L"), "Short Sleeve V-Neck");
        // v-neck keyword ahead of "short sleeve"
        assert_eq!(normalize_size("V-Neck Short Sleeve - L"), "Short Sleeve V-Neck");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        assert_eq!(detect_category("Baby Youth Hoodie - S"), Some(Category::Baby));
        assert_eq!(detect_category("Youth Hoodie - S"), Some(Category::Youth));
        assert_eq!(detect_category("Long Sleeve Sweatshirt - S"), Some(Category::Sweatshirt));
        assert_eq!(detect_category("Short Sleeve Tank - S"), Some(Category::ShortSleeve));
        assert_eq!(normalize_size("Youth Hoodie - S"), "Youth - S");
    }

    #[test]
    fn test_first_dash_is_taken() {
        assert_eq!(normalize_size("Short Sleeve T-Shirt - XL"), "Short Sleeve - SHIRT");
    }

    #[test]
    fn test_em_dash_only_for_baby() {
        assert_eq!(normalize_size("Hoodie — L"), "Hoodie");
        assert_eq!(normalize_size("Baby Onesie — NB"), "Baby - NB");
    }

    #[test]
    fn test_unknown_category_passes_through() {
        assert_eq!(normalize_size("  Adult Tee - L  "), "Adult Tee - L");
        assert_eq!(normalize_size("One Size"), "One Size");
        assert_eq!(detect_category("Adult Tee - L"), None);
        assert_eq!(normalize_size(""), "");
    }

    #[test]
    fn test_every_category_reachable() {
        let samples = [
            "Short Sleeve - S",
            "Short Sleeve V-Neck - S",
            "Tank Top - S",
            "Sweatshirt - S",
            "Long Sleeve - S",
            "Hoodie - S",
            "Youth - S",
            "Toddler - 2T",
            "Baby - NB",
        ];
        for (sample, category) in samples.iter().zip(Category::ALL) {
            assert_eq!(detect_category(sample), Some(category), "{sample}");
        }
    }
}
