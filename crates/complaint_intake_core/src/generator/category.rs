//! Keyword-based category detection used by the template path.
//!
//! The tables are ordered: the first group with any keyword contained in the
//! lowercased text wins, so `"water and garbage"` is a water complaint.

use crate::domain::Language;

struct CategoryRule {
    name: &'static str,
    keywords: &'static [&'static str],
}

static ENGLISH_RULES: &[CategoryRule] = &[
    CategoryRule {
        name: "Water Supply",
        keywords: &["water", "supply", "tap"],
    },
    CategoryRule {
        name: "Electricity",
        keywords: &["electricity", "power", "current"],
    },
    CategoryRule {
        name: "Road",
        keywords: &["road", "street", "pothole"],
    },
    CategoryRule {
        name: "Garbage",
        keywords: &["garbage", "waste", "trash"],
    },
    CategoryRule {
        name: "Drainage",
        keywords: &["drainage", "sewage", "drain"],
    },
    CategoryRule {
        name: "Street Light",
        keywords: &["light", "lamp", "street light"],
    },
];

static TAMIL_RULES: &[CategoryRule] = &[
    CategoryRule {
        name: "தண்ணீர்",
        keywords: &["தண்ணீர்", "குழாய்"],
    },
    CategoryRule {
        name: "மின்சாரம்",
        keywords: &["மின்சாரம்", "கரண்ட்"],
    },
    CategoryRule {
        name: "சாலை",
        keywords: &["சாலை", "தெரு"],
    },
    CategoryRule {
        name: "குப்பை",
        keywords: &["குப்பை", "கழிவு"],
    },
    CategoryRule {
        name: "வடிகால்",
        keywords: &["வடிகால்", "சாக்கடை"],
    },
    CategoryRule {
        name: "தெரு விளக்கு",
        keywords: &["விளக்கு", "தெரு விளக்கு"],
    },
];

fn rules_for(language: Language) -> &'static [CategoryRule] {
    match language {
        Language::En => ENGLISH_RULES,
        Language::Ta => TAMIL_RULES,
    }
}

/// Returns the first matching category name, or the language's default category.
pub fn detect_category(text: &str, language: Language) -> &'static str {
    let lowered = text.to_lowercase();
    rules_for(language)
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|rule| rule.name)
        .unwrap_or_else(|| language.default_category())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_water_supply() {
        assert_eq!(
            detect_category("no water supply in my street for 3 days", Language::En),
            "Water Supply"
        );
    }

    #[test]
    fn first_group_wins_over_later_groups() {
        assert_eq!(
            detect_category("Garbage is floating in the WATER", Language::En),
            "Water Supply"
        );
    }

    #[test]
    fn street_matches_road_before_street_light() {
        assert_eq!(
            detect_category("the street light is broken", Language::En),
            "Road"
        );
        assert_eq!(detect_category("lamp post fell", Language::En), "Street Light");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(detect_category("POWER CUT since morning", Language::En), "Electricity");
    }

    #[test]
    fn falls_back_to_default_category() {
        assert_eq!(detect_category("my neighbour is noisy", Language::En), "Other");
        assert_eq!(detect_category("சத்தம் அதிகமாக உள்ளது", Language::Ta), "பிற");
    }

    #[test]
    fn detects_tamil_categories() {
        assert_eq!(
            detect_category("எங்கள் பகுதியில் மூன்று நாட்களாக தண்ணீர் வரவில்லை", Language::Ta),
            "தண்ணீர்"
        );
        assert_eq!(detect_category("குப்பை அகற்றப்படவில்லை", Language::Ta), "குப்பை");
    }
}
