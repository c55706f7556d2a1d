//! Instruction prompts sent to the completion service.

use crate::domain::Language;

const ENGLISH_PROMPT_TEMPLATE: &str = r#"You are a professional complaint letter writing assistant. The user has provided the following complaint:

"{text}"

Your task:
1. Identify the complaint category (Water Supply, Electricity, Road, Garbage, Drainage, Street Light, etc.)
2. Convert this EXACT complaint into a formal letter format in English
3. Use the ACTUAL details from the user's text - do not add generic information
4. Keep the user's specific concerns, locations, names, dates, and all details mentioned
5. Add proper greeting and closing
6. Make it professional while preserving the user's original complaint details

IMPORTANT: Base the complaint ONLY on what the user said. Do not write a generic template or add placeholder information like [City Name] or [Complainant].

Format the response as:
CATEGORY: [Category in English]
---
[Full complaint letter in English based on user's actual text]"#;

const TAMIL_PROMPT_TEMPLATE: &str = r#"You are a Tamil complaint letter writing assistant. The user has provided the following complaint text in Tamil:

"{text}"

Your task:
1. Identify the complaint category (தண்ணீர், மின்சாரம், சாலை, குப்பை, வடிகால், தெரு விளக்கு, etc.)
2. Convert this EXACT complaint into a formal letter format in Tamil
3. Use the ACTUAL details from the user's text - do not add generic information
4. Keep the user's specific concerns, locations, and details
5. Add proper greeting and closing
6. Make it professional while preserving the user's original complaint details

IMPORTANT: Base the complaint ONLY on what the user said. Do not write a generic template or add placeholder information.

Format the response as:
CATEGORY: [Category in Tamil]
---
[Full complaint letter in Tamil based on user's actual text]"#;

/// Builds the single user message for the completion service, embedding `text` verbatim.
pub fn build_prompt(text: &str, language: Language) -> String {
    let template = match language {
        Language::En => ENGLISH_PROMPT_TEMPLATE,
        Language::Ta => TAMIL_PROMPT_TEMPLATE,
    };
    template.replace("{text}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_text_verbatim() {
        let prompt = build_prompt("Pothole near bus stand, 2nd cross", Language::En);
        assert!(prompt.contains("\"Pothole near bus stand, 2nd cross\""));
        assert!(prompt.contains("CATEGORY: [Category in English]\n---\n"));
        assert!(prompt.contains("[City Name]"));
    }

    #[test]
    fn tamil_prompt_lists_tamil_categories() {
        let prompt = build_prompt("தெரு விளக்கு எரியவில்லை", Language::Ta);
        assert!(prompt.contains("\"தெரு விளக்கு எரியவில்லை\""));
        assert!(prompt.contains("வடிகால்"));
        assert!(prompt.contains("CATEGORY: [Category in Tamil]"));
    }
}
