//! The bordered header/footer every complaint letter is wrapped in, plus the
//! fixed template letter bodies.
//!
//! The layout is the same for both generation paths; only the body and the
//! category change.

use chrono::{DateTime, TimeZone, Timelike};
use std::fmt::Display;

use crate::domain::Language;

const BORDER: &str = "═══════════════════════════════════════════════════";
const TITLE_INDENT: &str = "                    ";

struct EnvelopeLabels {
    title: &'static str,
    reference: &'static str,
    date: &'static str,
    time: &'static str,
    category: &'static str,
    status: &'static str,
}

const ENGLISH_LABELS: EnvelopeLabels = EnvelopeLabels {
    title: "COMPLAINT LETTER",
    reference: "Complaint ID",
    date: "Date",
    time: "Time",
    category: "Category",
    status: "Status: PENDING REVIEW",
};

const TAMIL_LABELS: EnvelopeLabels = EnvelopeLabels {
    title: "புகார் கடிதம்",
    reference: "புகார் எண்",
    date: "தேதி",
    time: "நேரம்",
    category: "வகை",
    status: "நிலை: மதிப்பாய்வு நிலுவையில் உள்ளது",
};

fn labels_for(language: Language) -> &'static EnvelopeLabels {
    match language {
        Language::En => &ENGLISH_LABELS,
        Language::Ta => &TAMIL_LABELS,
    }
}

/// `October 19, 2026` / `19/10/2026`
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>, language: Language) -> String
where
    Tz::Offset: Display,
{
    match language {
        Language::En => at.format("%B %-d, %Y").to_string(),
        Language::Ta => at.format("%-d/%-m/%Y").to_string(),
    }
}

/// `02:30 PM` / `பிற்பகல் 02:30`
pub fn format_time<Tz: TimeZone>(at: &DateTime<Tz>, language: Language) -> String
where
    Tz::Offset: Display,
{
    match language {
        Language::En => at.format("%I:%M %p").to_string(),
        Language::Ta => {
            let period = if at.hour() < 12 { "முற்பகல்" } else { "பிற்பகல்" };
            format!("{} {}", period, at.format("%I:%M"))
        }
    }
}

/// Wraps `body` in the bordered complaint envelope.
pub fn render_envelope<Tz: TimeZone>(
    reference: &str,
    category: &str,
    body: &str,
    at: &DateTime<Tz>,
    language: Language,
) -> String
where
    Tz::Offset: Display,
{
    let labels = labels_for(language);
    format!(
        "{border}\n{indent}{title}\n{border}\n\n\
         {ref_label}: {reference}\n\
         {date_label}: {date}\n\
         {time_label}: {time}\n\
         {cat_label}: {category}\n\n\
         {border}\n\n\
         {body}\n\n\
         {border}\n{status}\n{border}",
        border = BORDER,
        indent = TITLE_INDENT,
        title = labels.title,
        ref_label = labels.reference,
        reference = reference,
        date_label = labels.date,
        date = format_date(at, language),
        time_label = labels.time,
        time = format_time(at, language),
        cat_label = labels.category,
        category = category,
        body = body,
        status = labels.status,
    )
}

/// The fixed letter used when no completion is available; `description` is the user's text.
pub fn template_body(category: &str, description: &str, language: Language) -> String {
    match language {
        Language::En => format!(
            "To,\n\
             The Municipal Corporation Officer\n\n\
             Subject: Complaint Regarding {category}\n\n\
             Dear Sir/Madam,\n\n\
             I would like to bring to your attention the following matter:\n\n\
             {description}\n\n\
             I kindly request you to look into this matter urgently and take necessary action to resolve this issue at the earliest possible time.\n\n\
             Thank you for your attention to this matter.\n\n\
             Yours sincerely,\n\
             Concerned Citizen"
        ),
        Language::Ta => format!(
            "பெறுநர்,\n\
             நகராட்சி அதிகாரி\n\n\
             பொருள்: {category} தொடர்பான புகார்\n\n\
             அன்புள்ள ஐயா/அம்மா,\n\n\
             பின்வரும் விஷயத்தை உங்கள் கவனத்திற்கு கொண்டு வர விரும்புகிறேன்:\n\n\
             {description}\n\n\
             இந்த விஷயத்தை அவசரமாக பார்த்து தேவையான நடவடிக்கை எடுக்க வேண்டுகிறேன்.\n\n\
             உங்கள் கவனத்திற்கு நன்றி.\n\n\
             இவர்கள் சார்பில்,\n\
             புகார்தாரர்"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn afternoon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 30, 5).unwrap()
    }

    #[test]
    fn english_envelope_snapshot() {
        let letter = render_envelope("CMPTEST1ABCDE", "Road", "Dear Sir,", &afternoon(), Language::En);
        let expected = "\
═══════════════════════════════════════════════════
                    COMPLAINT LETTER
═══════════════════════════════════════════════════

Complaint ID: CMPTEST1ABCDE
Date: October 19, 2026
Time: 02:30 PM
Category: Road

═══════════════════════════════════════════════════

Dear Sir,

═══════════════════════════════════════════════════
Status: PENDING REVIEW
═══════════════════════════════════════════════════";
        assert_eq!(letter, expected);
    }

    #[test]
    fn tamil_envelope_snapshot() {
        let morning = FixedOffset::east_opt(5 * 3600 + 1800)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 7, 9, 5, 0)
            .unwrap();
        let letter = render_envelope("CMPX", "சாலை", "ஐயா,", &morning, Language::Ta);
        let expected = "\
═══════════════════════════════════════════════════
                    புகார் கடிதம்
═══════════════════════════════════════════════════

புகார் எண்: CMPX
தேதி: 7/3/2026
நேரம்: முற்பகல் 09:05
வகை: சாலை

═══════════════════════════════════════════════════

ஐயா,

═══════════════════════════════════════════════════
நிலை: மதிப்பாய்வு நிலுவையில் உள்ளது
═══════════════════════════════════════════════════";
        assert_eq!(letter, expected);
    }

    #[test]
    fn formats_dates_and_times() {
        let at = afternoon();
        assert_eq!(format_date(&at, Language::En), "October 19, 2026");
        assert_eq!(format_date(&at, Language::Ta), "19/10/2026");
        assert_eq!(format_time(&at, Language::Ta), "பிற்பகல் 02:30");
        let midnight = Utc.with_ymd_and_hms(2026, 1, 2, 0, 7, 0).unwrap();
        assert_eq!(format_time(&midnight, Language::En), "12:07 AM");
    }

    #[test]
    fn template_body_quotes_user_text() {
        let body = template_body("Water Supply", "no water since Monday", Language::En);
        assert!(body.starts_with("To,\nThe Municipal Corporation Officer"));
        assert!(body.contains("Subject: Complaint Regarding Water Supply"));
        assert!(body.contains("\n\nno water since Monday\n\n"));
        assert!(body.ends_with("Yours sincerely,\nConcerned Citizen"));

        let body = template_body("குப்பை", "குப்பை நிறைந்துள்ளது", Language::Ta);
        assert!(body.contains("பொருள்: குப்பை தொடர்பான புகார்"));
        assert!(body.contains("குப்பை நிறைந்துள்ளது"));
    }
}
