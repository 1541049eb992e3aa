//! Fixed copy for the terms of service and cookie policy pages.
//!
//! Unlike the privacy policy these pages are not editable from the admin.
//! `{business}` in any clause is replaced with the configured business name.

use advisory_site_core::Locale;

pub struct Clause {
    pub heading: &'static str,
    pub body: &'static str,
    pub items: &'static [&'static str],
}

const fn clause(heading: &'static str, body: &'static str, items: &'static [&'static str]) -> Clause {
    Clause { heading, body, items }
}

const TERMS_EN: &[Clause] = &[
    clause(
        "Acceptance of Terms",
        "By accessing and using the {business} website and services, you accept and agree to be bound by these terms. If you do not agree, please do not use this service.",
        &[],
    ),
    clause(
        "Description of Service",
        "{business} provides business advisory services, including:",
        &[
            "Business strategy consulting",
            "Investment advisory services",
            "Startup guidance and mentorship",
            "Market analysis and pricing strategies",
            "Financial planning and advisory",
        ],
    ),
    clause(
        "User Responsibilities",
        "As a user of our services, you agree to:",
        &[
            "Provide accurate and truthful information",
            "Use our services for lawful purposes only",
            "Respect intellectual property rights",
            "Maintain the confidentiality of any proprietary information",
        ],
    ),
    clause(
        "Intellectual Property",
        "All content on this website, including text, graphics, logos and images, is the property of {business} or its licensors. You may not reproduce or distribute any content without our written permission.",
        &[],
    ),
    clause(
        "Limitation of Liability",
        "To the maximum extent permitted by law, {business} shall not be liable for any indirect, incidental or consequential damages arising from your use of our services.",
        &[],
    ),
    clause(
        "Termination",
        "We may suspend or terminate your access to our services at any time if you breach these terms.",
        &[],
    ),
    clause(
        "Changes to Terms",
        "We may modify these terms at any time by posting the new terms on this page. Continued use of our services after a change constitutes acceptance of the updated terms.",
        &[],
    ),
];

const TERMS_HE: &[Clause] = &[
    clause(
        "קבלת התנאים",
        "בגישה לאתר ולשירותים של {business} ובשימוש בהם, הנכם מסכימים להיות כפופים לתנאים אלה. אם אינכם מסכימים, אנא הימנעו משימוש בשירות.",
        &[],
    ),
    clause(
        "תיאור השירות",
        "{business} מספקת שירותי ייעוץ עסקי, ובהם:",
        &[
            "ייעוץ באסטרטגיה עסקית",
            "ייעוץ השקעות",
            "הכוונה וליווי לסטארט-אפים",
            "ניתוח שוק ואסטרטגיות תמחור",
            "תכנון וייעוץ פיננסי",
        ],
    ),
    clause(
        "אחריות המשתמש",
        "כמשתמשים בשירותינו, הנכם מתחייבים:",
        &[
            "למסור מידע מדויק ואמיתי",
            "להשתמש בשירותים למטרות חוקיות בלבד",
            "לכבד זכויות קניין רוחני",
            "לשמור על סודיות כל מידע קנייני",
        ],
    ),
    clause(
        "קניין רוחני",
        "כל התוכן באתר, לרבות טקסט, גרפיקה, סמלילים ותמונות, הוא רכושה של {business} או של בעלי הרישיון שלה. אין להעתיק או להפיץ תוכן ללא אישור בכתב.",
        &[],
    ),
    clause(
        "הגבלת אחריות",
        "במידה המרבית המותרת בחוק, {business} לא תישא באחריות לנזקים עקיפים, מקריים או תוצאתיים הנובעים משימוש בשירותינו.",
        &[],
    ),
    clause(
        "סיום השימוש",
        "אנו רשאים להשעות או להפסיק את הגישה לשירותינו בכל עת אם תנאים אלה הופרו.",
        &[],
    ),
    clause(
        "שינויים בתנאים",
        "אנו רשאים לעדכן תנאים אלה בכל עת באמצעות פרסומם בעמוד זה. המשך השימוש בשירותינו לאחר שינוי מהווה הסכמה לתנאים המעודכנים.",
        &[],
    ),
];

const COOKIES_EN: &[Clause] = &[
    clause(
        "What Are Cookies",
        "Cookies are small text files placed on your device when you visit our website. They remember your preferences and help us understand how the site is used.",
        &[],
    ),
    clause(
        "How We Use Cookies",
        "{business} uses the following kinds of cookies:",
        &[
            "Essential cookies, needed for the website to function",
            "Analytics cookies, which show how visitors use the site",
            "Preference cookies, which remember your language and settings",
        ],
    ),
    clause(
        "Managing Cookies",
        "You can control cookies through your browser settings. Most browsers let you view, delete or block them. Disabling some cookies may affect how the website works.",
        &[],
    ),
];

const COOKIES_HE: &[Clause] = &[
    clause(
        "מהן עוגיות",
        "עוגיות הן קבצי טקסט קטנים הנשמרים במכשירכם בעת ביקור באתר. הן זוכרות את העדפותיכם ועוזרות לנו להבין כיצד האתר בשימוש.",
        &[],
    ),
    clause(
        "כיצד אנו משתמשים בעוגיות",
        "{business} משתמשת בסוגי העוגיות הבאים:",
        &[
            "עוגיות חיוניות, הנדרשות לפעולת האתר",
            "עוגיות ניתוח, המראות כיצד מבקרים משתמשים באתר",
            "עוגיות העדפה, הזוכרות את השפה וההגדרות שלכם",
        ],
    ),
    clause(
        "ניהול עוגיות",
        "ניתן לשלוט בעוגיות דרך הגדרות הדפדפן. רוב הדפדפנים מאפשרים לצפות בהן, למחוק או לחסום אותן. השבתת חלק מהעוגיות עלולה להשפיע על פעולת האתר.",
        &[],
    ),
];

pub fn terms(locale: Locale) -> &'static [Clause] {
    match locale {
        Locale::En => TERMS_EN,
        Locale::He => TERMS_HE,
    }
}

pub fn cookies(locale: Locale) -> &'static [Clause] {
    match locale {
        Locale::En => COOKIES_EN,
        Locale::He => COOKIES_HE,
    }
}

pub fn fill(text: &str, business: &str) -> String {
    text.replace("{business}", business)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_locales_carry_the_same_clauses() {
        for locale in Locale::ALL {
            assert_eq!(terms(locale).len(), terms(Locale::DEFAULT).len());
            assert_eq!(cookies(locale).len(), cookies(Locale::DEFAULT).len());
        }
    }

    #[test]
    fn business_name_is_filled_in() {
        assert_eq!(fill("{business} provides", "Sky Advisers"), "Sky Advisers provides");
        assert_eq!(fill("no placeholder", "Sky Advisers"), "no placeholder");
    }
}
