//! Static UI string table keyed by locale and dotted key.
//!
//! Lookups fall back to the default locale and then to the key itself, so a
//! missing translation shows up on the page as its key rather than as an
//! empty string.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::locale::Locale;

const EN: &[(&str, &str)] = &[
    // Navigation
    ("nav.home", "Home"),
    ("nav.services", "Services"),
    ("nav.about", "About Us"),
    ("nav.testimonials", "Testimonials"),
    ("nav.blog", "Blog"),
    ("nav.contact", "Contact"),
    ("nav.privacy", "Privacy Policy"),
    ("nav.terms", "Terms of Service"),
    ("nav.cookies", "Cookie Policy"),
    // Hero
    ("hero.badge", "Strategic Business Advisory"),
    ("hero.title", "Strategic Advisory for Visionary Leaders"),
    (
        "hero.subtitle",
        "Empowering CEOs and founders with expert guidance on investment, startup evaluation, and business strategy.",
    ),
    ("hero.cta", "Get Started"),
    // Services
    ("services.title", "Our Services"),
    ("services.investment.title", "Investment Advisory"),
    (
        "services.investment.description",
        "Expert guidance on funding strategies and investor relations.",
    ),
    ("services.evaluation.title", "Startup Evaluation"),
    (
        "services.evaluation.description",
        "Comprehensive assessment of startup potential and market viability.",
    ),
    ("services.strategy.title", "Business Strategy"),
    (
        "services.strategy.description",
        "Strategic planning and execution for sustainable growth.",
    ),
    // About
    ("about.title", "About Skyadvisers"),
    (
        "about.description",
        "We are a team of experienced advisors dedicated to helping CEOs and founders navigate the complex world of business strategy and investment.",
    ),
    // Clients
    ("clients.title", "Our Clients"),
    // Blog
    ("blog.title", "Insights & Expertise"),
    (
        "blog.subtitle",
        "Stay informed with the latest insights on business strategy, investment trends, and startup guidance from our expert advisors.",
    ),
    ("blog.search", "Search articles..."),
    ("blog.readMore", "Read more"),
    ("blog.backToBlog", "Back to Blog"),
    ("blog.moreArticles", "More Articles"),
    ("blog.empty", "No articles found."),
    ("blog.notFound", "Article not found"),
    // Contact
    ("contact.title", "Get In Touch"),
    ("contact.name", "Name"),
    ("contact.email", "Email"),
    ("contact.message", "Message"),
    ("contact.submit", "Send Message"),
    ("contact.phone", "Phone"),
    ("contact.address", "Address"),
    // Footer
    ("footer.address", "123 Business District, Tel Aviv, Israel"),
    ("footer.phone", "+972-3-123-4567"),
    ("footer.email", "info@skyadvisers.com"),
    ("footer.rights", "All rights reserved."),
    // Legal pages
    ("legal.questions", "Questions about this page? Contact us:"),
    // Errors
    ("notFound.title", "Page not found"),
];

const HE: &[(&str, &str)] = &[
    ("nav.home", "בית"),
    ("nav.services", "שירותים"),
    ("nav.about", "אודותינו"),
    ("nav.testimonials", "המלצות"),
    ("nav.blog", "בלוג"),
    ("nav.contact", "צור קשר"),
    ("nav.privacy", "מדיניות פרטיות"),
    ("nav.terms", "תנאי שימוש"),
    ("nav.cookies", "מדיניות עוגיות"),
    ("hero.badge", "ייעוץ עסקי אסטרטגי"),
    ("hero.title", "ייעוץ אסטרטגי למנהיגים בעלי חזון"),
    (
        "hero.subtitle",
        "מעצימים מנכ״לים ומייסדים עם הדרכה מומחית בהשקעות, הערכת סטארט-אפים ואסטרטגיה עסקית.",
    ),
    ("hero.cta", "התחל עכשיו"),
    ("services.title", "השירותים שלנו"),
    ("services.investment.title", "ייעוץ השקעות"),
    ("services.investment.description", "הדרכה מומחית באסטרטגיות מימון ויחסי משקיעים."),
    ("services.evaluation.title", "הערכת סטארט-אפים"),
    ("services.evaluation.description", "הערכה מקיפה של פוטנציאל סטארט-אפים וכדאיות שוק."),
    ("services.strategy.title", "אסטרטגיה עסקית"),
    ("services.strategy.description", "תכנון אסטרטגי וביצוע לצמיחה בת קיימא."),
    ("about.title", "אודות Skyadvisers"),
    (
        "about.description",
        "אנחנו צוות של יועצים מנוסים המוקדשים לעזור למנכ״לים ומייסדים לנווט בעולם המורכב של אסטרטגיה עסקית והשקעות.",
    ),
    ("clients.title", "הלקוחות שלנו"),
    ("blog.title", "בלוג"),
    (
        "blog.subtitle",
        "הישארו מעודכנים עם התובנות האחרונות על אסטרטגיה עסקית, מגמות השקעה והדרכת סטארט-אפים מהיועצים המומחים שלנו.",
    ),
    ("blog.search", "חפש מאמרים..."),
    ("blog.readMore", "קרא עוד"),
    ("blog.backToBlog", "חזור לבלוג"),
    ("blog.moreArticles", "מאמרים נוספים"),
    ("blog.empty", "לא נמצאו מאמרים."),
    ("blog.notFound", "המאמר לא נמצא"),
    ("contact.title", "צור קשר"),
    ("contact.name", "שם"),
    ("contact.email", "אימייל"),
    ("contact.message", "הודעה"),
    ("contact.submit", "שלח הודעה"),
    ("contact.phone", "טלפון"),
    ("contact.address", "כתובת"),
    ("footer.address", "רחוב העסקים 123, תל אביב, ישראל"),
    ("footer.phone", "+972-3-123-4567"),
    ("footer.email", "info@skyadvisers.com"),
    ("footer.rights", "כל הזכויות שמורות."),
    ("legal.questions", "שאלות לגבי עמוד זה? צרו קשר:"),
    ("notFound.title", "הדף לא נמצא"),
];

type Table = HashMap<&'static str, &'static str>;

static TABLES: OnceLock<[Table; 2]> = OnceLock::new();

fn tables() -> &'static [Table; 2] {
    TABLES.get_or_init(|| [EN.iter().copied().collect(), HE.iter().copied().collect()])
}

fn table(locale: Locale) -> &'static Table {
    match locale {
        Locale::En => &tables()[0],
        Locale::He => &tables()[1],
    }
}

/// Look up a UI string. Falls back to the default locale, then to the key.
pub fn translate(locale: Locale, key: &str) -> &str {
    table(locale)
        .get(key)
        .or_else(|| table(Locale::DEFAULT).get(key))
        .copied()
        .unwrap_or(key)
}

/// Whether `key` has an entry for `locale` without falling back.
pub fn has_key(locale: Locale, key: &str) -> bool {
    table(locale).contains_key(key)
}
