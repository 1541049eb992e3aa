//! Default content for every section, indexed by locale.
//!
//! Served (never persisted) whenever a section document does not exist yet,
//! and used as the base of the first write to a section.

use serde_json::{json, Map, Value};

use super::Section;
use crate::i18n::translate;
use crate::locale::Locale;

/// Home page blocks in their initial order.
pub const PAGE_SECTIONS: &[(&str, &str, &str)] = &[
    ("hero", "Hero Section", "Hero Section"),
    ("about", "About Us", "About Us"),
    ("services", "Services", "Services"),
    ("clients", "Clients", "Our Clients"),
    ("testimonials", "Testimonials", "Testimonials"),
    ("contact", "Contact", "Contact"),
];

pub fn for_section(section: Section, locale: Locale) -> Map<String, Value> {
    let value = match section {
        Section::Hero => hero(locale),
        Section::About => about(locale),
        Section::Services => services(locale),
        Section::Clients => json!({ "clients": [] }),
        Section::Testimonials => testimonials(locale),
        Section::Landing => landing(locale),
        Section::Privacy => privacy(),
        Section::PageSections => page_sections(),
    };
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn pick(locale: Locale, en: &'static str, he: &'static str) -> &'static str {
    match locale {
        Locale::En => en,
        Locale::He => he,
    }
}

fn hero(locale: Locale) -> Value {
    json!({
        "badge": translate(locale, "hero.badge"),
        "title": translate(locale, "hero.title"),
        "subtitle": translate(locale, "hero.subtitle"),
        "description": "",
        "ctaLabel": translate(locale, "hero.cta"),
        "imageUrl": "",
        "imagePath": "",
    })
}

fn about(locale: Locale) -> Value {
    json!({
        "sectionTitle": pick(locale, "About Us", "אודותינו"),
        "sectionSubtitle": pick(
            locale,
            "Experienced professionals dedicated to your success",
            "אנשי מקצוע מנוסים המוקדשים להצלחה שלכם",
        ),
        "description": pick(
            locale,
            "With years of experience in business advisory, we help companies navigate complex challenges and achieve sustainable growth. Our team brings deep industry knowledge and proven results.",
            "עם שנים של ניסיון בייעוץ עסקי, אנחנו עוזרים לחברות לנווט באתגרים מורכבים ולהשיג צמיחה בת קיימא. הצוות שלנו מביא ידע עמוק בתעשייה ותוצאות מוכחות.",
        ),
        "aboutImageUrl": "",
        "aboutImagePath": "",
        "features": [
            {
                "id": "expertise",
                "title": pick(locale, "Expert Team", "צוות מומחים"),
                "description": pick(
                    locale,
                    "Seasoned professionals with decades of combined experience",
                    "אנשי מקצוע ותיקים עם עשורים של ניסיון מצטבר",
                ),
            },
            {
                "id": "results",
                "title": pick(locale, "Proven Results", "תוצאות מוכחות"),
                "description": pick(
                    locale,
                    "Track record of successful exits and funding rounds",
                    "רקורד של אקזיטים מוצלחים וסבבי גיוס",
                ),
            },
            {
                "id": "global",
                "title": pick(locale, "Global Presence", "נוכחות גלובלית"),
                "description": pick(
                    locale,
                    "International network of investors and partnerships",
                    "רשת בינלאומית של משקיעים ושיתופי פעולה",
                ),
            },
        ],
    })
}

fn services(locale: Locale) -> Value {
    let item = |id: &str| {
        json!({
            "id": id,
            "title": translate(locale, &format!("services.{id}.title")),
            "description": translate(locale, &format!("services.{id}.description")),
            "imageUrl": "",
            "imagePath": "",
        })
    };
    json!({
        "sectionTitle": translate(locale, "services.title"),
        "services": [item("investment"), item("evaluation"), item("strategy")],
    })
}

fn testimonials(locale: Locale) -> Value {
    json!({
        "sectionTitle": pick(locale, "Testimonials", "המלצות"),
        "sectionSubtitle": pick(
            locale,
            "What our clients say about working with us",
            "מה הלקוחות שלנו אומרים על העבודה איתנו",
        ),
        "testimonials": [
            {
                "id": "testimonial_1",
                "name": "Sarah Chen",
                "title": pick(locale, "CEO, TechFlow", "מנכ״לית, TechFlow"),
                "content": pick(
                    locale,
                    "Skyadvisers helped us navigate our Series A funding round with exceptional professionalism. Their strategic guidance was invaluable.",
                    "Skyadvisers סייעו לנו לנווט את סבב גיוס ה‑Series A במקצועיות יוצאת דופן. ההכוונה האסטרטגית שלהם הייתה בלתי‑החלפה.",
                ),
                "rating": 5,
            },
            {
                "id": "testimonial_2",
                "name": "David Rodriguez",
                "title": pick(locale, "Founder, InnovateLab", "מייסד, InnovateLab"),
                "content": pick(
                    locale,
                    "The team's deep understanding of the startup ecosystem and investor mindset made all the difference in our growth strategy.",
                    "ההבנה העמוקה של הצוות את אקוסיסטם הסטארטאפים ואת מחשבת המשקיעים עשתה את כל ההבדל באסטרטגיית הצמיחה שלנו.",
                ),
                "rating": 5,
            },
            {
                "id": "testimonial_3",
                "name": "Rachel Kim",
                "title": pick(locale, "CEO, DataVision", "מנכ״לית, DataVision"),
                "content": pick(
                    locale,
                    "Professional, sharp, and results-oriented. Skyadvisers exceeded all expectations in every aspect of their service.",
                    "מקצועיים, חדים ומוכווני תוצאות. Skyadvisers עלו על כל הציפיות בכל היבט של השירות.",
                ),
                "rating": 5,
            },
        ],
    })
}

fn landing(locale: Locale) -> Value {
    json!({
        "heroTitle": "",
        "heroSubtitle": "",
        "heroDescription": pick(
            locale,
            "We provide expert guidance to help your business grow and succeed in today's competitive market.",
            "אנחנו מספקים הדרכה מומחית לעזור לעסק שלכם לגדול ולהצליח בשוק התחרותי של היום.",
        ),
        "heroImageUrl": "",
        "heroImagePath": "",
        "servicesTitle": pick(locale, "Our Services", "השירותים שלנו"),
        "servicesSubtitle": pick(
            locale,
            "Comprehensive business solutions tailored to your needs",
            "פתרונות עסקיים מקיפים המותאמים לצרכים שלכם",
        ),
        "aboutTitle": pick(locale, "About Us", "אודותינו"),
        "aboutSubtitle": pick(
            locale,
            "Experienced professionals dedicated to your success",
            "אנשי מקצוע מנוסים המוקדשים להצלחה שלכם",
        ),
        "aboutDescription": pick(
            locale,
            "With years of experience in business advisory, we help companies navigate complex challenges and achieve sustainable growth.",
            "עם שנים של ניסיון בייעוץ עסקי, אנחנו עוזרים לחברות לנווט באתגרים מורכבים ולהשיג צמיחה בת קיימא.",
        ),
        "testimonialsTitle": pick(locale, "What Our Clients Say", "מה הלקוחות שלנו אומרים"),
        "testimonialsSubtitle": pick(
            locale,
            "Success stories from businesses we've helped",
            "סיפורי הצלחה מעסקים שעזרנו להם",
        ),
        "contactTitle": pick(locale, "Get In Touch", "צור קשר"),
        "contactSubtitle": pick(
            locale,
            "Ready to take your business to the next level?",
            "מוכנים לקחת את העסק שלכם לשלב הבא?",
        ),
        "contactDescription": pick(
            locale,
            "Contact us today to discuss how we can help your business grow and succeed.",
            "צרו איתנו קשר היום כדי לדון איך אנחנו יכולים לעזור לעסק שלכם לגדול ולהצליח.",
        ),
    })
}

fn privacy() -> Value {
    json!({
        "introduction": "At Skyadvisers, we are committed to protecting your privacy and personal information. This Privacy Policy explains how we collect, use, and safeguard your information when you visit our website.",
        "informationWeCollect": "We collect personal information such as name, contact information, business information, and project details. We also automatically collect technical information including IP address, browser type, and pages visited.",
        "howWeUseInfo": "We use the information we collect to provide and improve our advisory services, respond to inquiries, send relevant updates, analyze website usage, comply with legal obligations, and protect against fraud.",
        "informationSharing": "We do not sell, trade, or rent your personal information to third parties. We may share your information only with your explicit consent, to comply with legal requirements, to protect our rights, or with trusted service providers.",
        "dataSecurity": "We implement appropriate security measures including encryption of sensitive data, secure servers and databases, regular security audits, and limited access to personal information.",
        "yourRights": "You have the right to access and review your personal information, request corrections to inaccurate data, request deletion of your personal information, opt-out of marketing communications, and receive a copy of your data.",
        "cookiesTracking": "We use cookies and similar tracking technologies to enhance your browsing experience. These technologies help us understand how you interact with our website and improve our services. You can control cookies through your browser settings.",
        "thirdPartyServices": "Our website may contain links to third-party websites or integrate with third-party services. We are not responsible for the privacy practices of these external sites.",
        "changesToPolicy": "We may update this Privacy Policy from time to time. We will notify you of any significant changes by posting the new policy on this page and updating the 'Last updated' date.",
    })
}

fn page_sections() -> Value {
    let sections: Vec<Value> = PAGE_SECTIONS
        .iter()
        .zip(1u32..)
        .map(|((id, name, title), order)| {
            json!({ "id": id, "name": name, "title": title, "enabled": true, "order": order })
        })
        .collect();
    json!({ "sections": sections })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::validate::check_item_ids;

    #[test]
    fn every_section_has_object_defaults_with_valid_ids() {
        for section in Section::ALL {
            for locale in Locale::ALL {
                let content = for_section(section, locale);
                assert!(!content.is_empty(), "{section:?}/{locale} defaults are empty");
                check_item_ids(&content).unwrap();
            }
        }
    }

    #[test]
    fn localized_defaults_differ() {
        let en = for_section(Section::About, Locale::En);
        let he = for_section(Section::About, Locale::He);
        assert_eq!(en["sectionTitle"], "About Us");
        assert_eq!(he["sectionTitle"], "אודותינו");
    }

    #[test]
    fn page_sections_are_numbered_from_one() {
        let content = for_section(Section::PageSections, Locale::En);
        let orders: Vec<u64> = content["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["order"].as_u64().unwrap())
            .collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
    }
}
