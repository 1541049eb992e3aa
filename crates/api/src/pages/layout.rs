use advisory_site_core::editor::Capability;
use advisory_site_core::i18n::translate;
use advisory_site_core::settings::PublicContactInfo;
use advisory_site_core::Locale;
use chrono::{Datelike, Utc};
use maud::{html, Markup, DOCTYPE};

/// Per-request values every page shares.
pub struct Chrome<'a> {
    pub locale: Locale,
    pub capability: Capability,
    pub contact: &'a PublicContactInfo,
    /// Path below the locale prefix, without a leading slash (`blog/x`).
    pub current: &'a str,
}

impl Chrome<'_> {
    pub fn t<'k>(&self, key: &'k str) -> &'k str {
        translate(self.locale, key)
    }

    /// Link to `path` (no leading slash) in this page's locale.
    pub fn href(&self, path: &str) -> String {
        localized_href(self.locale, path)
    }
}

pub fn localized_href(locale: Locale, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("/{}", locale.code())
    } else if path.starts_with('#') {
        format!("/{}{path}", locale.code())
    } else {
        format!("/{}/{path}", locale.code())
    }
}

const NAV: &[(&str, &str)] = &[
    ("nav.home", ""),
    ("nav.services", "services"),
    ("nav.about", "#about"),
    ("nav.testimonials", "testimonials"),
    ("nav.blog", "blog"),
    ("nav.contact", "contact"),
];

pub fn document(chrome: &Chrome<'_>, title: &str, content: Markup) -> Markup {
    let business = chrome.contact.business_name.as_str();
    let full_title = if title.is_empty() {
        business.to_string()
    } else {
        format!("{title} | {business}")
    };
    let editor = chrome.capability.can_edit();
    html! {
        (DOCTYPE)
        html lang=(chrome.locale.code()) dir=(chrome.locale.dir()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                @for alt in Locale::ALL {
                    link rel="alternate" hreflang=(alt.code()) href=(localized_href(alt, chrome.current));
                }
            }
            body data-locale=(chrome.locale.code()) data-capability=[editor.then_some("editor")] {
                (site_header(chrome))
                main { (content) }
                (site_footer(chrome))
            }
        }
    }
}

fn site_header(chrome: &Chrome<'_>) -> Markup {
    let alternate = chrome.locale.alternate();
    let section = chrome.current.split('/').next().unwrap_or_default();
    html! {
        header.site-header {
            a.brand href=(chrome.href("")) { (chrome.contact.business_name) }
            nav.site-nav {
                ul {
                    @for (key, path) in NAV {
                        @let current = !path.is_empty() && !path.starts_with('#') && *path == section;
                        li class=[current.then_some("current")] {
                            a href=(chrome.href(path)) { (chrome.t(key)) }
                        }
                    }
                }
            }
            a.language-switch href=(localized_href(alternate, chrome.current)) hreflang=(alternate.code()) {
                (alternate.native_name())
            }
        }
    }
}

fn site_footer(chrome: &Chrome<'_>) -> Markup {
    let contact = chrome.contact;
    let year = Utc::now().year();
    html! {
        footer.site-footer {
            section.footer-contact {
                h3 { (contact.business_name) }
                dl {
                    dt { (chrome.t("footer.address")) }
                    dd { (contact.address) }
                    dt { (chrome.t("footer.phone")) }
                    dd { a href={ "tel:" (contact.phone.replace(' ', "")) } { (contact.phone) } }
                    dt { (chrome.t("footer.email")) }
                    dd { a href={ "mailto:" (contact.email) } { (contact.email) } }
                }
            }
            @let social = contact.social_links.present();
            @if !social.is_empty() {
                ul.social-links {
                    @for (network, url) in social {
                        li { a href=(url) rel="noopener" target="_blank" data-network=(network) { (network) } }
                    }
                }
            }
            p.legal {
                "© " (year) " " (contact.business_name) ". " (chrome.t("footer.rights"))
                " · "
                a href=(chrome.href("privacy-policy")) { (chrome.t("nav.privacy")) }
                " · "
                a href=(chrome.href("terms-of-service")) { (chrome.t("nav.terms")) }
                " · "
                a href=(chrome.href("cookie-policy")) { (chrome.t("nav.cookies")) }
            }
        }
    }
}
