use advisory_site_core::content::models::{
    AboutContent, Client, ClientsContent, HeroContent, PageSection, ServicesContent, TestimonialsContent,
};
use advisory_site_core::content::Section;
use advisory_site_core::i18n::translate;
use advisory_site_core::Locale;
use axum::extract::{Path, State};
use axum::response::Response;
use maud::{html, Markup};

use super::layout::localized_href;
use super::render::{Field, Renderer};
use super::PageContext;
use crate::auth::RenderCapability;
use crate::state::AppState;

/// Section content loaded for one home page render.
struct HomeContent {
    hero: HeroContent,
    about: AboutContent,
    services: ServicesContent,
    clients: ClientsContent,
    testimonials: TestimonialsContent,
}

pub async fn home(
    State(state): State<AppState>,
    Path(code): Path<String>,
    RenderCapability(capability): RenderCapability,
) -> Response {
    let ctx = match PageContext::load(&state, &code, capability).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let locale = ctx.locale;
    let content = state.content();
    let (sections, hero, about, services, clients, testimonials) = futures::join!(
        content.visible_sections(),
        content.load_typed::<HeroContent>(locale),
        content.load_typed::<AboutContent>(locale),
        content.load_typed::<ServicesContent>(locale),
        content.load_typed::<ClientsContent>(locale),
        content.load_typed::<TestimonialsContent>(locale),
    );
    let home = HomeContent {
        hero,
        about,
        services,
        clients,
        testimonials,
    };

    let body = html! {
        @for section in &sections {
            (render_block(&ctx, section, &home))
        }
    };
    ctx.page("", "", body)
}

fn render_block(ctx: &PageContext, section: &PageSection, home: &HomeContent) -> Markup {
    let r = ctx.renderer.as_ref();
    let locale = ctx.locale;
    match section.id.as_str() {
        "hero" => hero_block(r, locale, &home.hero),
        "about" => about_block(r, locale, &home.about),
        "services" => services_block(r, locale, &home.services),
        "clients" => clients_block(locale, &home.clients),
        "testimonials" => testimonials_block(r, locale, &home.testimonials),
        "contact" => contact_block(ctx),
        other => {
            tracing::warn!(section = other, "unknown page section; skipping");
            html! {}
        }
    }
}

pub fn hero_block(r: &dyn Renderer, locale: Locale, hero: &HeroContent) -> Markup {
    let field = |name: &str| Field::line(Section::Hero, locale, name);
    html! {
        section #hero .hero {
            div.hero-text {
                p.badge { (r.text(&field("badge"), &hero.badge)) }
                h1 { (r.text(&field("title"), &hero.title)) }
                h2 { (r.text(&field("subtitle"), &hero.subtitle)) }
                p { (r.text(&Field::block(Section::Hero, locale, "description"), &hero.description)) }
                a.cta href=(localized_href(locale, "#contact")) { (r.text(&field("ctaLabel"), &hero.cta_label)) }
            }
            div.hero-image { (r.image(&field("imageUrl"), &hero.image_url, &hero.title)) }
        }
    }
}

pub fn about_block(r: &dyn Renderer, locale: Locale, about: &AboutContent) -> Markup {
    let field = |name: &str| Field::line(Section::About, locale, name);
    html! {
        section #about .about {
            h2 { (r.text(&field("sectionTitle"), &about.section_title)) }
            p.subtitle { (r.text(&field("sectionSubtitle"), &about.section_subtitle)) }
            div.about-body {
                p { (r.text(&Field::block(Section::About, locale, "description"), &about.description)) }
                (r.image(&field("aboutImageUrl"), &about.about_image_url, &about.section_title))
            }
            ul.features {
                @for feature in &about.features {
                    li {
                        h3 { (r.text(&Field::item(Section::About, locale, "features", &feature.id, "title"), &feature.title)) }
                        p { (r.text(&Field::item(Section::About, locale, "features", &feature.id, "description").multiline(), &feature.description)) }
                    }
                }
            }
        }
    }
}

pub fn services_block(r: &dyn Renderer, locale: Locale, services: &ServicesContent) -> Markup {
    let item = |id: &str, name: &str| Field::item(Section::Services, locale, "services", id, name);
    html! {
        section #services .services {
            h2 { (r.text(&Field::line(Section::Services, locale, "sectionTitle"), &services.section_title)) }
            div.service-grid {
                @for service in &services.services {
                    article.service {
                        (r.image(&item(&service.id, "imageUrl"), &service.image_url, &service.title))
                        h3 { (r.text(&item(&service.id, "title"), &service.title)) }
                        p { (r.text(&item(&service.id, "description").multiline(), &service.description)) }
                    }
                }
            }
        }
    }
}

/// Client logos are shared across locales and carry no edit markup.
pub fn clients_block(locale: Locale, clients: &ClientsContent) -> Markup {
    html! {
        section #clients .clients {
            h2 { (translate(locale, "clients.title")) }
            ul.client-logos {
                @for client in &clients.clients {
                    li {
                        @if client.link.trim().is_empty() {
                            (client_logo(client))
                        } @else {
                            a href=(client.link) rel="noopener" target="_blank" { (client_logo(client)) }
                        }
                    }
                }
            }
        }
    }
}

fn client_logo(client: &Client) -> Markup {
    html! {
        @if client.logo_url.trim().is_empty() {
            span.client-name { (client.name) }
        } @else {
            img src=(client.logo_url) alt=(client.name) loading="lazy";
        }
    }
}

pub fn testimonials_block(r: &dyn Renderer, locale: Locale, content: &TestimonialsContent) -> Markup {
    let item = |id: &str, name: &str| Field::item(Section::Testimonials, locale, "testimonials", id, name);
    html! {
        section #testimonials .testimonials {
            h2 { (r.text(&Field::line(Section::Testimonials, locale, "sectionTitle"), &content.section_title)) }
            p.subtitle { (r.text(&Field::line(Section::Testimonials, locale, "sectionSubtitle"), &content.section_subtitle)) }
            div.testimonial-list {
                @for t in &content.testimonials {
                    blockquote.testimonial {
                        p.rating aria-label={ (t.rating.min(5)) "/5" } { (stars(t.rating)) }
                        p { (r.text(&item(&t.id, "content").multiline(), &t.content)) }
                        footer {
                            cite { (r.text(&item(&t.id, "name"), &t.name)) }
                            " · "
                            span { (r.text(&item(&t.id, "title"), &t.title)) }
                        }
                    }
                }
            }
        }
    }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn contact_block(ctx: &PageContext) -> Markup {
    let chrome = ctx.chrome("");
    let contact = &ctx.contact;
    html! {
        section #contact .contact {
            h2 { (chrome.t("contact.title")) }
            div.contact-details {
                p { strong { (chrome.t("contact.phone")) ": " } (contact.phone) }
                p { strong { (chrome.t("contact.email")) ": " } a href={ "mailto:" (contact.email) } { (contact.email) } }
                p { strong { (chrome.t("contact.address")) ": " } (contact.address) }
            }
            form.contact-form method="post" action="/api/contact" data-endpoint="/api/contact" {
                input type="hidden" name="locale" value=(ctx.locale.code());
                label {
                    (chrome.t("contact.name"))
                    input type="text" name="name" required;
                }
                label {
                    (chrome.t("contact.email"))
                    input type="email" name="email" required;
                }
                label {
                    (chrome.t("contact.message"))
                    textarea name="message" rows="5" required {}
                }
                button type="submit" { (chrome.t("contact.submit")) }
            }
        }
    }
}
