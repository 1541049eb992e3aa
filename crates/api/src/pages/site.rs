//! Standalone pages built from the landing copy plus one home page block.

use advisory_site_core::content::models::{LandingContent, PrivacyContent, ServicesContent, TestimonialsContent};
use advisory_site_core::content::Section;
use axum::extract::{Path, State};
use axum::response::Response;
use maud::{html, Markup};

use super::home::{contact_block, services_block, testimonials_block};
use super::legal::{self, Clause};
use super::render::Field;
use super::PageContext;
use crate::auth::RenderCapability;
use crate::state::AppState;

/// Page heading whose title and subtitle live in the landing document.
fn landing_header(ctx: &PageContext, title: (&str, &str), subtitle: (&str, &str)) -> Markup {
    let r = ctx.renderer.as_ref();
    html! {
        header.page-header {
            h1 { (r.text(&Field::line(Section::Landing, ctx.locale, title.0), title.1)) }
            p.subtitle { (r.text(&Field::block(Section::Landing, ctx.locale, subtitle.0), subtitle.1)) }
        }
    }
}

pub async fn services(
    State(state): State<AppState>,
    Path(code): Path<String>,
    RenderCapability(capability): RenderCapability,
) -> Response {
    let ctx = match PageContext::load(&state, &code, capability).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let content = state.content();
    let (landing, services) = futures::join!(
        content.load_typed::<LandingContent>(ctx.locale),
        content.load_typed::<ServicesContent>(ctx.locale),
    );
    let body = html! {
        (landing_header(&ctx, ("servicesTitle", landing.services_title.as_str()), ("servicesSubtitle", landing.services_subtitle.as_str())))
        (services_block(ctx.renderer.as_ref(), ctx.locale, &services))
    };
    ctx.page("services", &landing.services_title, body)
}

pub async fn testimonials(
    State(state): State<AppState>,
    Path(code): Path<String>,
    RenderCapability(capability): RenderCapability,
) -> Response {
    let ctx = match PageContext::load(&state, &code, capability).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let content = state.content();
    let (landing, testimonials) = futures::join!(
        content.load_typed::<LandingContent>(ctx.locale),
        content.load_typed::<TestimonialsContent>(ctx.locale),
    );
    let body = html! {
        (landing_header(
            &ctx,
            ("testimonialsTitle", landing.testimonials_title.as_str()),
            ("testimonialsSubtitle", landing.testimonials_subtitle.as_str()),
        ))
        (testimonials_block(ctx.renderer.as_ref(), ctx.locale, &testimonials))
    };
    ctx.page("testimonials", &landing.testimonials_title, body)
}

pub async fn contact(
    State(state): State<AppState>,
    Path(code): Path<String>,
    RenderCapability(capability): RenderCapability,
) -> Response {
    let ctx = match PageContext::load(&state, &code, capability).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let landing = state.content().load_typed::<LandingContent>(ctx.locale).await;
    let r = ctx.renderer.as_ref();
    let body = html! {
        (landing_header(&ctx, ("contactTitle", landing.contact_title.as_str()), ("contactSubtitle", landing.contact_subtitle.as_str())))
        p.lead { (r.text(&Field::block(Section::Landing, ctx.locale, "contactDescription"), &landing.contact_description)) }
        (contact_block(&ctx))
    };
    ctx.page("contact", &landing.contact_title, body)
}

pub async fn privacy(
    State(state): State<AppState>,
    Path(code): Path<String>,
    RenderCapability(capability): RenderCapability,
) -> Response {
    let ctx = match PageContext::load(&state, &code, capability).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let privacy = state.content().load_typed::<PrivacyContent>(ctx.locale).await;
    let r = ctx.renderer.as_ref();
    let title = ctx.chrome("privacy-policy").t("nav.privacy");
    let body = html! {
        article.privacy-policy {
            h1 { (title) }
            @for (field, heading, text) in privacy.sections() {
                section data-field=(field) {
                    h2 { (heading) }
                    p { (r.text(&Field::block(Section::Privacy, ctx.locale, field), text)) }
                }
            }
        }
    };
    ctx.page("privacy-policy", title, body)
}

pub async fn terms_of_service(
    State(state): State<AppState>,
    Path(code): Path<String>,
    RenderCapability(capability): RenderCapability,
) -> Response {
    let ctx = match PageContext::load(&state, &code, capability).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    legal_page(&ctx, "terms-of-service", "nav.terms", legal::terms(ctx.locale))
}

pub async fn cookie_policy(
    State(state): State<AppState>,
    Path(code): Path<String>,
    RenderCapability(capability): RenderCapability,
) -> Response {
    let ctx = match PageContext::load(&state, &code, capability).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    legal_page(&ctx, "cookie-policy", "nav.cookies", legal::cookies(ctx.locale))
}

fn legal_page(ctx: &PageContext, current: &str, title_key: &str, clauses: &[Clause]) -> Response {
    let chrome = ctx.chrome(current);
    let title = chrome.t(title_key);
    let contact = &ctx.contact;
    let business = contact.business_name.as_str();
    let body = html! {
        article.legal-page {
            h1 { (title) }
            @for clause in clauses {
                section {
                    h2 { (clause.heading) }
                    p { (legal::fill(clause.body, business)) }
                    @if !clause.items.is_empty() {
                        ul {
                            @for item in clause.items {
                                li { (item) }
                            }
                        }
                    }
                }
            }
            section.legal-contact {
                h2 { (chrome.t("nav.contact")) }
                p { (chrome.t("legal.questions")) }
                p {
                    strong { (chrome.t("contact.email")) ": " } a href={ "mailto:" (contact.email) } { (contact.email) }
                    br;
                    strong { (chrome.t("contact.phone")) ": " } (contact.phone)
                    br;
                    strong { (chrome.t("contact.address")) ": " } (contact.address)
                }
            }
        }
    };
    ctx.page(current, title, body)
}
