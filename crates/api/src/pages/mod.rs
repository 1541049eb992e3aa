//! Server-rendered public pages under `/{locale}/…`.

pub mod blog;
pub mod home;
pub mod layout;
pub mod legal;
pub mod render;
pub mod site;

use advisory_site_core::editor::Capability;
use advisory_site_core::settings::PublicContactInfo;
use advisory_site_core::Locale;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use maud::{html, Markup};

use self::layout::{document, localized_href, Chrome};
use self::render::{renderer_for, Renderer};
use crate::auth::RenderCapability;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/{locale}", get(home::home))
        .route("/{locale}/", get(home::home))
        .route("/{locale}/blog", get(blog::index))
        .route("/{locale}/blog/{slug}", get(blog::post))
        .route("/{locale}/services", get(site::services))
        .route("/{locale}/testimonials", get(site::testimonials))
        .route("/{locale}/contact", get(site::contact))
        .route("/{locale}/privacy-policy", get(site::privacy))
        .route("/{locale}/terms-of-service", get(site::terms_of_service))
        .route("/{locale}/cookie-policy", get(site::cookie_policy))
        .route("/{locale}/{*rest}", get(not_found))
}

/// Everything a page handler needs besides its own content.
pub struct PageContext {
    pub locale: Locale,
    pub capability: Capability,
    pub contact: PublicContactInfo,
    pub renderer: Box<dyn Renderer>,
}

impl PageContext {
    /// Resolve the `{locale}` path segment. An unsupported code is answered
    /// with the not-found page.
    pub async fn load(state: &AppState, code: &str, capability: Capability) -> Result<Self, Response> {
        let contact = state.settings().public_contact_info().await;
        let Some(locale) = Locale::from_code(code) else {
            let ctx = Self::new(Locale::DEFAULT, capability, contact);
            return Err(ctx.not_found(code));
        };
        Ok(Self::new(locale, capability, contact))
    }

    fn new(locale: Locale, capability: Capability, contact: PublicContactInfo) -> Self {
        Self {
            locale,
            capability,
            contact,
            renderer: renderer_for(capability),
        }
    }

    pub fn chrome<'a>(&'a self, current: &'a str) -> Chrome<'a> {
        Chrome {
            locale: self.locale,
            capability: self.capability,
            contact: &self.contact,
            current,
        }
    }

    pub fn page(&self, current: &str, title: &str, content: Markup) -> Response {
        respond(StatusCode::OK, document(&self.chrome(current), title, content))
    }

    pub fn not_found(&self, current: &str) -> Response {
        self.error_page(StatusCode::NOT_FOUND, current, "notFound.title")
    }

    pub fn error_page(&self, status: StatusCode, current: &str, message_key: &str) -> Response {
        let chrome = self.chrome(current);
        let message = chrome.t(message_key);
        let content = html! {
            section.not-found {
                h1 { (message) }
                a href=(chrome.href("")) { (chrome.t("nav.home")) }
            }
        };
        respond(status, document(&chrome, message, content))
    }
}

pub fn respond(status: StatusCode, markup: Markup) -> Response {
    (status, Html(markup.into_string())).into_response()
}

async fn root() -> Redirect {
    Redirect::temporary(&localized_href(Locale::DEFAULT, ""))
}

async fn not_found(
    State(state): State<AppState>,
    Path((code, rest)): Path<(String, String)>,
    RenderCapability(capability): RenderCapability,
) -> Response {
    match PageContext::load(&state, &code, capability).await {
        Ok(ctx) => ctx.not_found(&rest),
        Err(response) => response,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};

    use crate::routes::testing::TestApp;

    pub(crate) async fn page(app: &TestApp, uri: &str, token: Option<&str>) -> (StatusCode, String) {
        let mut request = Request::get(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let (status, headers, body) = app.send(request.body(Body::empty()).unwrap()).await;
        if status.is_success() || status.is_client_error() {
            assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
        }
        (status, String::from_utf8(body).unwrap())
    }

    #[tokio::test]
    async fn unknown_pages_are_404() {
        let app = TestApp::memory();
        let (status, body) = page(&app, "/he/nowhere", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains(r#"dir="rtl""#));
    }
}
