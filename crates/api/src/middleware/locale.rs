//! Redirects page requests without a locale prefix to the default locale.
//!
//! A path carries a locale when it is exactly `/{l}` or starts with `/{l}/`
//! for a supported `l`. API, admin, upload and health paths pass through, as
//! does anything whose last segment looks like a file name. Negotiation via
//! cookies or `Accept-Language` is not attempted.

use advisory_site_core::Locale;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

const PASSTHROUGH_PREFIXES: &[&str] = &["/api", "/admin", "/uploads", "/health", "/v1", "/_next"];

/// Whether `prefix` is a whole leading segment run of `path`.
fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// The locale a path starts with, if any.
pub fn path_locale(path: &str) -> Option<Locale> {
    Locale::ALL
        .into_iter()
        .find(|locale| under(path, &format!("/{}", locale.code())))
}

fn is_passthrough(path: &str) -> bool {
    if PASSTHROUGH_PREFIXES.iter().any(|p| under(path, p)) {
        return true;
    }
    path.rsplit('/').next().is_some_and(|last| last.contains('.'))
}

/// Where a request for `path` (and optional query string) should be sent,
/// or `None` when it should be served as is.
pub fn locale_redirect(path: &str, query: Option<&str>) -> Option<String> {
    if is_passthrough(path) || path_locale(path).is_some() {
        return None;
    }
    let default = Locale::DEFAULT.code();
    let mut target = if path == "/" || path.is_empty() {
        format!("/{default}")
    } else {
        format!("/{default}{path}")
    };
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    Some(target)
}

/// `axum::middleware::from_fn` adapter for [`locale_redirect`].
pub async fn redirect_missing_locale(request: Request, next: Next) -> Response {
    match locale_redirect(request.uri().path(), request.uri().query()) {
        Some(target) => {
            tracing::debug!(from = %request.uri().path(), to = %target, "adding locale prefix");
            Redirect::temporary(&target).into_response()
        }
        None => next.run(request).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_default_locale() {
        assert_eq!(locale_redirect("/blog", None).as_deref(), Some("/en/blog"));
        assert_eq!(locale_redirect("/", None).as_deref(), Some("/en"));
        assert_eq!(
            locale_redirect("/blog", Some("q=tax")).as_deref(),
            Some("/en/blog?q=tax")
        );
        assert_eq!(locale_redirect("/english", None).as_deref(), Some("/en/english"));
        assert_eq!(locale_redirect("/hebrew/x", None).as_deref(), Some("/en/hebrew/x"));
    }

    #[test]
    fn localized_paths_pass_through() {
        assert_eq!(locale_redirect("/he/blog", None), None);
        assert_eq!(locale_redirect("/en", None), None);
        assert_eq!(locale_redirect("/he", None), None);
        assert_eq!(path_locale("/he/blog/post"), Some(Locale::He));
        assert_eq!(path_locale("/hex"), None);
    }

    #[test]
    fn excluded_paths_pass_through() {
        for path in [
            "/admin/blog",
            "/api/blog",
            "/uploads/hero/1-a.png",
            "/health",
            "/v1/ping",
            "/favicon.ico",
            "/images/logo.svg",
        ] {
            assert_eq!(locale_redirect(path, None), None, "{path}");
        }
    }

    #[test]
    fn excluded_prefixes_match_whole_segments() {
        for path in ["/administration", "/healthcare", "/apiary", "/uploadsx", "/v10"] {
            assert_eq!(locale_redirect(path, None), Some(format!("/en{path}")), "{path}");
        }
        assert_eq!(locale_redirect("/admin", None), None);
        assert_eq!(locale_redirect("/api/x", None), None);
    }
}
