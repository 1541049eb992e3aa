use advisory_site_core::blog::BlogPost;
use advisory_site_core::ServiceError;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use maud::{html, Markup};
use serde::Deserialize;

use super::render::lines;
use super::PageContext;
use crate::auth::RenderCapability;
use crate::error::ApiError;
use crate::state::AppState;

const MORE_ARTICLES: usize = 3;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Path(code): Path<String>,
    RenderCapability(capability): RenderCapability,
    Query(search): Query<SearchQuery>,
) -> Response {
    let ctx = match PageContext::load(&state, &code, capability).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let term = search.q.as_deref().map(str::trim).unwrap_or_default();
    let posts = match state.blog().list_published(Some(ctx.locale), Some(term)).await {
        Ok(posts) => posts,
        Err(err) => {
            tracing::error!(error = %err, "failed to list blog posts");
            Vec::new()
        }
    };

    let chrome = ctx.chrome("blog");
    let title = chrome.t("blog.title");
    let body = html! {
        section.blog-index {
            h1 { (title) }
            p.subtitle { (chrome.t("blog.subtitle")) }
            form.blog-search method="get" action=(chrome.href("blog")) {
                input type="search" name="q" value=(term) placeholder=(chrome.t("blog.search"));
            }
            @if posts.is_empty() {
                p.empty { (chrome.t("blog.empty")) }
            } @else {
                div.post-list {
                    @for post in &posts {
                        (post_card(&ctx, post))
                    }
                }
            }
        }
    };
    ctx.page("blog", title, body)
}

pub async fn post(
    State(state): State<AppState>,
    Path((code, slug)): Path<(String, String)>,
    RenderCapability(capability): RenderCapability,
) -> Response {
    let ctx = match PageContext::load(&state, &code, capability).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let current = format!("blog/{slug}");
    let post = match state.blog().find_published(&slug, Some(ctx.locale)).await {
        Ok(post) => post,
        Err(ServiceError::NotFound(_)) => {
            return ctx.error_page(StatusCode::NOT_FOUND, &current, "blog.notFound");
        }
        Err(err) => {
            tracing::error!(error = %err, slug = %slug, "failed to load blog post");
            return ctx.error_page(ApiError::from(err).status(), &current, "blog.notFound");
        }
    };
    let more: Vec<BlogPost> = match state.blog().list_published(Some(ctx.locale), None).await {
        Ok(posts) => posts.into_iter().filter(|p| p.id != post.id).take(MORE_ARTICLES).collect(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to list related posts");
            Vec::new()
        }
    };

    let chrome = ctx.chrome(&current);
    let body = html! {
        article.blog-post {
            a.back href=(chrome.href("blog")) { (chrome.t("blog.backToBlog")) }
            h1 { (post.title) }
            p.meta {
                time datetime=(post.created_at.to_rfc3339()) { (post.created_at.format("%Y-%m-%d").to_string()) }
                @if !post.author.is_empty() {
                    " · " span.author { (post.author) }
                }
            }
            @if let Some(image) = &post.featured_image {
                img.featured src=(image.url) alt=(post.title);
            }
            div.post-body {
                @for paragraph in paragraphs(&post.content) {
                    p { (lines(paragraph)) }
                }
            }
        }
        @if !more.is_empty() {
            aside.more-articles {
                h2 { (chrome.t("blog.moreArticles")) }
                div.post-list {
                    @for other in &more {
                        (post_card(&ctx, other))
                    }
                }
            }
        }
    };
    ctx.page(&current, &post.title, body)
}

fn post_card(ctx: &PageContext, post: &BlogPost) -> Markup {
    let chrome = ctx.chrome("blog");
    let href = chrome.href(&format!("blog/{}", post.slug));
    html! {
        article.post-card {
            @if let Some(image) = &post.featured_image {
                a href=(href) { img src=(image.url) alt=(post.title) loading="lazy"; }
            }
            h2 { a href=(href) { (post.title) } }
            time datetime=(post.created_at.to_rfc3339()) { (post.created_at.format("%Y-%m-%d").to_string()) }
            p { (post.excerpt) }
            a.read-more href=(href) { (chrome.t("blog.readMore")) }
        }
    }
}

/// Blank-line separated blocks of the stored body.
fn paragraphs(content: &str) -> impl Iterator<Item = &str> {
    content.split("\n\n").map(str::trim).filter(|p| !p.is_empty())
}
