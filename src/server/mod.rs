//! HTTP server for the landing, article and about pages

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{html_escape, ContentError, ContentInitializer, Post, RenderedArticle};

/// Characters escaped when a link is placed in a URL path
const LINK_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Start the blog server
pub async fn start(content: ContentInitializer, ip: &str, port: u16) -> Result<()> {
    let app = router(Arc::new(content));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes over a shared, read-only content index
pub fn router(content: Arc<ContentInitializer>) -> Router {
    Router::new()
        .route("/", get(landing_handler))
        .route("/about", get(about_handler))
        .route("/article/*identifier", get(article_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(content)
}

async fn landing_handler(State(content): State<Arc<ContentInitializer>>) -> Html<String> {
    let posts = content.landing_page_content();
    Html(landing_page(&posts, |post| content.identifier_for(post)))
}

async fn about_handler(State(content): State<Arc<ContentInitializer>>) -> Html<String> {
    Html(layout("About", "", content.about_page_content()))
}

async fn article_handler(
    State(content): State<Arc<ContentInitializer>>,
    Path(identifier): Path<String>,
) -> Response {
    // File reads are blocking; keep them off the async workers
    let rendered =
        tokio::task::spawn_blocking(move || content.render_article(&identifier)).await;

    match rendered {
        Ok(Ok(article)) => Html(article_page(&article)).into_response(),
        Ok(Err(e)) => {
            if !e.is_not_found() {
                tracing::warn!("Article unavailable: {}", crate::content::error_chain(&e));
            }
            not_found(&e)
        }
        Err(e) => {
            tracing::error!("Article task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn not_found(err: &ContentError) -> Response {
    let message = match err {
        ContentError::NotFound(identifier) => format!("No post named {}", identifier),
        _ => "This article is currently unavailable".to_string(),
    };
    (
        StatusCode::NOT_FOUND,
        Html(layout("Not found", "", &format!("<p>{}</p>", html_escape(&message)))),
    )
        .into_response()
}

/// Landing page listing posts in display order.
///
/// `identifier` gives the article path segment for a post; it must match
/// the lookup mode the article route resolves with.
pub fn landing_page(posts: &[Post], identifier: impl Fn(&Post) -> String) -> String {
    let mut body = String::from("<ul class=\"posts\">\n");
    for post in posts {
        let href = article_href(&identifier(post));
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a><p>{}</p><small>{} {}</small></li>\n",
            href,
            html_escape(post.title.trim()),
            html_escape(post.summary.trim()),
            html_escape(post.author.trim()),
            html_escape(post.creation_date.trim()),
        ));
    }
    body.push_str("</ul>\n");
    layout("Home", "", &body)
}

/// URL path of the article route for an identifier
pub fn article_href(identifier: &str) -> String {
    format!("/article/{}", utf8_percent_encode(identifier, LINK_ESCAPE))
}

/// Article page with its display fields in the head
pub fn article_page(article: &RenderedArticle) -> String {
    let fields = &article.fields;
    let head = format!(
        "<meta name=\"description\" content=\"{}\">\n<meta name=\"keywords\" content=\"{}\">\n<meta name=\"author\" content=\"{}\">\n",
        html_escape(fields.summary.trim()),
        html_escape(fields.keywords.trim()),
        html_escape(fields.author.trim()),
    );

    let title = if fields.title.trim().is_empty() {
        article.post.title.trim()
    } else {
        fields.title.trim()
    };
    layout(title, &head, &format!("<article>\n{}</article>\n", article.html))
}

fn layout(title: &str, head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}</head>\n<body>\n<nav><a href=\"/\">Home</a> <a href=\"/about\">About</a></nav>\n{}</body>\n</html>\n",
        html_escape(title),
        head,
        body
    )
}
