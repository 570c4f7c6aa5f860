//! Preview server: the index and post pages over HTTP

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::ContentLoader;
use crate::render::{MarkdownRenderer, StyledElements};
use crate::templates::PageRenderer;
use crate::view::{self, PostView, ViewSettings};
use crate::Blog;

/// Server state
pub struct ServerState {
    loader: ContentLoader,
    pages: PageRenderer,
    markdown: MarkdownRenderer<StyledElements>,
    settings: ViewSettings,
}

impl ServerState {
    pub fn new(
        loader: ContentLoader,
        pages: PageRenderer,
        markdown: MarkdownRenderer<StyledElements>,
        settings: ViewSettings,
    ) -> Self {
        Self {
            loader,
            pages,
            markdown,
            settings,
        }
    }

    pub fn from_blog(blog: &Blog) -> Result<Self> {
        Ok(Self::new(
            blog.loader()?,
            PageRenderer::new(&blog.config)?,
            blog.markdown_renderer(),
            blog.view_settings(),
        ))
    }
}

/// Build the router; raw post files are served from `posts_dir`
pub fn router(state: Arc<ServerState>, posts_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/posts/:slug", get(post_handler))
        .nest_service("/blog/posts", ServeDir::new(posts_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the preview server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::from_blog(blog)?);
    let app = router(state, &blog.posts_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let index = view::index_view(&state.loader, &state.settings).await;
    page_response(StatusCode::OK, state.pages.index(&index))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let post = view::post_view(&state.loader, &slug, &state.settings).await;

    let status = match &post {
        PostView::Ready(page) => {
            let body = state.markdown.render(&page.body);
            return page_response(StatusCode::OK, state.pages.post(page, &body));
        }
        PostView::NotFound { .. } => StatusCode::NOT_FOUND,
        PostView::ContentUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };

    match state.pages.post_error(&post) {
        Ok(Some(html)) => (status, Html(html)).into_response(),
        Ok(None) => status.into_response(),
        Err(e) => render_failure(e),
    }
}

fn page_response(status: StatusCode, page: Result<String, crate::error::RenderError>) -> Response {
    match page {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => render_failure(e),
    }
}

fn render_failure(e: crate::error::RenderError) -> Response {
    tracing::error!("Failed to render page: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
