use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::extract::State;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod page;
mod robots;

use config::{ClientConfig, ServerConfig};
use page::{PageMetadata, render_index, render_not_found};
use robots::RobotsPolicy;

#[derive(Clone)]
struct AppState {
    client: Arc<ClientConfig>,
    index_html: Arc<str>,
    robots: RobotsPolicy,
}

impl AppState {
    fn new(config: &ServerConfig) -> Self {
        Self {
            client: Arc::new(ClientConfig::from(config)),
            index_html: render_index(&PageMetadata::default()).into(),
            robots: RobotsPolicy::from_restrictive(config.restrictive_robots),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::parse();
    if !config.assets.is_dir() {
        warn!(
            "asset directory {} does not exist; only the page shell will be served",
            config.assets.display()
        );
    }

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!("hydromap server listening on http://{}", config.addr);
    axum::serve(listener, app(&config))
        .await
        .context("server stopped")?;
    Ok(())
}

fn app(config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/", get(index))
        .route("/config.json", get(client_config))
        .route("/robots.txt", get(robots_txt))
        .route("/healthz", get(healthz))
        .fallback_service(
            ServeDir::new(&config.assets).not_found_service(not_found.into_service()),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config))
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}

async fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(render_not_found(&PageMetadata::default())),
    )
}

async fn client_config(State(state): State<AppState>) -> Response {
    let mut resp = Json(state.client.as_ref().clone()).into_response();
    resp.headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    resp
}

async fn robots_txt(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.robots.render(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(restrictive: bool) -> ServerConfig {
        ServerConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
            assets: "dist".into(),
            mapbox_token: "pk.test".to_string(),
            mapbox_style: "mapbox://styles/hydro/base".to_string(),
            restrictive_robots: restrictive,
        }
    }

    async fn body_text(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn config_endpoint_exposes_public_values() {
        let state = AppState::new(&config(false));
        let resp = client_config(State(state)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
        assert_eq!(
            body_text(resp).await,
            r#"{"mapboxToken":"pk.test","mapboxStyle":"mapbox://styles/hydro/base"}"#
        );
    }

    #[tokio::test]
    async fn robots_follows_restrictive_flag() {
        let open = robots_txt(State(AppState::new(&config(false)))).await;
        assert_eq!(body_text(open).await, "User-Agent: *\nAllow: /\n");

        let closed = robots_txt(State(AppState::new(&config(true)))).await;
        assert_eq!(
            closed.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_text(closed).await, "User-Agent: *\nDisallow: /\n");
    }

    #[tokio::test]
    async fn index_serves_page_shell() {
        let resp = index(State(AppState::new(&config(false))))
            .await
            .into_response();
        let html = body_text(resp).await;
        assert!(html.contains("Hydrological Information Management Systems"));
    }

    #[tokio::test]
    async fn unknown_paths_get_not_found_page() {
        let resp = not_found().await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let html = body_text(resp).await;
        assert!(html.contains("<title>Page not found | Hydrological"));
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        assert_eq!(body_text(healthz().await).await, "ok");
    }
}
