use axum::ServiceExt;
use std::sync::Arc;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod blog;
mod config;
mod error;
mod pagination;
mod routes;
mod state;
mod store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog_index=info,tower_http=info")),
        )
        .init();

    let config = config::Config::from_env()?;

    let state = match &config.store_path {
        Some(path) => {
            tracing::info!("Serving posts from {path:?}");
            state::State::on_disk(path).await?
        }
        None => {
            tracing::info!("No BLOG_STORE_PATH set, serving posts from memory");
            state::State::in_memory()
        }
    };

    let app = app(Arc::new(state), config.allowed_origin);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .await?;

    Ok(())
}

fn app(
    state: Arc<state::State>,
    allowed_origin: Option<axum::http::HeaderValue>,
) -> NormalizePath<axum::Router> {
    let cors = match allowed_origin {
        Some(origin) => CorsLayer::new().allow_origin(tower_http::cors::AllowOrigin::exact(origin)),
        None => CorsLayer::new().allow_origin(tower_http::cors::Any),
    }
    .allow_headers(tower_http::cors::Any);

    NormalizePathLayer::trim_trailing_slash().layer(
        axum::Router::new()
            .merge(routes::route())
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
}
