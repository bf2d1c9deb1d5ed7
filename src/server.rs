use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{debug, error, info};

use crate::catalog::{CatalogErrorResponse, CatalogResponse, load_sorted_image_names};
use crate::config::ServerConfig;
use crate::constants::*;
use crate::pages;

struct AppState {
    images_dir: PathBuf,
}

pub fn router(images_dir: PathBuf) -> Router {
    let state = Arc::new(AppState {
        images_dir: images_dir.clone(),
    });

    Router::new()
        .route("/", get(|| async { Html(pages::home()) }))
        .route("/about", get(|| async { Html(pages::about()) }))
        .route("/services", get(|| async { Html(pages::services()) }))
        .route("/work", get(|| async { Html(pages::work()) }))
        .route(CATALOG_ROUTE, get(list_images))
        .nest_service(IMAGES_ROUTE, ServeDir::new(images_dir))
        .with_state(state)
}

async fn list_images(State(state): State<Arc<AppState>>) -> Response {
    let dir = state.images_dir.clone();
    let listing = tokio::task::spawn_blocking(move || load_sorted_image_names(&dir)).await;

    match listing {
        Ok(Ok(images)) => {
            debug!(count = images.len(), "catalog listed");
            Json(CatalogResponse { images }).into_response()
        }
        Ok(Err(e)) => {
            error!(error = %e, "error reading images directory");
            read_failure()
        }
        Err(e) => {
            error!(error = %e, "catalog listing task failed");
            read_failure()
        }
    }
}

fn read_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(CatalogErrorResponse {
            error: "Failed to read images directory".to_string(),
        }),
    )
        .into_response()
}

pub async fn serve(config: &ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(&config.bind).await?;
    info!(
        addr = %listener.local_addr()?,
        images = %config.images_dir.display(),
        "site listening"
    );
    axum::serve(listener, router(config.images_dir.clone())).await
}
