//! Osusume server: one page, one form, one submit action.
//!
//! All heavy state (artifacts, pretrained encoders) is loaded before the
//! listener starts and shared read-only with every request.

mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tracing::info;

use osusume_core::{DataConfig, Recommender};

use crate::routes::AppState;

/// CLI arguments
#[derive(Parser)]
#[command(name = "osusume-server")]
#[command(about = "Hybrid ensemble anime recommendation server")]
#[command(version)]
struct Cli {
    /// Listen address
    #[arg(short, long, env = "OSUSUME_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Artifact directory (defaults to the platform data dir)
    #[arg(short, long, env = "OSUSUME_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Override the remote embeddings URL
    #[arg(long, env = "OSUSUME_EMBEDDINGS_URL")]
    embeddings_url: Option<String>,
}

impl Cli {
    fn data_config(&self) -> DataConfig {
        let mut config = DataConfig::default();
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir.clone());
        }
        if let Some(url) = &self.embeddings_url {
            config = config.with_embeddings_url(url.clone());
        }
        config
    }
}

async fn ui() -> Html<&'static str> {
    Html(include_str!("ui.html"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = cli.data_config();

    info!(data_dir = %config.data_dir.display(), "loading artifacts and models");
    // Artifact loading may download the embedding matrix and model weights
    // with blocking I/O, so it runs off the async runtime.
    let recommender = tokio::task::spawn_blocking(move || Recommender::new(&config))
        .await
        .context("startup task panicked")??;
    info!(
        entries = recommender.catalog_len(),
        genres = recommender.genres().len(),
        "recommender ready"
    );

    let state = Arc::new(AppState { recommender });
    let app = Router::new()
        .route("/", get(ui))
        .route("/api/catalog", get(routes::catalog_handler))
        .route("/api/recommend", post(routes::recommend_handler))
        .with_state(state);

    info!("listening on {}", cli.bind);
    axum::serve(tokio::net::TcpListener::bind(cli.bind).await?, app).await?;

    Ok(())
}
