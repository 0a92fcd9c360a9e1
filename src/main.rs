use std::sync::Arc;

use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use axum::{Router, routing::get};
use clap::Parser;
use shelfmark::config::{Cli, Config, default_config_dir, default_config_path};
use shelfmark::db::Database;
use shelfmark::favorites::{self, FavoriteService, LibsqlFavoriteStore};
use shelfmark::handler::{AppState, healthcheck};
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    // Determine config path and data directory
    // If --config is provided, use its parent directory for data (database, etc.)
    // Otherwise use ~/.shelfmark/ for both
    let (config_path, data_dir) = match args.config_path {
        Some(path) => {
            let path = std::path::PathBuf::from(path);
            let dir = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| std::path::PathBuf::from("."));
            (path, dir)
        }
        None => {
            let dir = default_config_dir();
            (default_config_path(), dir)
        }
    };

    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("failed to create data directory {:?}: {}", data_dir, e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt().json().init();
    tracing::info!("shelfmark.svc starting");

    let cfg = if config_path.exists() {
        Config::new(config_path.to_str().unwrap()).unwrap_or_else(|e| {
            tracing::error!(error = %e, path = ?config_path, "failed to load config file");
            std::process::exit(1);
        })
    } else {
        tracing::info!(path = ?config_path, "no config file found, using defaults");
        Config::default()
    };

    let db = Database::new(&cfg, &data_dir).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup database");
        std::process::exit(1);
    });

    let store = LibsqlFavoriteStore::new(db.connection().clone());
    let service = Arc::new(FavoriteService::new(Arc::new(store)));

    let origin = cfg
        .app
        .get_cors_origin()
        .parse::<HeaderValue>()
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, origin = %cfg.app.get_cors_origin(), "invalid cors origin");
            std::process::exit(1);
        });
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/", get(healthcheck))
        .merge(favorites::routes())
        .layer(cors)
        .with_state(AppState { service });

    let address = format!("0.0.0.0:{}", cfg.app.get_port());
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("shelfmark.svc running on {}", &address);
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "server exited with error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("ctrl+c signal received, shutting down");
        }
    }

    tracing::info!("shelfmark.svc shutdown complete");
}
