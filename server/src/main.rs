use axum::http::{header, HeaderValue, Method};
use ractor::Actor;
use server::actors::storage::{StorageActor, StorageArguments};
use server::ai::mock::MockAiGateway;
use server::ai::relay::RelayAiGateway;
use server::ai::AiGateway;
use server::api;
use server::app_state::AppState;
use server::bus;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

fn load_env_file() {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!(error = %e, "Could not determine current directory for .env lookup");
            return;
        }
    };

    let mut current = cwd.clone();
    loop {
        let candidate = current.join(".env");
        if candidate.exists() {
            match dotenvy::from_path(&candidate) {
                Ok(_) => {
                    tracing::info!(path = %candidate.display(), "Loaded environment from .env");
                }
                Err(e) => {
                    tracing::warn!(
                        path = %candidate.display(),
                        error = %e,
                        "Failed to load .env file"
                    );
                }
            }
            return;
        }

        if !current.pop() {
            break;
        }
    }

    tracing::info!(
        cwd = %cwd.display(),
        "No .env file found in current directory or ancestors; using process environment only"
    );
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v != "0" && v.to_lowercase() != "false")
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load .env values early so provider keys are available before the
    // gateway is picked. Search the current directory and ancestors so
    // running from `server/` still picks up repo-root `.env`.
    load_env_file();

    tracing::info!("Starting ResearchFlow API Server");

    // Use configurable path for the key-value database
    let db_path = std::env::var("RESEARCHFLOW_DB")
        .unwrap_or_else(|_| "./data/researchflow.db".to_string());
    let db_path = std::path::PathBuf::from(db_path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create data directory");
    }

    let db_path_str = db_path.to_str().expect("Invalid database path");
    tracing::info!("Opening database: {}", db_path_str);
    let (storage, _handle) = Actor::spawn(
        None,
        StorageActor,
        StorageArguments::File(db_path_str.to_string()),
    )
    .await
    .expect("Failed to spawn storage actor");

    tracing::info!("StorageActor started");

    let simulate_latency = env_flag("RESEARCHFLOW_SIMULATED_LATENCY", true);

    // Pick the AI gateway: relay when a provider key is configured,
    // otherwise the deterministic mock. The latency flag covers both the
    // mock gateway and the DOI resolver.
    let relay = RelayAiGateway::from_env();
    let ai: Arc<dyn AiGateway> = if relay.has_keys() {
        tracing::info!("AI gateway: provider relay");
        Arc::new(relay)
    } else {
        tracing::info!(simulate_latency, "AI gateway: mock fixtures (no provider key set)");
        Arc::new(MockAiGateway::new(simulate_latency))
    };

    let app_state = Arc::new(AppState::new(storage.clone(), ai, simulate_latency));

    // The reference appender is the one long-lived bus subscriber.
    let _appender = bus::spawn_reference_appender(storage, app_state.subscribe());

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    tracing::info!("Starting HTTP server on http://0.0.0.0:{}", port);

    // Configure CORS to allow the local UI origins
    let allowed_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]
        .iter()
        .map(|origin| HeaderValue::from_str(origin).expect("Invalid CORS origin"))
        .collect::<Vec<_>>();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(std::time::Duration::from_secs(3600));

    let api_state = api::ApiState { app_state };

    let app = api::router().with_state(api_state).layer(cors);

    let listener = TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    axum::serve(listener, app).await
}
