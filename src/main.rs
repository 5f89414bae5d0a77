//! Rollbook service entry point.
//!
//! Loads configuration, connects to PostgreSQL, wires the generation
//! handlers to their adapters and serves the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use http::HeaderValue;
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use rollbook::adapters::http::middleware::StaffAuthState;
use rollbook::adapters::http::{generation_routes, GenerationHandlers};
use rollbook::adapters::{
    MockStaffAuth, PostgresScheduleReader, PostgresSessionInstanceStore, SharedSecretTriggerGuard,
};
use rollbook::application::handlers::{MaterializeClassHandler, RunGenerationHandler};
use rollbook::config::AppConfig;
use rollbook::domain::scheduling::SessionMaterializer;
use rollbook::ports::{ScheduleReader, ScheduledTriggerGuard, SessionInstanceStore};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("rollbook failed to start: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    tracing::info!(environment = ?config.server.environment, "starting rollbook");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Wire adapters into the application handlers
    let schedule_reader: Arc<dyn ScheduleReader> =
        Arc::new(PostgresScheduleReader::new(pool.clone()));
    let instance_store: Arc<dyn SessionInstanceStore> =
        Arc::new(PostgresSessionInstanceStore::new(pool));
    let materializer = Arc::new(SessionMaterializer::new(
        instance_store,
        config.scheduler.max_window_days,
    ));

    let run_handler = Arc::new(RunGenerationHandler::new(
        schedule_reader.clone(),
        materializer.clone(),
        config.scheduler.weeks_ahead,
    ));
    let materialize_handler = Arc::new(MaterializeClassHandler::new(schedule_reader, materializer));

    let trigger_guard: Arc<dyn ScheduledTriggerGuard> = Arc::new(SharedSecretTriggerGuard::new(
        SecretString::new(config.scheduler.trigger_secret.clone()),
    ));

    // TODO: replace with the platform OIDC validator once its token
    // introspection endpoint is reachable from this service.
    let staff_auth: StaffAuthState = Arc::new(MockStaffAuth::new());

    let handlers = GenerationHandlers::new(run_handler, materialize_handler, trigger_guard);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/generation", generation_routes(handlers, staff_auth))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(cors_layer(&config))
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
