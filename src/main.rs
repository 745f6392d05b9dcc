//! review-service - HTTP entry point.

#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use http::{HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use review_service::adapters::http::{api_router, ReviewHandlers, TeamHandlers};
use review_service::adapters::postgres::{
    connect_pool, run_migrations, PostgresDirectory, PostgresReviewStore,
};
use review_service::adapters::random::{SeededRandomSource, ThreadRandomSource};
use review_service::application::handlers::review::{ListAssignedReviewsHandler, ReviewLifecycle};
use review_service::application::handlers::team::{
    CreateTeamHandler, GetTeamHandler, SetPersonActiveHandler,
};
use review_service::config::{AppConfig, ServerConfig};
use review_service::ports::{Directory, RandomSource, ReviewRequestStore, TeamRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    init_tracing(&config.server);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "starting review-service"
    );

    let pool = connect_pool(&config.database)
        .await
        .context("connecting to database")?;
    if config.database.run_migrations {
        run_migrations(&pool).await.context("running migrations")?;
        tracing::info!("migrations applied");
    }

    let directory = Arc::new(PostgresDirectory::new(pool.clone()));
    let store: Arc<dyn ReviewRequestStore> = Arc::new(PostgresReviewStore::new(pool));
    let random: Arc<dyn RandomSource> = match config.selection.seed {
        Some(seed) => {
            tracing::warn!(seed, "reviewer selection is seeded");
            Arc::new(SeededRandomSource::new(seed))
        }
        None => Arc::new(ThreadRandomSource::new()),
    };

    let lookup: Arc<dyn Directory> = directory.clone();
    let registry: Arc<dyn TeamRegistry> = directory;

    let review_handlers = ReviewHandlers::new(
        Arc::new(ReviewLifecycle::new(lookup.clone(), store.clone(), random)),
        Arc::new(ListAssignedReviewsHandler::new(lookup.clone(), store)),
    );
    let team_handlers = TeamHandlers::new(
        Arc::new(CreateTeamHandler::new(registry.clone())),
        Arc::new(GetTeamHandler::new(lookup)),
        Arc::new(SetPersonActiveHandler::new(registry)),
    );

    let mut app = api_router(review_handlers, team_handlers).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(config.server.request_timeout())),
    );
    if let Some(cors) = cors_layer(&config.server) {
        app = app.layer(cors);
    }

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("shut down");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
