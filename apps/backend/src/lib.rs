pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use study_core::Scheduler;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub scheduler: Scheduler,
}

/// Build the API router for the given state.
pub fn router(state: AppState) -> Router {
    // Everything under here requires a bearer token
    let protected_routes = Router::new()
        .route("/api/users/me", get(routes::users::me))
        // Subject routes
        .route(
            "/api/subjects",
            get(routes::subjects::list).post(routes::subjects::create),
        )
        .route(
            "/api/subjects/:slug",
            get(routes::subjects::detail).delete(routes::subjects::delete),
        )
        // Item routes
        .route("/api/subjects/:slug/items", post(routes::items::create))
        .route(
            "/api/subjects/:slug/items/:id",
            axum::routing::patch(routes::items::update).delete(routes::items::delete),
        )
        // Study routes
        .route("/api/subjects/:slug/study/next", get(routes::study::next))
        .route("/api/subjects/:slug/study/review", post(routes::study::review))
        .route("/api/subjects/:slug/quiz/next", get(routes::study::quiz_next))
        .route("/api/subjects/:slug/quiz/answer", post(routes::study::quiz_answer))
        // Progress routes
        .route("/api/progress", post(routes::progress::save))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users/register", post(routes::users::register))
        .merge(protected_routes)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url, config.max_connections).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState {
        db: Arc::new(db),
        scheduler: Scheduler::default(),
    };

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
