//! Pressa - A small markdown blog platform

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pressa::{
    api::{self, AppState},
    cache::create_cache,
    config::Config,
    db::{
        self,
        repositories::{SqlxLikeRepository, SqlxPostRepository, SqlxSessionRepository},
        seed,
    },
    services::{AuthService, MarkdownRenderer, PostService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pressa=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pressa...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    if config.database.seed_demo {
        seed::seed_demo_content(&pool).await?;
        tracing::info!("Demo content seeded");
    }

    // Initialize cache
    let cache = create_cache(&config.cache);
    tracing::info!("Cache initialized");

    // Create repositories
    let post_repo = SqlxPostRepository::boxed(pool.clone());
    let like_repo = SqlxLikeRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());

    // Initialize services
    let post_service = Arc::new(PostService::new(
        post_repo,
        like_repo,
        cache,
        MarkdownRenderer::new(),
    ));
    let auth_service = Arc::new(AuthService::new(session_repo, &config.admin));

    if config.admin.password_hash.is_none() {
        tracing::warn!("No admin password hash configured; admin login is disabled");
    }

    // Build application state
    let state = AppState {
        post_service,
        auth_service,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
