//! Applies pending database migrations, then exits.
//!
//! Run this before starting (or upgrading) the API server so requests never
//! observe a half-migrated store.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scenestore_db=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = scenestore_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    for migration in scenestore_db::MIGRATOR.iter() {
        tracing::debug!(
            version = migration.version,
            description = %migration.description,
            "Known migration"
        );
    }

    scenestore_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!(
        count = scenestore_db::MIGRATOR.iter().count(),
        "Database migrations applied"
    );

    pool.close().await;
}
