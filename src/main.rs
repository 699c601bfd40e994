use anyhow::Context;
use fitsphere::api::create_routes;
use fitsphere::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    // RUST_LOG overrides LOG_LEVEL, e.g. RUST_LOG=debug,tower_http=trace
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},fitsphere=debug", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_config = DatabaseConfig::from_env().context("failed to load database configuration")?;
    let pool = db_config.create_pool().await.context("failed to connect to database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;

    if config.seed_demo_data {
        DatabaseSeeder::new(pool.clone(), config.bcrypt_cost)
            .seed_all()
            .await
            .context("failed to seed demo data")?;
    }

    let app = create_routes(pool, &config);

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(
        environment = %config.environment,
        "FitSphere server listening on http://{address}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
