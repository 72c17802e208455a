use city_explorer_api::{AppState, Config, db};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting city explorer api...");

    let config = Config::from_env().expect("Invalid configuration in environment");

    let pool = db::connect(&config.database)
        .await
        .expect("Failed to connect to database");

    db::migrate(&pool)
        .await
        .expect("Failed to apply database migrations");

    tracing::info!("Database connection established.");

    let state = AppState::new(pool, &config).expect("Failed to build upstream HTTP client");
    let app = city_explorer_api::app(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("App is listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
