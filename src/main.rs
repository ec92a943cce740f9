use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, patch, post},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use hall_reservation_api::middleware::verify_token;
use hall_reservation_api::{config, database};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL and the token secrets.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting hall reservation API in {:?} mode", config.environment);

    let pool = database::pool::connect().expect("invalid DATABASE_URL");
    database::pool::migrate(&pool).await;

    let app = app(pool.clone());

    // Allow tests or deployments to override port via env
    let port = std::env::var("HALL_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Server is listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");

    pool.close().await;
}

fn app(pool: PgPool) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(hall_routes())
        .merge(reservation_routes())
        // Global middleware
        .layer(Extension(pool))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn hall_routes() -> Router {
    use hall_reservation_api::handlers::halls;

    Router::new()
        .route("/api/halls/addHall", post(halls::add_hall))
        .route("/api/halls/deleteHall", delete(halls::delete_hall))
        .route("/api/halls/update", patch(halls::update_hall))
}

fn reservation_routes() -> Router {
    use hall_reservation_api::handlers::reservations;

    Router::new()
        .route("/api/reservations", get(reservations::list_reservations))
        .route_layer(axum::middleware::from_fn(verify_token))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Hall Reservation API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "halls": "/api/halls/addHall, /api/halls/deleteHall, /api/halls/update",
            "reservations": "/api/reservations (protected)",
        }
    }))
}

async fn health(Extension(pool): Extension<PgPool>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::pool::health_check(&pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": err.to_string()
            })),
        ),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
}
