use anyhow::Result;
use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::{
    config::Config,
    handlers::{self, AppState},
    metrics,
    storage::Database,
};

/// Start the panel pricing server
///
/// This function:
/// 1. Installs the Prometheus recorder
/// 2. Connects to the database and runs migrations
/// 3. Builds the Axum application
/// 4. Serves requests with graceful shutdown support
pub async fn start_server(config: Config) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        metrics::init_metrics()
    } else {
        None
    };

    info!("Connecting to database at {}", config.database.url);
    let db = Database::connect(&config.database).await?;

    let state = AppState {
        db,
        lookup_mode: config.pricing.lookup_mode,
    };

    let app = create_router(state, metrics_handle, &config.metrics.endpoint);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!(
        "Starting panel pricing server on {} (lookup mode: {:?})",
        addr, config.pricing.lookup_mode
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    state: AppState,
    metrics_handle: Option<PrometheusHandle>,
    metrics_endpoint: &str,
) -> Router {
    let api = Router::new()
        // Core operations
        .route("/calculateCost", post(handlers::pricing::calculate_cost))
        .route("/searchUsers", post(handlers::search::search_users))
        // Weighting parameters
        .route("/parameter", post(handlers::params::create_parameter))
        .route("/parameters", get(handlers::params::list_parameters))
        .route(
            "/parameter/:id",
            get(handlers::params::get_parameter)
                .put(handlers::params::update_parameter)
                .delete(handlers::params::delete_parameter),
        )
        .route("/parameters/:id", get(handlers::params::list_parameters_by_category))
        // Parameter categories
        .route("/category", post(handlers::categories::create_category))
        .route("/categories", get(handlers::categories::list_categories))
        .route("/category/:id", get(handlers::categories::get_category))
        .route(
            "/categories/:id",
            put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        // Respondents
        .route("/user", post(handlers::users::create_user))
        .route("/users", get(handlers::users::list_users))
        .route(
            "/user/:id",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        // Places
        .route("/country", post(handlers::places::create_country))
        .route("/countries", get(handlers::places::list_countries))
        .route("/region", post(handlers::places::create_region))
        .route("/regions", get(handlers::places::list_regions))
        .route("/regions/:country_id", get(handlers::places::list_regions_by_country))
        .route("/district", post(handlers::places::create_district))
        .route("/districts", get(handlers::places::list_districts))
        .route("/districts/:region_id", get(handlers::places::list_districts_by_region))
        .route("/city", post(handlers::places::create_city))
        .route("/cities", get(handlers::places::list_cities))
        .route("/cities/:region_id", get(handlers::places::list_cities_by_region))
        .route("/city/:id", put(handlers::places::update_city))
        .route("/place", post(handlers::places::create_place))
        .route("/places", get(handlers::places::list_places))
        .route(
            "/place/:user_id",
            get(handlers::places::get_place_for_user)
                .put(handlers::places::update_place_for_user),
        )
        // Purchase categories and frequencies
        .route(
            "/purchase-category",
            post(handlers::purchase::create_purchase_category),
        )
        .route(
            "/purchase-categories",
            get(handlers::purchase::list_purchase_categories),
        )
        .route(
            "/purchase-category/:id",
            get(handlers::purchase::get_purchase_category)
                .put(handlers::purchase::update_purchase_category)
                .delete(handlers::purchase::delete_purchase_category),
        )
        .route(
            "/purchase-frequency",
            post(handlers::purchase::create_purchase_frequency),
        )
        .route(
            "/purchase-frequencies",
            get(handlers::purchase::list_purchase_frequencies),
        )
        .route(
            "/purchase-frequencies/:purchase_category_id",
            get(handlers::purchase::list_purchase_frequencies_by_category),
        )
        .route(
            "/purchase-frequency/:id",
            get(handlers::purchase::get_purchase_frequency)
                .put(handlers::purchase::update_purchase_frequency)
                .delete(handlers::purchase::delete_purchase_frequency),
        )
        // Income brackets
        .route(
            "/income",
            post(handlers::income::create_income).get(handlers::income::list_income),
        )
        .route(
            "/income/:id",
            get(handlers::income::get_income)
                .put(handlers::income::update_income)
                .delete(handlers::income::delete_income),
        )
        // Family situations
        .route(
            "/family-situation",
            post(handlers::family::create_family_situation),
        )
        .route(
            "/family-situations",
            get(handlers::family::list_family_situations),
        )
        .route(
            "/family-situation/:id",
            get(handlers::family::get_family_situation),
        )
        .route(
            "/family-situations/:id",
            put(handlers::family::update_family_situation)
                .delete(handlers::family::delete_family_situation),
        )
        .with_state(state);

    let mut app = Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health));

    if let Some(handle) = metrics_handle {
        app = app.route(
            metrics_endpoint,
            get(move || async move { handle.render() }),
        );
    }

    app.layer(middleware::from_fn(track_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Per-request span (with a request id) plus duration/status metrics.
async fn track_request(request: Request, next: Next) -> Response {
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("request", %request_id, %endpoint);

    let start = Instant::now();
    let response = next.run(request).instrument(span).await;

    metrics::record_request(
        &endpoint,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
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
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}
