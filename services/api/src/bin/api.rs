//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{JsonFileStore, OpenAiCompletionAdapter, SqliteStore},
    config::{Config, StoreBackend},
    error::ApiError,
    web::{
        generate_complaint_handler, get_complaint_handler, health_handler,
        list_complaints_handler, log_requests, rest::ApiDoc, speech_to_text_handler,
        state::AppState, submit_complaint_handler, text_to_speech_handler,
        update_status_handler,
    },
};
use axum::http::{header::{ACCEPT, CONTENT_TYPE}, HeaderValue, Method};
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use complaint_intake_core::{
    generator::{usable_api_key, ComplaintGenerator},
    ports::{ComplaintStore, CompletionService},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Complaint Store ---
    let store: Arc<dyn ComplaintStore> = match &config.store {
        StoreBackend::Json { path } => {
            info!("Using JSON complaint store at {}", path.display());
            Arc::new(JsonFileStore::open(path.clone()).await?)
        }
        StoreBackend::Sqlite { database_url } => {
            info!("Connecting to SQLite database...");
            Arc::new(SqliteStore::open(database_url).await?)
        }
    };

    // --- 3. Initialize the Letter Generator ---
    let completion: Option<Arc<dyn CompletionService>> =
        match usable_api_key(config.groq_api_key.as_deref()) {
            Some(api_key) => {
                let client = OpenAiCompletionAdapter::client_for(api_key, &config.ai_base_url);
                Some(Arc::new(OpenAiCompletionAdapter::new(
                    client,
                    config.ai_model.clone(),
                    config.ai_timeout,
                )))
            }
            None => {
                warn!("Groq API key not configured, using template-based generation");
                None
            }
        };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        store,
        generator: ComplaintGenerator::new(completion),
        config: config.clone(),
    });
    info!("Letter generator: {}", app_state.ai_provider());

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS origin '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/generate-complaint", post(generate_complaint_handler))
        .route(
            "/api/complaints",
            get(list_complaints_handler).post(submit_complaint_handler),
        )
        .route("/api/complaints/{id}", get(get_complaint_handler))
        .route("/api/complaints/{id}/status", patch(update_status_handler))
        .route("/api/text-to-speech", post(text_to_speech_handler))
        .route("/api/speech-to-text", post(speech_to_text_handler))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(cors)
        .layer(axum_middleware::from_fn(log_requests))
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
