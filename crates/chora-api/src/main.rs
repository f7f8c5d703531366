use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chora_api::router::create_router;
use chora_api::state::AppState;
use chora_api::ApiConfig;
use chora_core::config::LayerConfig;
use chora_store::FileLayerStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chora_api=info,chora_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    tracing::info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        "Starting Chora API server"
    );

    let layer_config = match &config.layer_config_path {
        Some(path) => match LayerConfig::load_from_file(path) {
            Ok(loaded) => {
                tracing::info!(path = %path.display(), "Loaded layer configuration");
                loaded
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Invalid layer configuration");
                std::process::exit(1);
            }
        },
        None => LayerConfig::default(),
    };

    let store = FileLayerStore::new(config.data_dir.clone(), Arc::new(layer_config));
    let state = Arc::new(AppState::new(Arc::new(store)));

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state, &config.data_dir)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await.unwrap();
}
