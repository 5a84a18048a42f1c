use api::{ApiState, create_router};
use app_state::settings;
use color_eyre::Result;
use common_services::database::get_db_pool;
use common_services::storage::{R2Client, StorageConfig};
use http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = settings();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    color_eyre::install()?;

    info!("🚀 Initializing server...");
    let pool = get_db_pool(&settings.secrets.database_url, &settings.database, true).await?;
    let storage_config = StorageConfig::from_settings(&settings.storage, &settings.secrets)?;
    let storage = R2Client::new(storage_config, reqwest::Client::new());
    let api_settings = &settings.api;

    let allowed_origins: Vec<HeaderValue> = api_settings
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]);

    let state = ApiState {
        pool,
        storage,
        gallery: settings.gallery.clone(),
    };
    let app = create_router(state).layer(cors);
    let listen_address = format!("{}:{}", api_settings.host, api_settings.port);
    let listener = tokio::net::TcpListener::bind(&listen_address).await?;

    info!("📚 Docs available at {}/docs", api_settings.public_url);
    info!("✅ Server listening on http://{listen_address}");

    axum::serve(listener, app).await?;
    Ok(())
}
