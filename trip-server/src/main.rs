use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::cache::{CacheConfig, CachedGeocoder};
use trip_server::directions::{DirectionsProvider, MockDirectionsProvider, OsrmClient, OsrmConfig};
use trip_server::geocoding::{NominatimClient, NominatimConfig};
use trip_server::planner::{PlannerConfig, TripPlanner};
use trip_server::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn directions_provider() -> Result<Arc<dyn DirectionsProvider>, Box<dyn std::error::Error>> {
    if let Some(dir) = env_var("TRIP_MOCK_ROUTES_DIR") {
        let mock = MockDirectionsProvider::from_dir(&dir)?;
        warn!(%dir, pairs = mock.pair_count(), "using mock directions provider");
        return Ok(Arc::new(mock));
    }

    let mut config = OsrmConfig::default();
    if let Some(url) = env_var("TRIP_OSRM_URL") {
        config = config.with_base_url(url);
    }
    info!(base_url = %config.base_url, "using OSRM directions");
    Ok(Arc::new(OsrmClient::new(config)?))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trip_server=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let planner = TripPlanner::new(directions_provider()?, PlannerConfig::default());

    let mut geocoder_config = match env_var("TRIP_NOMINATIM_URL") {
        Some(url) => NominatimConfig::new(url),
        None => NominatimConfig::default(),
    };
    if let Some(user_agent) = env_var("TRIP_USER_AGENT") {
        geocoder_config = geocoder_config.with_user_agent(user_agent);
    }
    info!(base_url = %geocoder_config.base_url, "using Nominatim geocoding");
    let geocoder = CachedGeocoder::new(
        NominatimClient::new(geocoder_config)?,
        &CacheConfig::default(),
    );

    let state = AppState::new(planner, Arc::new(geocoder));

    let static_dir = env_var("TRIP_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());
    let app = create_router(state, &static_dir);

    let addr: SocketAddr = env_var("TRIP_BIND_ADDR")
        .as_deref()
        .unwrap_or(DEFAULT_BIND_ADDR)
        .parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Round Trip Planner listening on http://{addr}");
    info!("  GET    /health                        - Health check");
    info!("  GET    /geocode?q=                    - Address candidates");
    info!("  GET    /geocode/reverse?lat=&lon=     - Address at a point");
    info!("  POST   /trips                         - Start a trip");
    info!("  PUT    /trips/:id/waypoints/:index    - Set a waypoint");
    info!("  POST   /trips/:id/plan                - Plan the round trip");

    axum::serve(listener, app).await?;
    Ok(())
}
