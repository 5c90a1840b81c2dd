use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use board_server::vbb::{VbbClient, VbbConfig, VbbSource};
use board_server::web::{AppState, create_router};

/// Environment variable holding the API bearer key.
const API_KEY_VAR: &str = "VBB_API_KEY";

/// Set to "1" to serve fixture data without an API key.
const DEMO_MODE_VAR: &str = "VBB_DEMO_MODE";

/// Optional base-URL override (for testing against a local stub).
const BASE_URL_VAR: &str = "VBB_BASE_URL";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let source = if std::env::var(DEMO_MODE_VAR).is_ok_and(|v| v == "1") {
        println!("Running in demo mode: fixture data only, no API calls.");
        VbbSource::Demo
    } else {
        match std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()) {
            Some(api_key) => {
                let mut config = VbbConfig::new(api_key);
                if let Ok(base_url) = std::env::var(BASE_URL_VAR) {
                    config = config.with_base_url(base_url);
                }
                VbbSource::Live(VbbClient::new(config).expect("Failed to create VBB client"))
            }
            None => {
                eprintln!("VBB API key is not configured.");
                eprintln!("Set the {API_KEY_VAR} environment variable to enable live data,");
                eprintln!("or set {DEMO_MODE_VAR}=1 to run against fixture data.");
                std::process::exit(1);
            }
        }
    };

    let state = AppState::new(source);

    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");
    let app = create_router(state, static_dir);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("VBB departures board listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the dashboard.");
    println!();
    println!("Endpoints:");
    println!("  GET  /           - Dashboard");
    println!("  GET  /search     - Station search (q=<text>)");
    println!("  GET  /select     - Select a station (id=<stop id>)");
    println!("  GET  /refresh    - Refresh the departure board");
    println!("  GET  /api/board  - Current board as JSON");
    println!("  GET  /health     - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
