mod config;
mod error;
mod handlers;
mod models;
mod relay; // Browser-facing relay endpoint
mod services;

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::env;

use config::Config;
use handlers::Report;
use models::AnalysisResponse;
use services::FacePlusPlusClient;

const USAGE: &str = "Usage:
  skin-relay [serve]            Start the relay server
  skin-relay report <file.json> Print the report for a saved analysis response
  skin-relay analyze <image>    Analyze a local photo and print the report";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables first so RUST_LOG in .env is honored
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] | ["serve"] => serve().await,
        ["report", path] => print_saved_report(path),
        ["analyze", path] => analyze_image(path).await,
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

#[cfg(feature = "relay-server")]
async fn serve() -> Result<()> {
    use relay::server::create_relay_router;
    use services::SkinAnalysisService;
    use std::sync::Arc;

    log::info!("🚀 Starting skin analysis relay...");

    let config = Config::from_env()?;

    let facepp = FacePlusPlusClient::new(config.facepp_api_key.clone(), config.facepp_api_secret.clone());
    log::info!("✅ Face++ client initialized ({})", facepp.endpoint());
    let analysis: Arc<dyn SkinAnalysisService> = Arc::new(facepp);

    let app = create_relay_router(analysis, relay::STATIC_DIR);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind relay server on {}", addr))?;

    log::info!("🌐 Relay server up on {}", addr);
    log::info!("📂 Serving client from ./{}", relay::STATIC_DIR);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Relay server stopped unexpectedly")?;

    log::info!("🛑 Relay server stopped");
    Ok(())
}

#[cfg(not(feature = "relay-server"))]
async fn serve() -> Result<()> {
    anyhow::bail!("skin-relay was built without the relay-server feature; only `report` and `analyze` are available")
}

#[cfg(feature = "relay-server")]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("❌ Failed to listen for Ctrl+C: {}", e);
    }
    log::info!("🛑 Shutting down...");
}

fn print_saved_report(path: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read analysis file {}", path))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} does not contain valid JSON", path))?;

    print_report(&AnalysisResponse::from_value(value));
    Ok(())
}

async fn analyze_image(path: &str) -> Result<()> {
    let config = Config::from_env()?;
    let facepp = FacePlusPlusClient::new(config.facepp_api_key, config.facepp_api_secret);

    let value = facepp.analyze_file(path).await?;
    print_report(&AnalysisResponse::from_value(value));
    Ok(())
}

fn print_report(response: &AnalysisResponse) {
    if let Some(message) = &response.error_message {
        eprintln!("⚠️ Provider reported an error: {}", message);
    }
    println!("{}", Report::from_response(response));
}
