//! ClauseLens API server
//!
//! HTTP shell around the clause classification pipeline. Provides REST
//! endpoints for:
//!
//! - Annotating contracts (PDF in, highlighted PDF out; DOCX in,
//!   clause records out)
//! - Downloading the clause report as CSV
//!
//! The classifier is built once at startup and shared across requests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clauselens_classify::KeywordClassifier;
use clauselens_core::ClauseClassifier;

mod api;
mod error;

use api::{handle_annotate, handle_report, handle_welcome};

/// Uploaded documents above this size are rejected
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Command-line arguments for the ClauseLens server
#[derive(Parser, Debug)]
#[command(name = "clauselens-api")]
#[command(about = "Contract clause classification and annotation service")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Classifier shared by all requests
    pub classifier: Arc<dyn ClauseClassifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn ClauseClassifier>) -> Self {
        Self { classifier }
    }
}

/// Build the application router around the given state.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_welcome))
        .route("/annotate", post(handle_annotate))
        .route("/report", post(handle_report))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ClauseLens server on {}:{}", args.host, args.port);

    let state = AppState::new(Arc::new(KeywordClassifier::new()));
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
