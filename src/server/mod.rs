pub mod handlers;
mod types;

pub use types::*;

use crate::{
    Result,
    backend,
    config::Config,
    translator::Translator,
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    // One backend client per process, shared by every invocation
    let backend = backend::connect(&config.backend).await?;
    let translator = Translator::from_config(backend, &config.backend);

    info!(
        "Using model {} via {:?} convention",
        translator.model_id(),
        translator.convention()
    );

    let app_state = AppState {
        translator: Arc::new(translator),
        envelope: config.server.envelope,
    };

    let app = router(app_state, &config.server.route);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState, route: &str) -> Router {
    let mut app = Router::new()
        .route("/", post(handlers::invoke))
        .route("/health", get(handlers::health));

    let route = route.trim_matches('/');
    if !route.is_empty() && route != "health" {
        app = app.route(&format!("/{}", route), post(handlers::invoke));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
