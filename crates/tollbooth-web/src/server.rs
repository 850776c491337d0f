//! Web server runner.

use crate::error::WebError;
use crate::routes;
use crate::state::AppState;
use tokio::net::TcpListener;
use tollbooth_core::WebConfig;
use tower_http::trace::TraceLayer;

/// The Tollbooth web server.
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// Create a new server over the given configuration and state.
    pub fn new(config: WebConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind and serve until the process is stopped.
    pub async fn run(&self) -> Result<(), WebError> {
        let app = routes::create_router(self.state.clone()).layer(TraceLayer::new_for_http());

        tracing::info!(
            address = %self.config.bind,
            kid = %self.state.key().kid(),
            "starting tollbooth web server"
        );

        let listener = TcpListener::bind(&self.config.bind)
            .await
            .map_err(|e| WebError::StartupFailed(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| WebError::StartupFailed(e.to_string()))?;

        Ok(())
    }
}
