//! Router assembly and server startup.

use anyhow::{Context, Result};
use axum::{
    extract::FromRef,
    middleware,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::Key;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::assets::{AssetResolver, INDEX_DOCUMENT};
use crate::config::PortalConfig;
use crate::handlers::{protected, public};
use crate::middleware::require_session;
use crate::registry::AppRegistry;
use crate::session::{cookie_key, MemorySessionStore, SessionStore};

/// State shared by all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PortalConfig>,
    pub registry: Arc<AppRegistry>,
    pub sessions: Arc<dyn SessionStore>,
    pub assets: Arc<AssetResolver>,
    cookie_key: Key,
}

impl AppState {
    pub fn new(
        config: PortalConfig,
        registry: AppRegistry,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let cookie_key = cookie_key(&config.session_secret);
        let assets = AssetResolver::new(config.static_dir.clone());
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            sessions,
            assets: Arc::new(assets),
            cookie_key,
        }
    }

    /// Validate the configuration, load the catalog and set up an in-memory
    /// session store.
    pub fn from_config(config: PortalConfig) -> Result<Self> {
        config.validate().context("invalid portal configuration")?;

        let registry = match &config.catalog_path {
            Some(path) => AppRegistry::from_json_file(path)?,
            None => AppRegistry::builtin(),
        };
        let sessions = Arc::new(MemorySessionStore::new(config.session_ttl_secs));

        let state = Self::new(config, registry, sessions);
        state.warn_missing_apps();
        Ok(state)
    }

    fn warn_missing_apps(&self) {
        for app in self.registry.list_apps() {
            let index = self.assets.app_dir(&app.id).join(INDEX_DOCUMENT);
            if !index.is_file() {
                tracing::warn!("App '{}' has no {} at {}", app.id, INDEX_DOCUMENT, index.display());
            }
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Public
        .merge(login_routes())
        // Session required
        .merge(protected_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn login_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(public::login_page).post(public::login_submit))
        .route("/logout", get(public::logout))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(protected::dashboard))
        .route("/:app_name", get(protected::app_index))
        .route("/:app_name/*filename", get(protected::app_file))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;
    tracing::info!(
        "Classroom portal listening on http://{} ({} apps)",
        local,
        state.registry.len()
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
