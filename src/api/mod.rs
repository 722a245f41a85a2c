use axum::{
    Router, middleware,
    response::Html,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::Config;
use crate::state::SharedState;

mod assets;
mod error;
pub mod favorites;
pub mod flash;
mod observability;
pub mod pages;
pub mod plans;
mod recommend;
mod system;
mod templates;
mod types;
mod validation;

pub use error::{ApiError, PageError};
pub use templates::Templates;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub templates: Arc<Templates>,

    pub session_key: Key,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        self.shared.config()
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn recommend_service(&self) -> &Arc<dyn crate::services::RecommendService> {
        &self.shared.recommend_service
    }

    /// Renders a full page, draining any queued flash messages into it.
    pub async fn render_page<T: Serialize>(
        &self,
        session: &Session,
        template: &str,
        title: &'static str,
        body: T,
    ) -> Result<Html<String>, PageError> {
        let page = Page {
            title,
            flashes: flash::take(session).await,
            body,
        };
        Ok(self.templates.render(template, &page)?)
    }
}

/// Signing key for the session cookie, stretched from the configured secret.
fn session_key(secret: &str) -> anyhow::Result<Key> {
    if secret.is_empty() {
        anyhow::bail!("Secret key cannot be empty");
    }
    let material: Vec<u8> = secret.bytes().cycle().take(64).collect();
    Key::try_from(material.as_slice()).map_err(|e| anyhow::anyhow!("Invalid session key: {e}"))
}

pub async fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let templates = Arc::new(Templates::load()?);
    let session_key = session_key(&shared.config().server.secret_key)?;

    Ok(Arc::new(AppState {
        shared,
        templates,
        session_key,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    }))
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared, prometheus_handle).await
}

pub fn router(state: Arc<AppState>) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config().server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(60)))
        .with_signed(state.session_key.clone());

    let page_routes = create_page_router().layer(session_layer);

    Router::new()
        .merge(page_routes)
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .route("/static/{*path}", get(assets::serve_static))
        .route_layer(middleware::from_fn(observability::track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn create_page_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(pages::home))
        .route("/recommend", post(recommend::recommend))
        .route("/history", get(pages::history))
        .route("/favorites", get(favorites::list_favorites))
        .route("/save_note/{id}", post(favorites::save_note))
        .route("/feedback", post(favorites::submit_feedback))
        .route("/plans", get(plans::list_plans))
        .route("/add_plan", post(plans::add_plan))
        .route("/delete_plan/{id}", post(plans::delete_plan))
        .route("/plan_status/{id}", post(plans::update_plan_status))
        .route("/country/{name}", get(pages::country_detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_is_derived_from_short_secrets() {
        assert!(session_key("s").is_ok());
        assert!(session_key(&"x".repeat(200)).is_ok());
        assert!(session_key("").is_err());
    }
}
