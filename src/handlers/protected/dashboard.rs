// handlers/protected/dashboard.rs - GET /

use axum::{extract::State, response::Html};

use crate::app::AppState;
use crate::error::PortalResult;
use crate::templates::{render_html, DashboardTemplate};

/// GET / - every registered app, in catalog order
pub async fn dashboard(State(state): State<AppState>) -> PortalResult<Html<String>> {
    render_html(&DashboardTemplate {
        apps: state.registry.list_apps(),
    })
}
