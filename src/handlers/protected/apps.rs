// handlers/protected/apps.rs - GET /:app_name and GET /:app_name/*filename

use axum::{
    extract::{Path, Request, State},
    response::Response,
};

use crate::app::AppState;
use crate::error::{PortalError, PortalResult};

/// GET /:app_name - the app's index document
pub async fn app_index(
    State(state): State<AppState>,
    Path(app_name): Path<String>,
    request: Request,
) -> PortalResult<Response> {
    serve_app(&state, &app_name, None, request).await
}

/// GET /:app_name/*filename - any file inside the app's directory
pub async fn app_file(
    State(state): State<AppState>,
    Path((app_name, filename)): Path<(String, String)>,
    request: Request,
) -> PortalResult<Response> {
    serve_app(&state, &app_name, Some(&filename), request).await
}

async fn serve_app(
    state: &AppState,
    app_name: &str,
    filename: Option<&str>,
    request: Request,
) -> PortalResult<Response> {
    if !state.registry.is_valid_id(app_name) {
        return Err(PortalError::UnknownApp(app_name.to_string()));
    }

    state.assets.serve(app_name, filename, request).await
}
