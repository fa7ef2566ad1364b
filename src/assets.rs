//! Maps `(app, filename)` pairs onto files under the static root.
//!
//! Containment is checked twice: lexically before anything touches the
//! filesystem, then against the canonical path for files that exist, so a
//! symlink inside an app directory cannot point outside of it. Actual file
//! delivery (content types, conditional requests, missing files) is left to
//! `tower_http::services::ServeFile`.

use axum::{
    body::Body,
    extract::Request,
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use std::path::{Component, Path, PathBuf};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::error::{PortalError, PortalResult};

/// Document served when a request names an app but no file.
pub const INDEX_DOCUMENT: &str = "index.html";

#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn app_dir(&self, app_id: &str) -> PathBuf {
        self.root.join(app_id)
    }

    /// Compute the on-disk path for a request. `app_id` must already be
    /// validated against the registry.
    pub async fn resolve(&self, app_id: &str, filename: Option<&str>) -> PortalResult<PathBuf> {
        let app_dir = self.app_dir(app_id);
        let relative = match filename.map(|f| f.trim_start_matches('/')) {
            None | Some("") => return Ok(app_dir.join(INDEX_DOCUMENT)),
            Some(relative) => relative,
        };

        let relative_path = contained_relative(relative)
            .ok_or_else(|| PortalError::PathEscape(format!("{app_id}/{relative}")))?;
        let candidate = app_dir.join(relative_path);

        // Missing files are not ours to judge; ServeFile answers 404.
        let Ok(canonical) = tokio::fs::canonicalize(&candidate).await else {
            return Ok(candidate);
        };
        let canonical_dir = tokio::fs::canonicalize(&app_dir)
            .await
            .map_err(|e| PortalError::Internal(format!("app directory {}: {e}", app_dir.display())))?;
        if !canonical.starts_with(&canonical_dir) {
            return Err(PortalError::PathEscape(format!("{app_id}/{relative}")));
        }

        // ServeFile would answer 200 for a directory and then fail mid-body
        let is_file = tokio::fs::metadata(&canonical)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(PortalError::AssetNotFound(format!("{app_id}/{relative}")));
        }

        Ok(candidate)
    }

    /// Resolve and deliver a file for an incoming request.
    pub async fn serve(
        &self,
        app_id: &str,
        filename: Option<&str>,
        request: Request,
    ) -> PortalResult<Response> {
        let path = self.resolve(app_id, filename).await?;
        Ok(serve_file(&path, request).await)
    }
}

/// Accept only plain downward paths: no `..`, no roots, no drive prefixes.
fn contained_relative(relative: &str) -> Option<PathBuf> {
    if relative.contains('\0') || relative.contains('\\') {
        return None;
    }

    let mut clean = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if clean.as_os_str().is_empty() {
        return None;
    }
    Some(clean)
}

async fn serve_file(path: &Path, request: Request) -> Response {
    let result: Result<_, Infallible> = ServeFile::new(path).oneshot(request).await;
    match result {
        Ok(response) => response.map(Body::new).into_response(),
        Err(never) => match never {},
    }
}
