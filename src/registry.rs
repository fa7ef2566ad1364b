//! Catalog of mini-apps served by the portal.
//!
//! The registry is built once at startup, either from the built-in catalog or
//! from a JSON file, and is read-only afterwards. Declaration order is the
//! order shown on the dashboard.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Path segments owned by the login flow; an app may not shadow them.
pub const RESERVED_IDS: &[&str] = &["login", "logout"];

/// One mini-app entry on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub mount_path: String,
}

impl AppDescriptor {
    pub fn new(id: &str, title: &str, description: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            mount_path: format!("/{id}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate app id '{0}'")]
    DuplicateId(String),
    #[error("app id '{0}' is not a URL-safe slug (lowercase letters, digits, '-')")]
    InvalidId(String),
    #[error("app id '{0}' is reserved")]
    ReservedId(String),
    #[error("mount path '{0}' must be '/' followed by the app id")]
    InvalidMountPath(String),
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

static BUILTIN_APPS: Lazy<Vec<AppDescriptor>> = Lazy::new(|| {
    vec![
        AppDescriptor::new(
            "transformations",
            "Transformations",
            "Explore geometric transformations on a coordinate plane",
            "🔄",
        ),
        AppDescriptor::new(
            "pythagoras",
            "Pythagorean Theorem",
            "Learn and practice the Pythagorean theorem",
            "📐",
        ),
        AppDescriptor::new(
            "volume-shapes",
            "Volume of Shapes",
            "Calculate volumes of 3D geometric shapes",
            "📦",
        ),
        AppDescriptor::new(
            "angles-triangles",
            "Angles & Triangles",
            "Study angles and triangle properties",
            "△",
        ),
        AppDescriptor::new(
            "solving-equations",
            "Solving Equations",
            "Practice solving equations and inequalities",
            "✖️",
        ),
    ]
});

/// Ordered, immutable set of apps. Ids are unique.
#[derive(Debug, Clone)]
pub struct AppRegistry {
    apps: Vec<AppDescriptor>,
}

impl AppRegistry {
    /// Validate and wrap a list of descriptors, keeping their order.
    pub fn new(apps: Vec<AppDescriptor>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        let mut apps = apps;
        for app in &mut apps {
            if !is_slug(&app.id) {
                return Err(RegistryError::InvalidId(app.id.clone()));
            }
            if RESERVED_IDS.contains(&app.id.as_str()) {
                return Err(RegistryError::ReservedId(app.id.clone()));
            }
            if !seen.insert(app.id.clone()) {
                return Err(RegistryError::DuplicateId(app.id.clone()));
            }
            if app.mount_path.is_empty() {
                app.mount_path = format!("/{}", app.id);
            } else if app.mount_path != format!("/{}", app.id) {
                return Err(RegistryError::InvalidMountPath(app.mount_path.clone()));
            }
        }
        Ok(Self { apps })
    }

    /// The catalog the portal ships with.
    pub fn builtin() -> Self {
        Self {
            apps: BUILTIN_APPS.clone(),
        }
    }

    /// Load a catalog from a JSON array of descriptors.
    pub fn from_json_file(path: &Path) -> Result<Self, RegistryError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: display.clone(),
            source,
        })?;
        let apps: Vec<AppDescriptor> =
            serde_json::from_str(&raw).map_err(|source| RegistryError::Parse {
                path: display,
                source,
            })?;
        Self::new(apps)
    }

    pub fn list_apps(&self) -> &[AppDescriptor] {
        &self.apps
    }

    pub fn is_valid_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&AppDescriptor> {
        if id.is_empty() {
            return None;
        }
        self.apps.iter().find(|app| app.id == id)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

fn is_slug(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
