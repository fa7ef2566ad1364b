//! Askama templates for the login form and dashboard.

use askama::Template;
use axum::response::Html;

use crate::error::PortalResult;
use crate::registry::AppDescriptor;

/// Login page template
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Dashboard page template
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub apps: &'a [AppDescriptor],
}

/// Render any template into an HTML response body.
pub fn render_html<T: Template>(template: &T) -> PortalResult<Html<String>> {
    Ok(Html(template.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AppRegistry;

    #[test]
    fn test_login_without_error() {
        let html = LoginTemplate { error: None }.render().unwrap();
        assert!(html.contains(r#"name="password""#));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn test_login_shows_error() {
        let html = LoginTemplate {
            error: Some("Wrong password, try again!".into()),
        }
        .render()
        .unwrap();
        assert!(html.contains("Wrong password, try again!"));
    }

    #[test]
    fn test_dashboard_lists_apps_in_order() {
        let registry = AppRegistry::builtin();
        let html = DashboardTemplate {
            apps: registry.list_apps(),
        }
        .render()
        .unwrap();

        let mut last = 0;
        for app in registry.list_apps() {
            let href = format!(r#"href="{}""#, app.mount_path);
            let pos = html.find(&href).unwrap_or_else(|| panic!("missing {}", app.id));
            assert!(pos >= last, "{} out of order", app.id);
            last = pos;
        }
        // Askama escapes the ampersand in "Angles & Triangles"
        assert!(html.contains("Angles &amp; Triangles"));
    }
}
