#![allow(dead_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use classroom_portal::app::{build_router, AppState};
use classroom_portal::config::PortalConfig;
use tokio::task::JoinHandle;

pub const CLASS_PASSWORD: &str = "pi314";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub static_root: PathBuf,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start the portal inside the current test runtime, serving a throwaway
    /// static tree with a couple of apps in it.
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let static_root = std::env::temp_dir().join(format!("portal-it-{}", uuid::Uuid::new_v4()));
        write_fixture_apps(&static_root)?;

        let config = PortalConfig {
            class_password: CLASS_PASSWORD.to_string(),
            bind_host: "127.0.0.1".to_string(),
            bind_port: port,
            static_dir: static_root.clone(),
            ..PortalConfig::development()
        };
        let listener = tokio::net::TcpListener::bind(config.bind_addr())
            .await
            .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
        let state = AppState::from_config(config)?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, build_router(state)).await {
                eprintln!("test server stopped: {e}");
            }
        });

        Ok(Self { port, base_url, static_root, handle })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Browser-like client: keeps cookies, but leaves redirects to the test.
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("client")
    }

    /// A client that has already passed the password gate.
    pub async fn signed_in_client(&self) -> Result<reqwest::Client> {
        let client = self.client();
        let res = client
            .post(self.url("/login"))
            .form(&[("password", CLASS_PASSWORD)])
            .send()
            .await?;
        anyhow::ensure!(
            res.status() == reqwest::StatusCode::SEE_OTHER,
            "login failed with {}",
            res.status()
        );
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
        std::fs::remove_dir_all(&self.static_root).ok();
    }
}

fn write_fixture_apps(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root.join("transformations/assets"))?;
    std::fs::write(root.join("transformations/index.html"), "<h1>Transformations</h1>")?;
    std::fs::write(root.join("transformations/style.css"), "body { margin: 0; }")?;
    std::fs::write(root.join("transformations/assets/app.js"), "console.log('reflect');")?;
    std::fs::create_dir_all(root.join("pythagoras"))?;
    std::fs::write(root.join("pythagoras/index.html"), "<h1>a² + b² = c²</h1>")?;
    // Outside every app directory
    std::fs::write(root.join("answers.txt"), "answer key")?;
    Ok(())
}

pub fn location(res: &reqwest::Response) -> Option<&str> {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
