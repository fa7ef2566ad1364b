use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use classroom_portal::app::{self, AppState};
use classroom_portal::config::PortalConfig;

#[derive(Parser)]
#[command(name = "classroom-portal")]
#[command(about = "Password-gated portal for classroom math apps")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Interface to bind (overrides PORTAL_HOST)")]
    host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides PORTAL_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Directory holding one sub-directory per app (overrides PORTAL_STATIC_DIR)")]
    static_dir: Option<PathBuf>,

    #[arg(long, help = "JSON catalog replacing the built-in app list (overrides PORTAL_CATALOG)")]
    catalog: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: PortalConfig) -> PortalConfig {
        if let Some(host) = self.host {
            config.bind_host = host;
        }
        if let Some(port) = self.port {
            config.bind_port = port;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = dir;
        }
        if let Some(catalog) = self.catalog {
            config.catalog_path = Some(catalog);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so PORTAL_CLASS_PASSWORD etc. can live next to the binary
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("classroom_portal=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.apply(PortalConfig::from_env());
    tracing::info!("Starting classroom portal in {:?} mode", config.environment);

    let addr = config.bind_addr();
    let state = AppState::from_config(config)?;
    app::serve(state, &addr).await
}
