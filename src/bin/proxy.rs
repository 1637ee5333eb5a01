use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vigil::config::ProxyConfig;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("vigil=debug".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("🔎 Starting status dashboard proxy...");
    let config = ProxyConfig::from_env();

    if let Err(e) = vigil::proxy::run(config).await {
        error!("Proxy server error: {}", e);
    }
}
