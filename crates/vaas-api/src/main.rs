use tracing_subscriber::EnvFilter;
use vaas_api::Config;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    if let Err(err) = vaas_api::run(config).await {
        tracing::error!(error = %err, "server exited");
        std::process::exit(1);
    }
}
