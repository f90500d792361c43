use overmind_shortener::{config, server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::new(&config.log_level));
    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    config.print_summary();

    server::run(config).await
}
