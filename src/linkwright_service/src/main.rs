use color_eyre::eyre::Result;
use linkwright_adapters::config::Settings;
use linkwright_service::LinkService;
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;
    tracing::info!(backend = ?settings.backend, "Configuration loaded");

    let service = LinkService::from_settings(&settings)?;
    let listener = TcpListener::bind(settings.application.address()).await?;

    service.run_standalone(listener, &settings.cors).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
