use anyhow::Result;
use sf_contact_form::config::ContactFormConfig;
use sf_telemetry::{install as init_telemetry, shutdown_telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry("sf-contact-form")?;

    let config = ContactFormConfig::from_env()?;
    tracing::info!(config = ?config, "sf-contact-form booting");

    let result = sf_contact_form::run(config).await;
    shutdown_telemetry();
    result
}
