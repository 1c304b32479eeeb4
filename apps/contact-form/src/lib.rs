pub mod config;
pub mod http;

use std::sync::Arc;

use anyhow::Result;
use axum::serve;
use sf_flags::StaticFlags;
use sf_telemetry::TracingErrorReporter;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ContactFormConfig;
use crate::http::{ContactFormState, build_router};

/// Wires the production collaborators from `config`.
pub fn production_state(config: &ContactFormConfig) -> ContactFormState {
    let contacts = config.brevo_client();
    if !contacts.config().has_api_key() {
        warn!("brevo api key missing or empty; crm sync will report failures");
    }
    let flags = StaticFlags::from_env();
    info!(
        flags = flags.len(),
        crm_flag = %config.crm_flag,
        "loaded feature flags"
    );
    ContactFormState {
        contacts: Arc::new(contacts),
        flags: Arc::new(flags),
        reporter: Arc::new(TracingErrorReporter),
        crm_flag: config.crm_flag.clone(),
    }
}

pub async fn run(config: ContactFormConfig) -> Result<()> {
    let router = build_router(production_state(&config));
    let listener = TcpListener::bind(config.addr).await?;
    info!("sf-contact-form listening on {}", listener.local_addr()?);

    serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
