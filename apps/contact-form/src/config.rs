use std::fmt;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use sf_contacts::{API_KEY_ENV, BrevoClient, BrevoConfig};

pub const DEFAULT_CRM_FLAG: &str = "brevo_contact_sync";

#[derive(Clone)]
pub struct ContactFormConfig {
    pub addr: SocketAddr,
    /// Passed to the adapter untouched: an unset variable and an empty one fail differently.
    pub brevo_api_key: Option<String>,
    pub brevo_api_base: Option<String>,
    pub crm_flag: String,
}

impl ContactFormConfig {
    pub fn from_env() -> Result<Self> {
        let addr = std::env::var("SF_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
        let addr = addr
            .parse()
            .with_context(|| format!("invalid SF_BIND_ADDR {addr}"))?;
        Ok(Self {
            addr,
            brevo_api_key: std::env::var(API_KEY_ENV).ok(),
            brevo_api_base: std::env::var("BREVO_API_BASE")
                .ok()
                .filter(|base| !base.trim().is_empty()),
            crm_flag: std::env::var("SF_CRM_FLAG").unwrap_or_else(|_| DEFAULT_CRM_FLAG.into()),
        })
    }

    pub fn brevo_client(&self) -> BrevoClient {
        let mut config = BrevoConfig::new(self.brevo_api_key.clone());
        if let Some(base) = &self.brevo_api_base {
            config = config.with_api_base(base.clone());
        }
        BrevoClient::from_config(config)
    }
}

impl fmt::Debug for ContactFormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactFormConfig")
            .field("addr", &self.addr)
            .field(
                "brevo_api_key",
                &self.brevo_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("brevo_api_base", &self.brevo_api_base)
            .field("crm_flag", &self.crm_flag)
            .finish()
    }
}
