use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use tracing::error;

use crate::error::ContactError;
use crate::types::{ContactId, ContactResult, ContactSubmission, CreateContactRequest};
use crate::validate::{validate_api_key, validate_email};

pub const DEFAULT_API_BASE: &str = "https://api.brevo.com/v3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Environment variable the bootstrap layer reads the credential from.
pub const API_KEY_ENV: &str = "VITE_BREVO_API_KEY";

/// Creates (or identifies) a CRM contact from a form submission.
#[async_trait]
pub trait ContactAdapter: Send + Sync {
    async fn create_contact(&self, submission: &ContactSubmission) -> ContactResult;
}

#[derive(Clone)]
pub struct BrevoConfig {
    api_key: Option<String>,
    api_base: String,
    timeout: Duration,
}

impl BrevoConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            api_base: DEFAULT_API_BASE.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

impl fmt::Debug for BrevoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrevoConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct BrevoClient {
    http: reqwest::Client,
    config: BrevoConfig,
}

impl BrevoClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::from_config(BrevoConfig::new(api_key))
    }

    pub fn from_config(config: BrevoConfig) -> Self {
        Self::with_config(reqwest::Client::new(), config)
    }

    pub fn with_config(http: reqwest::Client, config: BrevoConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &BrevoConfig {
        &self.config
    }

    async fn try_create_contact(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactResult, ContactError> {
        let api_key = validate_api_key(self.config.api_key.as_deref())?;
        let email = validate_email(submission.email.as_deref())?;

        let mut api_key = HeaderValue::from_str(api_key)
            .map_err(|err| ContactError::Unexpected(Box::new(err)))?;
        api_key.set_sensitive(true);

        let payload = CreateContactRequest::new(email, submission);
        let response = self
            .http
            .post(self.build_url("contacts"))
            .header("api-key", api_key)
            .header(ACCEPT, "application/json")
            .json(&payload)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(ContactError::from_transport)?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            // Brevo usually answers a duplicate with an error body and no id.
            let id = response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<Value>(&body).ok())
                .as_ref()
                .and_then(ContactId::from_body);
            return Ok(ContactResult::Success {
                id,
                email: email.to_string(),
                duplicate: true,
            });
        }

        if !status.is_success() {
            return Err(ContactError::api(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(ContactError::from_transport)?;
        let raw: Value = serde_json::from_slice(&body).map_err(ContactError::InvalidResponse)?;

        Ok(ContactResult::Success {
            id: ContactId::from_body(&raw),
            email: email.to_string(),
            duplicate: false,
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ContactAdapter for BrevoClient {
    async fn create_contact(&self, submission: &ContactSubmission) -> ContactResult {
        match self.try_create_contact(submission).await {
            Ok(result) => result,
            Err(err) => {
                if err.is_reportable() {
                    let status = match &err {
                        ContactError::Api { status, .. } => Some(*status),
                        _ => None,
                    };
                    let cause = std::error::Error::source(&err).map(ToString::to_string);
                    error!(
                        kind = ?err.kind(),
                        status = ?status,
                        cause = cause.as_deref().unwrap_or(""),
                        "brevo contact creation failed: {err}"
                    );
                }
                ContactResult::from(err)
            }
        }
    }
}
