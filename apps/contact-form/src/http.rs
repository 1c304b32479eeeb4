use std::sync::Arc;

use axum::{
    Router, debug_handler,
    extract::{Extension, Json},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use sf_contacts::{ContactAdapter, ContactResult, ContactSubmission};
use sf_flags::FlagProvider;
use sf_telemetry::ErrorReporter;
use tracing::{Instrument, info};

#[derive(Clone)]
pub struct ContactFormState {
    pub contacts: Arc<dyn ContactAdapter>,
    pub flags: Arc<dyn FlagProvider>,
    pub reporter: Arc<dyn ErrorReporter>,
    pub crm_flag: String,
}

/// Fields posted by the landing page form.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrmSync {
    Synced,
    Duplicate,
    Failed,
    Skipped,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ContactFormResponse {
    pub status: &'static str,
    pub crm: CrmSync,
}

#[derive(Serialize, Debug)]
pub struct ApiError {
    pub error: String,
}

pub fn build_router(state: ContactFormState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/contact", post(submit_contact))
        .layer(Extension(Arc::new(state)))
}

async fn healthz() -> &'static str {
    "ok"
}

#[debug_handler]
async fn submit_contact(
    Extension(state): Extension<Arc<ContactFormState>>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ContactFormResponse>, (StatusCode, Json<ApiError>)> {
    handle_contact(state, form).await
}

/// Accepts a form submission. The CRM sync is advisory: once the form itself validates,
/// the submission is acknowledged whatever the adapter reports.
pub async fn handle_contact(
    state: Arc<ContactFormState>,
    form: ContactForm,
) -> Result<Json<ContactFormResponse>, (StatusCode, Json<ApiError>)> {
    validate_form(&form).map_err(|error| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError { error }),
        )
    })?;

    let span = tracing::info_span!("contact_form", crm_flag = %state.crm_flag);
    async move {
        let crm = if state.flags.is_enabled(&state.crm_flag) {
            sync_contact(&state, &form).await
        } else {
            info!("crm sync disabled by feature flag");
            CrmSync::Skipped
        };

        Ok(Json(ContactFormResponse {
            status: "received",
            crm,
        }))
    }
    .instrument(span)
    .await
}

async fn sync_contact(state: &ContactFormState, form: &ContactForm) -> CrmSync {
    let submission = ContactSubmission::new(form.email.clone())
        .with_first_name(form.name.trim())
        .with_attribute("message", form.message.clone());

    match state.contacts.create_contact(&submission).await {
        ContactResult::Success {
            duplicate: true, ..
        } => {
            info!("contact already present in crm");
            CrmSync::Duplicate
        }
        ContactResult::Success { id, .. } => {
            info!(contact_id = ?id, "contact synced to crm");
            CrmSync::Synced
        }
        ContactResult::Failure { error } => {
            state
                .reporter
                .capture_message(&format!("brevo contact sync failed: {error}"));
            CrmSync::Failed
        }
    }
}

fn validate_form(form: &ContactForm) -> Result<(), String> {
    for (field, value) in [
        ("name", &form.name),
        ("email", &form.email),
        ("message", &form.message),
    ] {
        if value.trim().is_empty() {
            return Err(format!("{field} is required"));
        }
    }
    Ok(())
}
