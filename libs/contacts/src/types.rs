use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::ContactError;

/// Contact data captured from a form submission.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl ContactSubmission {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Identifier assigned by Brevo. The API returns numbers but older payloads carried strings.
/// Numbers are kept as received so ids outside the `i64` range, or sent as floats, survive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactId {
    Number(Number),
    Text(String),
}

impl ContactId {
    /// Extracts `id` from a Brevo response body, if present and well-typed.
    pub fn from_body(body: &Value) -> Option<Self> {
        match body.get("id")? {
            Value::Number(n) => Some(ContactId::Number(n.clone())),
            Value::String(s) => Some(ContactId::Text(s.clone())),
            _ => None,
        }
    }
}

/// Outcome of a single contact creation attempt.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ContactResult {
    Success {
        id: Option<ContactId>,
        email: String,
        duplicate: bool,
    },
    Failure {
        error: String,
    },
}

impl ContactResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ContactResult::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ContactResult::Failure { error } => Some(error),
            ContactResult::Success { .. } => None,
        }
    }
}

impl From<ContactError> for ContactResult {
    fn from(err: ContactError) -> Self {
        ContactResult::Failure {
            error: err.to_string(),
        }
    }
}

/// Wire body of `POST /contacts`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateContactRequest<'a> {
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<&'a str>,
    pub attributes: &'a Map<String, Value>,
}

impl<'a> CreateContactRequest<'a> {
    pub(crate) fn new(email: &'a str, submission: &'a ContactSubmission) -> Self {
        Self {
            email,
            first_name: non_empty(submission.first_name.as_deref()),
            last_name: non_empty(submission.last_name.as_deref()),
            attributes: &submission.attributes,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_absent_names() {
        for submission in [
            ContactSubmission::new("a@b.co"),
            ContactSubmission::new("a@b.co")
                .with_first_name("")
                .with_last_name(""),
        ] {
            let body =
                serde_json::to_value(CreateContactRequest::new("a@b.co", &submission)).unwrap();
            assert_eq!(body, json!({ "email": "a@b.co", "attributes": {} }));
        }
    }

    #[test]
    fn request_carries_names_and_attributes() {
        let submission = ContactSubmission::new("a@b.co")
            .with_first_name("Ada")
            .with_last_name("Lovelace")
            .with_attribute("message", "hello");
        let body = serde_json::to_value(CreateContactRequest::new("a@b.co", &submission)).unwrap();
        assert_eq!(
            body,
            json!({
                "email": "a@b.co",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "attributes": { "message": "hello" }
            })
        );
    }

    #[test]
    fn submission_deserializes_from_camel_case() {
        let submission: ContactSubmission =
            serde_json::from_value(json!({ "email": "x@y.io", "firstName": "X" })).unwrap();
        assert_eq!(submission.first_name.as_deref(), Some("X"));
        assert!(submission.attributes.is_empty());
    }

    #[test]
    fn contact_id_accepts_numbers_and_strings() {
        assert_eq!(
            ContactId::from_body(&json!({ "id": 42 })),
            Some(ContactId::Number(42.into()))
        );
        assert_eq!(
            ContactId::from_body(&json!({ "id": u64::MAX })),
            Some(ContactId::Number(u64::MAX.into()))
        );
        assert_eq!(
            ContactId::from_body(&json!({ "id": 1.0 })),
            Some(ContactId::Number(Number::from_f64(1.0).unwrap()))
        );
        assert_eq!(
            ContactId::from_body(&json!({ "id": "c-1" })),
            Some(ContactId::Text("c-1".into()))
        );
        assert_eq!(ContactId::from_body(&json!({ "code": "x" })), None);
    }

    #[test]
    fn failure_serializes_with_outcome_tag() {
        let value = serde_json::to_value(ContactResult::from(ContactError::InvalidEmail)).unwrap();
        assert_eq!(
            value,
            json!({ "outcome": "failure", "error": "Invalid email format" })
        );
    }
}
