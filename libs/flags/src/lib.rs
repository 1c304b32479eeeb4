//! Feature-flag capability.
//!
//! Services only ask "is this flag on?". A flag resolves to a bare boolean or to an object
//! carrying a `value` field; anything absent or falsy counts as disabled.
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Environment variable holding a JSON object of flag values.
pub const FLAGS_ENV: &str = "SF_FEATURE_FLAGS";

#[derive(Debug, Error)]
pub enum FlagsError {
    #[error("feature flags must be a JSON object")]
    NotAnObject,
    #[error("invalid feature flag JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Detailed {
        #[serde(default)]
        value: Option<Value>,
    },
    Raw(Value),
}

impl FlagValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Bool(enabled) => *enabled,
            FlagValue::Detailed { value } => value.as_ref().is_some_and(truthy),
            FlagValue::Raw(value) => truthy(value),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(enabled: bool) -> Self {
        FlagValue::Bool(enabled)
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub trait FlagProvider: Send + Sync {
    fn flag(&self, key: &str) -> Option<FlagValue>;

    fn is_enabled(&self, key: &str) -> bool {
        self.flag(key).is_some_and(|flag| flag.is_truthy())
    }
}

impl<P: FlagProvider + ?Sized> FlagProvider for Arc<P> {
    fn flag(&self, key: &str) -> Option<FlagValue> {
        (**self).flag(key)
    }
}

/// Fixed set of flags, typically loaded once at startup.
#[derive(Clone, Debug, Default)]
pub struct StaticFlags {
    flags: BTreeMap<String, FlagValue>,
}

impl StaticFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.flags.insert(key.into(), value.into());
        self
    }

    pub fn from_json(raw: &str) -> Result<Self, FlagsError> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(map) = value else {
            return Err(FlagsError::NotAnObject);
        };
        let flags = map
            .into_iter()
            .map(|(key, value)| -> Result<(String, FlagValue), FlagsError> {
                Ok((key, serde_json::from_value(value)?))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Self { flags })
    }

    /// Reads [`FLAGS_ENV`]. Unset yields no flags; malformed JSON is logged and ignored.
    pub fn from_env() -> Self {
        match std::env::var(FLAGS_ENV) {
            Ok(raw) => Self::from_json(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "ignoring {FLAGS_ENV}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FlagProvider for StaticFlags {
    fn flag(&self, key: &str) -> Option<FlagValue> {
        self.flags.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flags_are_disabled() {
        let flags = StaticFlags::new();
        assert_eq!(flags.flag("brevo_contact_sync"), None);
        assert!(!flags.is_enabled("brevo_contact_sync"));
    }

    #[test]
    fn booleans_and_value_objects_resolve() {
        let flags = StaticFlags::from_json(
            r#"{
                "on": true,
                "off": false,
                "object_on": { "enabled": true, "value": true },
                "object_off": { "value": false },
                "object_empty": { "enabled": true },
                "object_string": { "value": "variant-b" },
                "zero": 0,
                "blank": "",
                "null": null
            }"#,
        )
        .unwrap();

        assert!(flags.is_enabled("on"));
        assert!(!flags.is_enabled("off"));
        assert!(flags.is_enabled("object_on"));
        assert!(!flags.is_enabled("object_off"));
        assert!(!flags.is_enabled("object_empty"));
        assert!(flags.is_enabled("object_string"));
        assert!(!flags.is_enabled("zero"));
        assert!(!flags.is_enabled("blank"));
        assert!(!flags.is_enabled("null"));
        assert_eq!(flags.len(), 9);
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(matches!(
            StaticFlags::from_json("[true]"),
            Err(FlagsError::NotAnObject)
        ));
        assert!(matches!(
            StaticFlags::from_json("{not json"),
            Err(FlagsError::Parse(_))
        ));
    }

    #[test]
    fn shared_providers_delegate() {
        let flags: Arc<dyn FlagProvider> = Arc::new(StaticFlags::new().with_flag("beta", true));
        assert!(flags.is_enabled("beta"));
        assert!(!flags.is_enabled("gamma"));
    }
}
