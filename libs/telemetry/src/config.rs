use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryProtocol {
    Grpc,
    HttpProtobuf,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub endpoint: String,
    pub protocol: TelemetryProtocol,
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
    pub json_logs: bool,
    pub enabled: bool,
}

impl TelemetryConfig {
    pub fn from_env(service_name: &str, service_version: &str) -> Self {
        Self::from_lookup(service_name, service_version, |key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; `from_env` passes the process env.
    pub fn from_lookup<F>(service_name: &str, service_version: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or_default();
        let protocol = match lookup("OTEL_EXPORTER_OTLP_PROTOCOL").as_deref() {
            Some(p) if p.eq_ignore_ascii_case("http") || p.eq_ignore_ascii_case("http/protobuf") => {
                TelemetryProtocol::HttpProtobuf
            }
            _ => TelemetryProtocol::Grpc,
        };
        let json_logs = lookup("LOG_FORMAT").is_none_or(|format| {
            !matches!(format.to_lowercase().as_str(), "text" | "pretty" | "plain")
        });
        let enabled = lookup("ENABLE_OTEL").is_some_and(|flag| {
            matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
        });

        Self {
            endpoint,
            protocol,
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or_else(|| service_name.to_string()),
            service_version: service_version.to_string(),
            environment: lookup("DEPLOYMENT_ENV").unwrap_or_else(|| "dev".into()),
            json_logs,
            enabled,
        }
    }

    /// Spans are exported only when `ENABLE_OTEL` is set and an endpoint is configured.
    pub fn exporter_enabled(&self) -> bool {
        self.enabled && !self.endpoint.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> TelemetryConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TelemetryConfig::from_lookup("sf-contact-form", "0.1.0", |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_json_logs_without_export() {
        let cfg = config(&[]);
        assert_eq!(cfg.service_name, "sf-contact-form");
        assert_eq!(cfg.environment, "dev");
        assert!(cfg.json_logs);
        assert!(!cfg.exporter_enabled());
    }

    #[test]
    fn export_requires_flag_and_endpoint() {
        assert!(!config(&[("ENABLE_OTEL", "true")]).exporter_enabled());
        assert!(!config(&[("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317")])
            .exporter_enabled());
        let cfg = config(&[
            ("ENABLE_OTEL", "yes"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4318"),
            ("OTEL_EXPORTER_OTLP_PROTOCOL", "http/protobuf"),
        ]);
        assert!(cfg.exporter_enabled());
        assert_eq!(cfg.protocol, TelemetryProtocol::HttpProtobuf);
    }

    #[test]
    fn service_name_and_environment_come_from_env() {
        let cfg = config(&[
            ("OTEL_SERVICE_NAME", "sf-landing"),
            ("DEPLOYMENT_ENV", "prod"),
            ("LOG_FORMAT", "Pretty"),
        ]);
        assert_eq!(cfg.service_name, "sf-landing");
        assert_eq!(cfg.service_version, "0.1.0");
        assert_eq!(cfg.environment, "prod");
        assert!(!cfg.json_logs);
    }
}
