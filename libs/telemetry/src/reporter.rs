use std::error::Error;

/// Sink for errors worth surfacing to an error-tracking backend.
pub trait ErrorReporter: Send + Sync {
    fn capture(&self, error: &(dyn Error + 'static));

    fn capture_message(&self, message: &str);
}

/// Records captured errors as `error` events; an OTLP exporter ships them when enabled.
#[derive(Clone, Debug, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn capture(&self, error: &(dyn Error + 'static)) {
        let chain = error_chain(error);
        tracing::error!(
            target: "sf::errors",
            error = %error,
            chain = ?chain,
            "captured error"
        );
    }

    fn capture_message(&self, message: &str) {
        tracing::error!(target: "sf::errors", "{message}");
    }
}

/// Display strings of `error` and each of its sources, outermost first.
pub fn error_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    std::iter::successors(Some(error), |err| (*err).source())
        .map(ToString::to_string)
        .collect()
}

#[cfg(any(test, feature = "testkit"))]
pub use memory::MemoryErrorReporter;

#[cfg(any(test, feature = "testkit"))]
mod memory {
    use super::*;
    use std::sync::Mutex;

    /// Keeps captured messages in memory for assertions.
    #[derive(Debug, Default)]
    pub struct MemoryErrorReporter {
        captured: Mutex<Vec<String>>,
    }

    impl MemoryErrorReporter {
        pub fn captured(&self) -> Vec<String> {
            self.captured
                .lock()
                .map(|captured| captured.clone())
                .unwrap_or_default()
        }
    }

    impl ErrorReporter for MemoryErrorReporter {
        fn capture(&self, error: &(dyn Error + 'static)) {
            self.capture_message(&error_chain(error).join(": "));
        }

        fn capture_message(&self, message: &str) {
            if let Ok(mut captured) = self.captured.lock() {
                captured.push(message.to_string());
            }
        }
    }
}
