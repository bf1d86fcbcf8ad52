//! Observability: server-side diagnostics for every request outcome.

mod log;
mod noop;
pub mod traits;

pub use self::log::LogObserver;
pub use noop::NoopObserver;
pub use traits::{Observer, ObserverEvent};

use crate::config::ObservabilityConfig;

/// Create an observer from config. Unknown backends fall back to `log`.
pub fn create_observer(config: &ObservabilityConfig) -> Box<dyn Observer> {
    match config.backend.as_str() {
        "none" | "noop" => Box::new(NoopObserver),
        "log" | "" => Box::new(LogObserver::new()),
        other => {
            tracing::warn!(backend = other, "Unknown observability backend, using log");
            Box::new(LogObserver::new())
        }
    }
}
