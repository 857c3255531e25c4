//! Shared plumbing for the AeroPerf binaries.

use std::io;
use std::path::Path;

use aeroperf::config::load_engine_config;
use aeroperf::performance::{Caveat, EngineSettings};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Engine settings from an optional configuration file, defaults otherwise.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<EngineSettings> {
    match path {
        Some(path) => {
            let config = load_engine_config(path)?;
            Ok(EngineSettings::from_config(&config))
        }
        None => {
            debug!("no engine configuration given, using defaults");
            Ok(EngineSettings::default())
        }
    }
}

/// Forward result caveats to the log.
pub fn log_caveats(context: &str, caveats: &[Caveat]) {
    for caveat in caveats {
        warn!(%context, "{caveat}");
    }
}

/// Format an optional distance for display.
pub fn metres(value: Option<f64>) -> String {
    match value {
        Some(m) => format!("{m:.0} m"),
        None => "n/a".to_string(),
    }
}
