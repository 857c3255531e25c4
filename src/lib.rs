//! Takeoff and landing performance from manufacturer tables.
//!
//! The workspace crates are re-exported here so that front-ends (the CLI today) depend on a
//! single library: tables are selected and normalized into an altitude × temperature grid,
//! interpolated, corrected for runway and wind conditions, and paired with a wind ranking of
//! the runway ends.

pub use aeroperf_config as config;
pub use aeroperf_core as primitives;
pub use aeroperf_corrections as corrections;
pub use aeroperf_export as export;
pub use aeroperf_interp as interp;
pub use aeroperf_performance as performance;
pub use aeroperf_tables as tables;
pub use aeroperf_wind as wind;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
