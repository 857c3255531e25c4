//! Performance façade crate: resolves inputs, drives table selection, interpolation,
//! corrections and wind analysis, and exposes the supporting crates.

pub mod flight;
pub mod inputs;
pub mod orchestrator;
pub mod result;
pub mod settings;
pub mod weather;

pub use aeroperf_corrections as corrections;
pub use aeroperf_interp as interp;
pub use aeroperf_tables as tables;
pub use aeroperf_wind as wind;
pub use facade::*;

mod facade;
