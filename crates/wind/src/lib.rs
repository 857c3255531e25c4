//! Wind components per runway end and the policy that turns them into a runway suggestion.

pub mod analysis;
pub mod runway;
pub mod vector;

pub use analysis::{
    Category, CrosswindSide, RunwayAnalysis, WindAnalyzer, WindCondition, WindPolicy, WindReport,
};
pub use runway::{RunwayEnd, RunwayParseError, ends_from_designator, surface_compatible};
pub use vector::{WindDirection, WindVector};
