//! Performance tables as delivered by the ingestion pipeline, and the two stages that turn
//! them into something interpolable: selecting the right table for a phase and weight, and
//! normalizing its loosely-typed rows into an altitude × temperature grid.

pub mod aliases;
pub mod normalize;
pub mod phase;
pub mod select;
pub mod table;

pub use aliases::FieldAliases;
pub use normalize::{
    Field, GridShapeError, Matrix, Normalization, NormalizedGrid, RowIssue, Series,
    TableNormalizer,
};
pub use phase::{Phase, PhaseKeywords};
pub use select::{Selection, SelectionStrategy, TableSelector, WeightedTable};
pub use table::{DataPoint, PerformanceTable, RawRow};
