//! # Domain Models
//!
//! Typed records flowing through the sectorscope pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RawRecord`] | Wire form of one company-day observation |
//! | [`NormalizedEntry`] | Validated observation with a parsed date |
//! | [`SeriesPoint`] | Observation annotated with percentage changes |
//! | [`CompanySeries`] | One company's chronological observations |
//! | [`RankedSelection`] | Top-N companies by market cap |
//! | [`WeightedNode`] | Treemap leaf (weight + change) |
//! | [`Hierarchy`] | Treemap input plus diverging color domain |
//! | [`CompanyName`] | Validated company display name |
//! | [`TradeDate`] | Calendar date with total order |
//!
//! Construction validates invariants; every stage of the pipeline produces
//! fresh values rather than mutating its input.

mod company;
mod date;
mod models;

pub use company::CompanyName;
pub use date::TradeDate;
pub use models::{
    ColorDomain, CompanySeries, Hierarchy, NormalizedEntry, RankedSelection, RawRecord,
    SeriesPoint, WeightedNode,
};
