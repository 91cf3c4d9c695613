//! # Sectorscope Core
//!
//! Data-transformation pipeline behind the sectorscope line chart and
//! treemap.
//!
//! ## Overview
//!
//! Raw per-date stock records are turned into:
//!
//! - **Ranked, normalized series** for the line view: each company's closes
//!   expressed as a percentage of its first close, plus day-over-day change
//! - **A weighted hierarchy** for the treemap view: market-cap weights, window
//!   change, and a diverging color domain
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`normalize`] | Raw JSON records → validated entries, collecting rejects |
//! | [`series`] | Grouping by company, chronological sort, percentage changes |
//! | [`ranking`] | Top-N selection by market cap |
//! | [`hierarchy`] | Weighted treemap leaves and color domain |
//! | [`pipeline`] | The stages wired together |
//! | [`diagnostics`] | Data-quality counters for one run |
//! | [`config`] | View configuration (TOML) |
//! | [`dataset`] | Sector catalog and dataset loading |
//! | [`envelope`] | Response envelope with metadata |
//! | [`domain`] | Domain models |
//! | [`error`] | Core error types |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ DatasetLoader   │  JSON array of {name, date, close_price, market_cap?}
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ normalize       │────▶│ RejectedRecord   │
//! └────────┬────────┘     └──────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ series          │
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ ranking (N=5)   │     │ ranking (N=10)   │
//! └────────┬────────┘     └────────┬─────────┘
//!          ▼                       ▼
//!     line view            ┌──────────────────┐
//!                          │ hierarchy        │──▶ treemap view
//!                          └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use sectorscope_core::{Pipeline, RawRecord};
//!
//! let records = vec![
//!     RawRecord::new("A", "2024-01-01", 100.0, Some(500.0)),
//!     RawRecord::new("A", "2024-01-02", 110.0, Some(500.0)),
//!     RawRecord::new("B", "2024-01-01", 50.0, Some(1000.0)),
//! ];
//!
//! let output = Pipeline::default().run_records(&records);
//! assert_eq!(output.line.names(), vec!["B", "A"]);
//! ```

pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod hierarchy;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod series;

pub use config::{LineViewConfig, TreemapViewConfig, ViewConfig, XScale};
pub use dataset::{DatasetLoader, Sector};
pub use diagnostics::Diagnostics;
pub use domain::{
    ColorDomain, CompanyName, CompanySeries, Hierarchy, NormalizedEntry, RankedSelection,
    RawRecord, SeriesPoint, TradeDate, WeightedNode,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{ConfigError, PipelineError, ValidationError};
pub use hierarchy::{build_hierarchy, HierarchyBuild};
pub use normalize::{normalize_records, normalize_value, Normalized, RejectedRecord};
pub use pipeline::{Pipeline, PipelineOutput};
pub use ranking::{select_top, Ranking, View};
pub use series::{build_series, SeriesSet};
