//! # Sectorscope Render
//!
//! Pure renderers that turn pipeline output into drawing descriptions.
//!
//! Each renderer takes its view's data plus configuration and returns a fresh
//! [`Scene`]. Nothing is drawn in place, so a scene can be inspected in tests,
//! serialized as JSON, or written out as SVG.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`line`](mod@line) | Percent-of-baseline line chart with legend and markers |
//! | [`treemap`](mod@treemap) | Market-cap treemap colored by window change |
//! | [`layout`] | Squarified box packing |
//! | [`color`] | Categorical palette and diverging red-yellow-green scale |
//! | [`scene`] | Scene model and SVG writer |
//!
//! ```rust
//! use sectorscope_core::{Pipeline, RawRecord};
//!
//! let records = vec![
//!     RawRecord::new("A", "2024-01-01", 100.0, Some(500.0)),
//!     RawRecord::new("A", "2024-01-02", 110.0, Some(500.0)),
//! ];
//! let output = Pipeline::default().run_records(&records);
//! let config = sectorscope_core::ViewConfig::default();
//!
//! let svg = sectorscope_render::line(&output.line, &config.line).to_svg();
//! assert_eq!(svg.matches("<path").count(), 1);
//! ```

pub mod color;
pub mod layout;
pub mod line;
pub mod scene;
pub mod treemap;

pub use line::render as line;
pub use scene::{Anchor, Element, Scene};
pub use treemap::render as treemap;

/// Space reserved around a plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Plot size left inside a canvas of `width` x `height`.
    pub fn inner(&self, width: f64, height: f64) -> (f64, f64) {
        (
            (width - self.left - self.right).max(0.0),
            (height - self.top - self.bottom).max(0.0),
        )
    }

    /// Canvas size needed around a plot of `width` x `height`.
    pub fn outer(&self, width: f64, height: f64) -> (f64, f64) {
        (
            width + self.left + self.right,
            height + self.top + self.bottom,
        )
    }
}
