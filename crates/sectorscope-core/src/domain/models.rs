use serde::{Deserialize, Serialize};

use crate::{CompanyName, TradeDate, ValidationError};

/// One company-day observation as it appears in a dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub date: String,
    pub close_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

impl RawRecord {
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        close_price: f64,
        market_cap: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            close_price,
            market_cap,
        }
    }
}

/// Typed, validated company-day observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEntry {
    pub name: CompanyName,
    pub date: TradeDate,
    pub close_price: f64,
    pub market_cap: Option<f64>,
}

impl NormalizedEntry {
    pub fn new(
        name: CompanyName,
        date: TradeDate,
        close_price: f64,
        market_cap: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("close_price", close_price)?;
        validate_optional_non_negative("market_cap", market_cap)?;

        Ok(Self {
            name,
            date,
            close_price,
            market_cap,
        })
    }
}

impl TryFrom<&RawRecord> for NormalizedEntry {
    type Error = ValidationError;

    fn try_from(raw: &RawRecord) -> Result<Self, Self::Error> {
        Self::new(
            CompanyName::parse(&raw.name)?,
            TradeDate::parse(&raw.date)?,
            raw.close_price,
            raw.market_cap,
        )
    }
}

/// A normalized entry annotated with its position relative to the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(flatten)]
    pub entry: NormalizedEntry,
    /// Close as a percentage of the series baseline (baseline = 100).
    pub pct_change_base: f64,
    /// Percent change against the previous point (first point = 0).
    pub pct_change_prev: f64,
}

impl SeriesPoint {
    pub fn date(&self) -> TradeDate {
        self.entry.date
    }

    pub fn close_price(&self) -> f64 {
        self.entry.close_price
    }
}

/// All observations of one company in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySeries {
    pub name: CompanyName,
    /// Market cap as of the first chronological observation.
    pub market_cap: Option<f64>,
    pub values: Vec<SeriesPoint>,
}

impl CompanySeries {
    pub fn first(&self) -> Option<&SeriesPoint> {
        self.values.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.values.last()
    }

    pub fn dates(&self) -> impl Iterator<Item = TradeDate> + '_ {
        self.values.iter().map(SeriesPoint::date)
    }
}

/// Companies ordered by descending market cap, truncated to a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSelection {
    pub window: usize,
    pub companies: Vec<CompanySeries>,
}

impl RankedSelection {
    pub fn empty(window: usize) -> Self {
        Self {
            window,
            companies: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompanySeries> {
        self.companies.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.companies.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Treemap leaf: tile area follows `weight`, tile color follows `change`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedNode {
    pub name: CompanyName,
    pub weight: f64,
    /// Fractional change over the window, `(last - first) / first`.
    pub change: f64,
}

/// `[min, midpoint, max]` triple of a diverging color scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorDomain {
    pub min: f64,
    pub mid: f64,
    pub max: f64,
}

impl ColorDomain {
    pub const NEUTRAL: Self = Self {
        min: 0.0,
        mid: 0.0,
        max: 0.0,
    };

    /// Data-driven domain centred on zero change.
    pub fn from_changes(changes: impl IntoIterator<Item = f64>) -> Self {
        let mut iter = changes.into_iter().filter(|c| c.is_finite());
        let Some(first) = iter.next() else {
            return Self::NEUTRAL;
        };

        let (min, max) = iter.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c)));
        Self { min, mid: 0.0, max }
    }

    pub const fn as_triple(&self) -> [f64; 3] {
        [self.min, self.mid, self.max]
    }
}

/// Single-level weighted tree handed to a box-packing layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub nodes: Vec<WeightedNode>,
    pub domain: ColorDomain,
    /// Nodes dropped because their weight was not strictly positive.
    pub excluded: usize,
}

impl Hierarchy {
    pub fn total_weight(&self) -> f64 {
        self.nodes.iter().map(|n| n.weight).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        validate_non_negative(field, value)?;
    }
    Ok(())
}
