//! Line view: each company's close as a percentage of its baseline.

use std::collections::BTreeSet;

use log::debug;
use sectorscope_core::{LineViewConfig, RankedSelection, SeriesPoint, TradeDate, XScale};

use crate::color::categorical;
use crate::scene::{Anchor, Element, Scene};
use crate::Margin;

pub const MARGIN: Margin = Margin {
    top: 30.0,
    right: 120.0,
    bottom: 30.0,
    left: 60.0,
};

/// Vertical tick spacing in percentage points.
const Y_STEP: f64 = 2.0;
/// Upper bound on vertical tick intervals before the step is widened.
const MAX_Y_INTERVALS: f64 = 12.0;
const MAX_X_TICKS: usize = 10;
const LEGEND_ROW: f64 = 20.0;
const SWATCH: f64 = 12.0;
const MARKER_RADIUS: f64 = 3.0;

/// Horizontal position of a date inside the plot area.
#[derive(Debug, Clone, PartialEq)]
enum DateScale {
    Time { start: i32, end: i32, width: f64 },
    Point { dates: Vec<TradeDate>, width: f64 },
}

impl DateScale {
    fn new(selection: &RankedSelection, kind: XScale, width: f64) -> Self {
        match kind {
            // The time axis spans the top-ranked company's dates.
            XScale::Time => {
                let days: Vec<i32> = selection
                    .companies
                    .first()
                    .map(|top| top.dates().map(TradeDate::julian_day).collect())
                    .unwrap_or_default();
                let start = days.iter().copied().min().unwrap_or_default();
                let end = days.iter().copied().max().unwrap_or_default();
                Self::Time { start, end, width }
            }
            XScale::Point => {
                let dates: BTreeSet<TradeDate> =
                    selection.iter().flat_map(|company| company.dates()).collect();
                Self::Point {
                    dates: dates.into_iter().collect(),
                    width,
                }
            }
        }
    }

    fn x(&self, date: TradeDate) -> f64 {
        match self {
            Self::Time { start, end, width } => {
                if start == end {
                    return width / 2.0;
                }
                let span = f64::from(end - start);
                f64::from(date.julian_day() - start) / span * width
            }
            Self::Point { dates, width } => {
                let index = dates.binary_search(&date).unwrap_or_else(|i| i);
                match dates.len() {
                    0 | 1 => width / 2.0,
                    n => index as f64 * width / (n - 1) as f64,
                }
            }
        }
    }

    fn ticks(&self) -> Vec<TradeDate> {
        let candidates: Vec<TradeDate> = match self {
            Self::Time { start, end, .. } => (*start..=*end)
                .filter_map(|day| time::Date::from_julian_day(day).ok())
                .map(TradeDate::from_date)
                .collect(),
            Self::Point { dates, .. } => dates.clone(),
        };

        let stride = candidates.len().div_ceil(MAX_X_TICKS).max(1);
        candidates.into_iter().step_by(stride).collect()
    }
}

/// Linear map from a percentage domain onto the plot height (inverted).
#[derive(Debug, Clone, Copy, PartialEq)]
struct PercentScale {
    min: f64,
    max: f64,
    height: f64,
}

impl PercentScale {
    fn new(selection: &RankedSelection, height: f64) -> Self {
        let values = selection
            .iter()
            .flat_map(|company| company.values.iter().map(|p| p.pct_change_base));
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        let mut min = (lo / Y_STEP).floor() * Y_STEP;
        let mut max = (hi / Y_STEP).ceil() * Y_STEP;
        if !min.is_finite() || !max.is_finite() {
            min = 100.0 - Y_STEP;
            max = 100.0 + Y_STEP;
        } else if min == max {
            min -= Y_STEP;
            max += Y_STEP;
        }

        Self { min, max, height }
    }

    fn y(&self, pct: f64) -> f64 {
        self.height - (pct - self.min) / (self.max - self.min) * self.height
    }

    /// Tick spacing: `Y_STEP` for small domains, else the smallest 1/2/5
    /// multiple of a power of ten that is also a multiple of `Y_STEP` and keeps
    /// the interval count within `MAX_Y_INTERVALS`.
    fn step(&self) -> Option<f64> {
        let span = self.max - self.min;
        if !span.is_finite() || span <= 0.0 {
            return None;
        }
        if span / Y_STEP <= MAX_Y_INTERVALS {
            return Some(Y_STEP);
        }

        let raw = span / MAX_Y_INTERVALS;
        let magnitude = 10f64.powf(raw.log10().floor());
        [1.0, 2.0, 5.0, 10.0, 20.0]
            .iter()
            .map(|factor| factor * magnitude)
            .find(|step| *step >= raw && (step / Y_STEP).fract() == 0.0)
            .filter(|step| step.is_finite())
    }

    fn ticks(&self) -> Vec<f64> {
        let Some(step) = self.step() else {
            return vec![self.min, self.max];
        };

        let first = (self.min / step).ceil();
        let last = (self.max / step).floor();
        let count = last - first;
        if !count.is_finite() || count < 0.0 || count > MAX_Y_INTERVALS {
            return vec![self.min, self.max];
        }

        (0..=count as usize)
            .map(|i| (first + i as f64) * step)
            .collect()
    }
}

/// Render the line view of a ranked selection.
pub fn render(selection: &RankedSelection, config: &LineViewConfig) -> Scene {
    if selection.is_empty() {
        return Scene::empty(config.width, config.height);
    }

    let (width, height) = MARGIN.inner(config.width, config.height);
    let x = DateScale::new(selection, config.x_scale, width);
    let y = PercentScale::new(selection, height);
    debug!(
        "line view: {} companies, y domain [{}, {}]",
        selection.len(),
        y.min,
        y.max
    );

    let mut plot = vec![x_axis(&x, width, height), y_axis(&y)];

    for (index, company) in selection.iter().enumerate() {
        let color = categorical(index);
        plot.push(Element::Path {
            points: company
                .values
                .iter()
                .map(|point| (x.x(point.date()), y.y(point.pct_change_base)))
                .collect(),
            stroke: color.to_owned(),
            stroke_width: 2.0,
        });

        if config.tooltip {
            plot.extend(company.values.iter().map(|point| Element::Circle {
                cx: x.x(point.date()),
                cy: y.y(point.pct_change_base),
                r: MARKER_RADIUS,
                fill: color.to_owned(),
                title: Some(tooltip(company.name.as_str(), point)),
            }));
        }
    }

    plot.push(legend(selection, width));

    Scene {
        width: config.width,
        height: config.height,
        elements: vec![Element::group(MARGIN.left, MARGIN.top, plot)],
    }
}

fn x_axis(scale: &DateScale, width: f64, height: f64) -> Element {
    let mut children = vec![Element::line(0.0, 0.0, width, 0.0)];
    for date in scale.ticks() {
        let tx = scale.x(date);
        children.push(Element::line(tx, 0.0, tx, 6.0));
        children.push(Element::text(tx, 16.0, short_date(date), 10.0, Anchor::Middle));
    }
    Element::group(0.0, height, children)
}

fn y_axis(scale: &PercentScale) -> Element {
    let mut children = vec![Element::line(0.0, 0.0, 0.0, scale.height)];
    for tick in scale.ticks() {
        let ty = scale.y(tick);
        children.push(Element::line(-6.0, ty, 0.0, ty));
        children.push(Element::text(-9.0, ty, format!("{tick:.0}%"), 10.0, Anchor::End));
    }
    Element::group(0.0, 0.0, children)
}

fn legend(selection: &RankedSelection, width: f64) -> Element {
    let mut children = Vec::with_capacity(selection.len() * 2);
    for (index, company) in selection.iter().enumerate() {
        let row = index as f64 * LEGEND_ROW;
        children.push(Element::Rect {
            x: 0.0,
            y: row,
            width: SWATCH,
            height: SWATCH,
            fill: categorical(index).to_owned(),
            stroke: None,
            title: None,
        });
        children.push(Element::text(
            18.0,
            row + 6.0,
            company.name.as_str(),
            12.0,
            Anchor::Start,
        ));
    }
    Element::group(width + 10.0, 0.0, children)
}

fn tooltip(name: &str, point: &SeriesPoint) -> String {
    format!(
        "{name}\n{}\nclose: {:.2}\nvs baseline: {:.2}%\nday change: {:+.2}%",
        point.date(),
        point.close_price(),
        point.pct_change_base,
        point.pct_change_prev
    )
}

fn short_date(date: TradeDate) -> String {
    let inner = date.into_inner();
    format!("{:02}-{:02}", u8::from(inner.month()), inner.day())
}
