//! Series builder: groups entries per company and annotates percentage changes.

use std::collections::HashMap;

use log::debug;

use crate::{CompanyName, CompanySeries, NormalizedEntry, SeriesPoint};

/// Percentage assigned to every baseline point.
pub const BASELINE_PCT: f64 = 100.0;

/// Company series keyed by name, iterated in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    series: Vec<CompanySeries>,
    index: HashMap<CompanyName, usize>,
    degenerate_ratios: usize,
}

impl SeriesSet {
    pub fn get(&self, name: &str) -> Option<&CompanySeries> {
        let name = CompanyName::parse(name).ok()?;
        self.index.get(&name).map(|&slot| &self.series[slot])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompanySeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Ratios that were clamped because their denominator was zero or the
    /// result was not finite.
    pub fn degenerate_ratios(&self) -> usize {
        self.degenerate_ratios
    }
}

impl<'a> IntoIterator for &'a SeriesSet {
    type Item = &'a CompanySeries;
    type IntoIter = std::slice::Iter<'a, CompanySeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Group entries by company and compute per-point percentage changes.
pub fn build_series(entries: impl IntoIterator<Item = NormalizedEntry>) -> SeriesSet {
    let mut index: HashMap<CompanyName, usize> = HashMap::new();
    let mut groups: Vec<(CompanyName, Vec<NormalizedEntry>)> = Vec::new();

    for entry in entries {
        let slot = match index.get(&entry.name) {
            Some(&slot) => slot,
            None => {
                let slot = groups.len();
                index.insert(entry.name.clone(), slot);
                groups.push((entry.name.clone(), Vec::new()));
                slot
            }
        };
        groups[slot].1.push(entry);
    }

    let mut degenerate_ratios = 0;
    let series = groups
        .into_iter()
        .map(|(name, group)| annotate(name, group, &mut degenerate_ratios))
        .collect();

    SeriesSet {
        series,
        index,
        degenerate_ratios,
    }
}

fn annotate(
    name: CompanyName,
    mut group: Vec<NormalizedEntry>,
    degenerate_ratios: &mut usize,
) -> CompanySeries {
    // `sort_by` is stable: same-day entries keep their input order.
    group.sort_by(|a, b| a.date.cmp(&b.date));

    let market_cap = group.first().and_then(|entry| entry.market_cap);
    let baseline = group.first().map(|entry| entry.close_price);

    let mut values = Vec::with_capacity(group.len());
    let mut previous: Option<f64> = None;

    for entry in group {
        let close = entry.close_price;

        let pct_change_base = match (previous, baseline) {
            (Some(_), Some(base)) => {
                finite_ratio(close * BASELINE_PCT, base).unwrap_or_else(|| {
                    *degenerate_ratios += 1;
                    debug!("{name}: zero baseline on {}, using {BASELINE_PCT}", entry.date);
                    BASELINE_PCT
                })
            }
            _ => BASELINE_PCT,
        };

        let pct_change_prev = match previous {
            Some(prev) => finite_ratio((close - prev) * 100.0, prev).unwrap_or_else(|| {
                *degenerate_ratios += 1;
                debug!("{name}: zero previous close before {}, using 0", entry.date);
                0.0
            }),
            None => 0.0,
        };

        previous = Some(close);
        values.push(SeriesPoint {
            entry,
            pct_change_base,
            pct_change_prev,
        });
    }

    CompanySeries {
        name,
        market_cap,
        values,
    }
}

/// `numerator / denominator`, or `None` when the result would not be finite.
pub fn finite_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }

    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TradeDate;

    fn entry(name: &str, date: &str, close: f64, cap: Option<f64>) -> NormalizedEntry {
        NormalizedEntry::new(
            CompanyName::parse(name).expect("valid name"),
            TradeDate::parse(date).expect("valid date"),
            close,
            cap,
        )
        .expect("valid entry")
    }

    fn base_pcts(series: &CompanySeries) -> Vec<f64> {
        series.values.iter().map(|p| p.pct_change_base).collect()
    }

    fn prev_pcts(series: &CompanySeries) -> Vec<f64> {
        series.values.iter().map(|p| p.pct_change_prev).collect()
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let set = build_series(vec![
            entry("B", "2024-01-01", 1.0, None),
            entry("A", "2024-01-01", 1.0, None),
            entry("B", "2024-01-02", 1.0, None),
        ]);

        let names: Vec<_> = set.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(set.get("B").map(|s| s.values.len()), Some(2));
        assert!(set.get("C").is_none());
    }

    #[test]
    fn sorts_chronologically_and_computes_changes() {
        let set = build_series(vec![
            entry("A", "2024-01-03", 121.0, Some(7.0)),
            entry("A", "2024-01-01", 100.0, Some(5.0)),
            entry("A", "2024-01-02", 110.0, Some(6.0)),
        ]);
        let series = set.get("A").expect("present");

        let dates: Vec<_> = series.dates().map(TradeDate::format_iso).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(series.market_cap, Some(5.0));

        let base = base_pcts(series);
        assert_eq!(base[0], 100.0);
        assert!((base[1] - 110.0).abs() < 1e-9);
        assert!((base[2] - 121.0).abs() < 1e-9);

        let prev = prev_pcts(series);
        assert_eq!(prev[0], 0.0);
        assert!((prev[1] - 10.0).abs() < 1e-9);
        assert!((prev[2] - 10.0).abs() < 1e-9);
        assert_eq!(set.degenerate_ratios(), 0);
    }

    #[test]
    fn same_day_entries_keep_input_order() {
        let set = build_series(vec![
            entry("A", "2024-01-02", 3.0, None),
            entry("A", "2024-01-01", 1.0, None),
            entry("A", "2024-01-02", 2.0, None),
        ]);
        let closes: Vec<_> = set
            .get("A")
            .expect("present")
            .values
            .iter()
            .map(SeriesPoint::close_price)
            .collect();
        assert_eq!(closes, vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn single_entry_series_is_baseline_only() {
        let set = build_series(vec![entry("A", "2024-01-01", 42.0, None)]);
        let series = set.get("A").expect("present");
        assert_eq!(base_pcts(series), vec![100.0]);
        assert_eq!(prev_pcts(series), vec![0.0]);
    }

    #[test]
    fn zero_baseline_is_clamped_to_neutral() {
        let set = build_series(vec![
            entry("A", "2024-01-01", 0.0, Some(1.0)),
            entry("A", "2024-01-02", 5.0, Some(1.0)),
        ]);
        let series = set.get("A").expect("present");

        assert_eq!(base_pcts(series), vec![100.0, 100.0]);
        assert_eq!(prev_pcts(series), vec![0.0, 0.0]);
        assert!(series.values.iter().all(|p| p.pct_change_base.is_finite()));
        assert_eq!(set.degenerate_ratios(), 2);
    }

    #[test]
    fn finite_ratio_rejects_zero_denominator() {
        assert_eq!(finite_ratio(1.0, 0.0), None);
        assert_eq!(finite_ratio(0.0, 0.0), None);
        assert_eq!(finite_ratio(3.0, 2.0), Some(1.5));
    }
}
