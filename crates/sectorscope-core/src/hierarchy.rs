//! Hierarchy builder: ranked companies into weighted treemap leaves.

use log::debug;

use crate::series::finite_ratio;
use crate::{ColorDomain, CompanySeries, Hierarchy, RankedSelection, WeightedNode};

/// Hierarchy plus the number of window changes clamped to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyBuild {
    pub hierarchy: Hierarchy,
    pub degenerate_ratios: usize,
}

/// Build treemap leaves weighted by market cap and colored by window change.
///
/// Leaves whose weight is missing, non-finite or not strictly positive cannot
/// be packed and are left out; `Hierarchy::excluded` counts them. The color
/// domain spans the retained leaves only.
pub fn build_hierarchy(selection: &RankedSelection) -> HierarchyBuild {
    let mut nodes = Vec::with_capacity(selection.len());
    let mut excluded = 0;
    let mut degenerate_ratios = 0;

    for company in selection.iter() {
        let weight = match company.market_cap {
            Some(weight) if weight.is_finite() && weight > 0.0 => weight,
            other => {
                debug!("{}: weight {other:?} cannot be packed, excluded", company.name);
                excluded += 1;
                continue;
            }
        };

        let change = window_change(company).unwrap_or_else(|| {
            debug!("{}: window change is not finite, using 0", company.name);
            degenerate_ratios += 1;
            0.0
        });

        nodes.push(WeightedNode {
            name: company.name.clone(),
            weight,
            change,
        });
    }

    let domain = ColorDomain::from_changes(nodes.iter().map(|node| node.change));

    HierarchyBuild {
        hierarchy: Hierarchy {
            nodes,
            domain,
            excluded,
        },
        degenerate_ratios,
    }
}

/// `(last_close - first_close) / first_close`, `None` when not finite.
pub fn window_change(company: &CompanySeries) -> Option<f64> {
    let first = company.first()?.close_price();
    let last = company.last()?.close_price();
    finite_ratio(last - first, first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::select_top;
    use crate::series::build_series;
    use crate::{CompanyName, NormalizedEntry, TradeDate};

    fn entry(name: &str, date: &str, close: f64, cap: Option<f64>) -> NormalizedEntry {
        NormalizedEntry::new(
            CompanyName::parse(name).expect("valid name"),
            TradeDate::parse(date).expect("valid date"),
            close,
            cap,
        )
        .expect("valid entry")
    }

    fn hierarchy_of(entries: Vec<NormalizedEntry>) -> HierarchyBuild {
        let set = build_series(entries);
        build_hierarchy(&select_top(&set, 10).selection)
    }

    #[test]
    fn weights_by_market_cap_and_colors_by_change() {
        let build = hierarchy_of(vec![
            entry("A", "2024-01-01", 100.0, Some(300.0)),
            entry("A", "2024-01-10", 110.0, Some(300.0)),
            entry("B", "2024-01-01", 50.0, Some(200.0)),
            entry("B", "2024-01-10", 45.0, Some(200.0)),
        ]);
        let hierarchy = build.hierarchy;

        assert_eq!(hierarchy.nodes.len(), 2);
        assert_eq!(hierarchy.nodes[0].name.as_str(), "A");
        assert_eq!(hierarchy.nodes[0].weight, 300.0);
        assert!((hierarchy.nodes[0].change - 0.1).abs() < 1e-12);
        assert!((hierarchy.nodes[1].change + 0.1).abs() < 1e-12);
        assert!((hierarchy.domain.min + 0.1).abs() < 1e-12);
        assert_eq!(hierarchy.domain.mid, 0.0);
        assert!((hierarchy.domain.max - 0.1).abs() < 1e-12);
        assert_eq!(hierarchy.total_weight(), 500.0);
        assert_eq!(build.degenerate_ratios, 0);
    }

    #[test]
    fn excludes_non_positive_weights() {
        let build = hierarchy_of(vec![
            entry("A", "2024-01-01", 1.0, Some(0.0)),
            entry("B", "2024-01-01", 1.0, Some(10.0)),
        ]);

        assert_eq!(build.hierarchy.excluded, 1);
        assert_eq!(build.hierarchy.nodes.len(), 1);
        assert_eq!(build.hierarchy.nodes[0].name.as_str(), "B");
    }

    #[test]
    fn zero_first_close_yields_neutral_change() {
        let build = hierarchy_of(vec![
            entry("A", "2024-01-01", 0.0, Some(10.0)),
            entry("A", "2024-01-02", 3.0, Some(10.0)),
        ]);

        let node = &build.hierarchy.nodes[0];
        assert_eq!(node.change, 0.0);
        assert!(node.change.is_finite());
        assert_eq!(build.degenerate_ratios, 1);
        assert_eq!(build.hierarchy.domain, ColorDomain::from_changes([0.0]));
    }

    #[test]
    fn empty_selection_has_neutral_domain() {
        let build = build_hierarchy(&RankedSelection::empty(10));
        assert!(build.hierarchy.is_empty());
        assert_eq!(build.hierarchy.domain, ColorDomain::NEUTRAL);
    }
}
