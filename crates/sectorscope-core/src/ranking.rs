//! Ranker and selector: top-N companies by market cap.

use std::fmt::{Display, Formatter};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::series::SeriesSet;
use crate::{CompanySeries, RankedSelection};

/// The two chart views, each consuming its own window of ranked companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Line,
    Treemap,
}

impl View {
    pub const ALL: [Self; 2] = [Self::Line, Self::Treemap];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Treemap => "treemap",
        }
    }

    /// Number of companies the view shows unless configured otherwise.
    pub const fn default_window(self) -> usize {
        match self {
            Self::Line => 5,
            Self::Treemap => 10,
        }
    }
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of ranking a series set for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub selection: RankedSelection,
    /// Companies left out because they carry no market cap.
    pub missing_ranking_key: usize,
}

/// Rank companies by descending market cap and keep the first `window`.
///
/// Companies without a market cap cannot be compared and are excluded rather
/// than ranked as zero. Equal market caps keep first-appearance order.
pub fn select_top(series: &SeriesSet, window: usize) -> Ranking {
    let mut ranked: Vec<(f64, &CompanySeries)> = series
        .iter()
        .filter(|company| !company.values.is_empty())
        .filter_map(|company| company.market_cap.map(|cap| (cap, company)))
        .collect();

    let missing_ranking_key = series.len() - ranked.len();
    if missing_ranking_key > 0 {
        debug!("{missing_ranking_key} companies have no market cap and were not ranked");
    }

    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    let companies = ranked
        .into_iter()
        .take(window)
        .map(|(_, company)| company.clone())
        .collect();

    Ranking {
        selection: RankedSelection { window, companies },
        missing_ranking_key,
    }
}
