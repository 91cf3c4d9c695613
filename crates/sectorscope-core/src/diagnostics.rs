use serde::Serialize;

use crate::normalize::RejectedRecord;

/// Data-quality counters collected across one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    pub total_records: usize,
    pub accepted_records: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
    pub companies: usize,
    pub missing_ranking_key: usize,
    pub degenerate_ratios: usize,
    pub excluded_weights: usize,
}

impl Diagnostics {
    /// True when nothing was rejected, skipped or clamped.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
            && self.missing_ranking_key == 0
            && self.degenerate_ratios == 0
            && self.excluded_weights == 0
    }

    /// Human-readable warnings for envelope metadata. Rejected records are
    /// reported individually as envelope errors, so only their count is here.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.total_records == 0 {
            warnings.push(String::from("dataset is empty; nothing to render"));
        }
        if !self.rejected.is_empty() {
            warnings.push(format!(
                "{} of {} records were malformed and skipped",
                self.rejected.len(),
                self.total_records
            ));
        }
        if self.missing_ranking_key > 0 {
            warnings.push(format!(
                "{} companies have no market cap and were not ranked",
                self.missing_ranking_key
            ));
        }
        if self.degenerate_ratios > 0 {
            warnings.push(format!(
                "{} ratios had a zero or non-finite baseline and were clamped to no change",
                self.degenerate_ratios
            ));
        }
        if self.excluded_weights > 0 {
            warnings.push(format!(
                "{} treemap tiles had a non-positive market cap and were left out",
                self.excluded_weights
            ));
        }

        warnings
    }
}
