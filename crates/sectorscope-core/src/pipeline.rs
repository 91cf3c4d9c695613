//! End-to-end transformation: dataset → line selection + treemap hierarchy.

use log::info;
use serde::Serialize;
use serde_json::Value;

use crate::hierarchy::build_hierarchy;
use crate::normalize::{normalize_records, normalize_value, Normalized};
use crate::ranking::select_top;
use crate::series::build_series;
use crate::{
    ColorDomain, Diagnostics, Hierarchy, PipelineError, RankedSelection, RawRecord, ViewConfig,
};

/// Everything the chart renderers consume from one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    /// Top companies for the line view, with per-point changes populated.
    pub line: RankedSelection,
    /// Weighted leaves and color domain for the treemap view.
    pub treemap: Hierarchy,
    pub diagnostics: Diagnostics,
}

impl PipelineOutput {
    pub fn empty(config: &ViewConfig) -> Self {
        Self {
            line: RankedSelection::empty(config.line.window),
            treemap: Hierarchy {
                nodes: Vec::new(),
                domain: ColorDomain::NEUTRAL,
                excluded: 0,
            },
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty() && self.treemap.is_empty()
    }
}

/// Stateless pipeline runner; each call is a pure function of its input.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: ViewConfig,
}

impl Pipeline {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Run over a decoded JSON dataset. Fails only when the top level is not
    /// an array.
    pub fn run_value(&self, dataset: &Value) -> Result<PipelineOutput, PipelineError> {
        let normalized = normalize_value(dataset)?;
        Ok(self.assemble(normalized))
    }

    pub fn run_json(&self, dataset: &str) -> Result<PipelineOutput, PipelineError> {
        let value: Value = serde_json::from_str(dataset)?;
        self.run_value(&value)
    }

    pub fn run_records(&self, records: &[RawRecord]) -> PipelineOutput {
        self.assemble(normalize_records(records))
    }

    fn assemble(&self, normalized: Normalized) -> PipelineOutput {
        let total_records = normalized.total();
        let Normalized { entries, rejected } = normalized;

        if entries.is_empty() {
            info!("no usable records ({total_records} total), nothing to render");
            let mut output = PipelineOutput::empty(&self.config);
            output.diagnostics.total_records = total_records;
            output.diagnostics.rejected = rejected;
            return output;
        }

        let accepted_records = entries.len();
        let series = build_series(entries);
        let line = select_top(&series, self.config.line.window);
        let treemap = select_top(&series, self.config.treemap.window);
        let built = build_hierarchy(&treemap.selection);

        let diagnostics = Diagnostics {
            total_records,
            accepted_records,
            rejected,
            companies: series.len(),
            missing_ranking_key: line.missing_ranking_key,
            degenerate_ratios: series.degenerate_ratios() + built.degenerate_ratios,
            excluded_weights: built.hierarchy.excluded,
        };

        info!(
            "pipeline: {} records, {} companies, line={} treemap={}",
            total_records,
            diagnostics.companies,
            line.selection.len(),
            built.hierarchy.nodes.len()
        );

        PipelineOutput {
            line: line.selection,
            treemap: built.hierarchy,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_dataset_short_circuits() {
        let output = Pipeline::default().run_value(&json!([])).expect("valid input");
        assert!(output.is_empty());
        assert_eq!(output.diagnostics.total_records, 0);
        assert_eq!(output.line.window, 5);
    }

    #[test]
    fn all_rejected_still_reports_rejections() {
        let output = Pipeline::default()
            .run_value(&json!([{"name": "A"}]))
            .expect("valid input");
        assert!(output.is_empty());
        assert_eq!(output.diagnostics.total_records, 1);
        assert_eq!(output.diagnostics.rejected.len(), 1);
    }

    #[test]
    fn windows_follow_config() {
        let mut config = ViewConfig::default();
        config.line.window = 1;
        config.treemap.window = 2;

        let records: Vec<RawRecord> = (0..4)
            .map(|i| RawRecord::new(format!("C{i}"), "2024-01-01", 1.0, Some(f64::from(i))))
            .collect();

        let output = Pipeline::new(config).run_records(&records);
        assert_eq!(output.line.names(), vec!["C3"]);
        let treemap: Vec<_> = output.treemap.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(treemap, vec!["C3", "C2"]);
    }

    #[test]
    fn structurally_invalid_json_fails() {
        let err = Pipeline::default().run_json("42").expect_err("must fail");
        assert!(matches!(
            err,
            PipelineError::StructurallyInvalid { found: "number" }
        ));
    }
}
