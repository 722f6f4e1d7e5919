//! Checks of the archive assumptions that reshaping relies on.
//!
//! Reshaping reads a gene's identifier and expression value from bin 0 only.
//! [`check_constant_across_bins`] verifies that every other bin agrees. It
//! is opt-in (see [`DatasetOptions::validate`]) and never fails: problems
//! are added to a [`Report`] and logged.
//!
//! [`DatasetOptions::validate`]: crate::dataset::DatasetOptions

use ndarray::{Array3, Axis};
use tracing::warn;

use crate::layout::ArchiveLayout;
use crate::reporting::Report;

/// Count genes whose identifier or expression value varies across bins, and
/// report them. Returns the number of issues added to `report`.
pub fn check_constant_across_bins(
    cell_type: &str,
    data: &Array3<f64>,
    layout: &ArchiveLayout,
    report: &mut Report,
) -> usize {
    let mut varying_ids = 0;
    let mut varying_expression = 0;

    for gene in data.axis_iter(Axis(0)) {
        let id_column = gene.column(layout.gene_id);
        let expression_column = gene.column(layout.expression);
        if id_column.iter().any(|&id| id != id_column[0]) {
            varying_ids += 1;
        }
        if expression_column
            .iter()
            .any(|&value| value != expression_column[0])
        {
            varying_expression += 1;
        }
    }

    let mut issues = 0;
    if varying_ids > 0 {
        let message = format!(
            "cell type '{}': {} genes have identifiers that vary across bins; bin 0 was used",
            cell_type, varying_ids
        );
        warn!("{}", message);
        report.add_issue(message);
        issues += 1;
    }
    if varying_expression > 0 {
        let message = format!(
            "cell type '{}': {} genes have expression values that vary across bins; bin 0 was used",
            cell_type, varying_expression
        );
        warn!("{}", message);
        report.add_issue(message);
        issues += 1;
    }
    issues
}
