//! Summary statistics for numeric and categorical columns.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use serde_json::{Value, json};

use super::{
    stats::{CATEGORICAL_STATS, CategoricalSummary, NUMERIC_STATS, NumericSummary},
    strategy::InspectionStrategy,
    style::{dim, format_stat, header, rounded_grid},
};
use crate::dataset::{ColumnKind, Dataset};

/// Reports descriptive statistics, numeric columns first and categorical
/// columns second. Columns of any other kind are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryStatisticsInspection;

/// A summary paired with the column it describes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary<S> {
    pub column: String,
    #[serde(flatten)]
    pub summary: S,
}

impl SummaryStatisticsInspection {
    pub fn numeric_summaries(dataset: &Dataset) -> Result<Vec<ColumnSummary<NumericSummary>>> {
        dataset
            .columns_of_kind(ColumnKind::Numeric)
            .map(|column| {
                Ok(ColumnSummary {
                    column: column.name().to_string(),
                    summary: NumericSummary::from_array(column.array.as_ref())?,
                })
            })
            .collect()
    }

    pub fn categorical_summaries(
        dataset: &Dataset,
    ) -> Result<Vec<ColumnSummary<CategoricalSummary>>> {
        dataset
            .columns_of_kind(ColumnKind::Categorical)
            .map(|column| {
                Ok(ColumnSummary {
                    column: column.name().to_string(),
                    summary: CategoricalSummary::from_array(column.array.as_ref())?,
                })
            })
            .collect()
    }
}

/// Lay summaries out with one column per dataset column and one row per statistic.
fn render_section<S>(
    out: &mut dyn Write,
    title: &str,
    empty_note: &str,
    stats: &[&str],
    summaries: &[ColumnSummary<S>],
    cells: impl Fn(&S) -> Vec<String>,
) -> Result<()> {
    writeln!(out, "\n{}", header(title))?;

    if summaries.is_empty() {
        writeln!(out, "  {}", dim(empty_note))?;
        return Ok(());
    }

    let columns: Vec<Vec<String>> = summaries.iter().map(|s| cells(&s.summary)).collect();

    let header_row = std::iter::once(String::new())
        .chain(summaries.iter().map(|s| s.column.clone()))
        .collect::<Vec<_>>();
    let stat_rows = stats.iter().enumerate().map(|(row, stat)| {
        std::iter::once(stat.to_string())
            .chain(columns.iter().map(|column| column[row].clone()))
            .collect::<Vec<_>>()
    });

    let records = std::iter::once(header_row).chain(stat_rows);
    writeln!(out, "{}", rounded_grid(records))?;
    Ok(())
}

fn numeric_cells(summary: &NumericSummary) -> Vec<String> {
    let mut cells = vec![summary.count.to_string()];
    cells.extend(summary.values()[1..].iter().map(|v| format_stat(*v)));
    cells
}

impl InspectionStrategy for SummaryStatisticsInspection {
    fn name(&self) -> &str {
        "summary"
    }

    fn inspect(&self, dataset: &Dataset, out: &mut dyn Write) -> Result<()> {
        render_section(
            out,
            "Summary Statistics (Numerical Features):",
            "(no numeric columns)",
            &NUMERIC_STATS,
            &Self::numeric_summaries(dataset)?,
            numeric_cells,
        )?;
        render_section(
            out,
            "Summary Statistics (Categorical Features):",
            "(no categorical columns)",
            &CATEGORICAL_STATS,
            &Self::categorical_summaries(dataset)?,
            |s: &CategoricalSummary| s.cells().to_vec(),
        )?;
        Ok(())
    }

    fn to_json(&self, dataset: &Dataset) -> Result<Value> {
        Ok(json!({
            "strategy": self.name(),
            "dataset": dataset.label(),
            "numeric": Self::numeric_summaries(dataset)?,
            "categorical": Self::categorical_summaries(dataset)?,
        }))
    }
}
