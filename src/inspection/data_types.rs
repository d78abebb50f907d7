//! Column data types and non-null counts.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use serde_json::{Value, json};
use tabled::Tabled;

use super::{
    strategy::InspectionStrategy,
    style::{dim, format_bytes, format_number, header, label, rounded_table, value},
};
use crate::dataset::Dataset;

/// Width of the plain label text, padded before styling.
const LABEL_WIDTH: usize = 15;

/// Reports every column's data type and how many of its values are present.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataTypesInspection;

/// Type information for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnTypeInfo {
    pub index: usize,
    pub name: String,
    pub non_null: usize,
    pub dtype: String,
}

/// Row for the column type table.
#[derive(Tabled)]
struct ColumnTypeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Non-Null Count")]
    non_null: String,
    #[tabled(rename = "Dtype")]
    dtype: String,
}

impl From<&ColumnTypeInfo> for ColumnTypeRow {
    fn from(info: &ColumnTypeInfo) -> Self {
        Self {
            index: info.index,
            name: info.name.clone(),
            non_null: format!("{} non-null", format_number(info.non_null as u64)),
            dtype: info.dtype.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DtypeCount {
    pub dtype: String,
    pub columns: usize,
}

impl DataTypesInspection {
    pub fn column_types(dataset: &Dataset) -> Vec<ColumnTypeInfo> {
        dataset
            .columns()
            .map(|column| ColumnTypeInfo {
                index: column.index,
                name: column.name().to_string(),
                non_null: column.non_missing_count(),
                dtype: column.data_type().to_string(),
            })
            .collect()
    }

    /// Number of columns per data type, in order of first appearance.
    pub fn dtype_counts(columns: &[ColumnTypeInfo]) -> Vec<DtypeCount> {
        let mut counts: Vec<DtypeCount> = Vec::new();
        for column in columns {
            match counts.iter_mut().find(|c| c.dtype == column.dtype) {
                Some(count) => count.columns += 1,
                None => counts.push(DtypeCount {
                    dtype: column.dtype.clone(),
                    columns: 1,
                }),
            }
        }
        counts
    }
}

impl InspectionStrategy for DataTypesInspection {
    fn name(&self) -> &str {
        "types"
    }

    fn inspect(&self, dataset: &Dataset, out: &mut dyn Write) -> Result<()> {
        let columns = Self::column_types(dataset);
        let rows = dataset.num_rows() as u64;

        writeln!(out, "\n{}", header("Data Types and Non-null Counts:"))?;
        writeln!(out)?;
        writeln!(out, "{}", header(dataset.label()))?;

        let range = if rows > 0 {
            dim(format!("(0 to {})", format_number(rows - 1)))
        } else {
            String::new()
        };
        writeln!(
            out,
            "{} {} {}",
            label(format!("{:<LABEL_WIDTH$}", "Rows:")),
            value(format!("{} entries", format_number(rows))),
            range
        )?;
        writeln!(
            out,
            "{}",
            label(format!("Data columns (total {} columns):", columns.len()))
        )?;

        if columns.is_empty() {
            writeln!(out, "  {}", dim("(no columns)"))?;
        } else {
            let table_rows: Vec<ColumnTypeRow> = columns.iter().map(ColumnTypeRow::from).collect();
            writeln!(out, "{}", rounded_table(table_rows))?;
        }

        let dtypes = Self::dtype_counts(&columns)
            .iter()
            .map(|c| format!("{}({})", c.dtype, c.columns))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "{} {}", label("dtypes:"), value(dtypes))?;
        writeln!(
            out,
            "{} {}",
            label("memory usage:"),
            value(format_bytes(dataset.memory_size() as u64))
        )?;

        Ok(())
    }

    fn to_json(&self, dataset: &Dataset) -> Result<Value> {
        let columns = Self::column_types(dataset);
        Ok(json!({
            "strategy": self.name(),
            "dataset": dataset.label(),
            "rows": dataset.num_rows(),
            "columns": columns,
            "dtypes": Self::dtype_counts(&columns),
            "memory_bytes": dataset.memory_size(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_data::TestBatch;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn render(dataset: &Dataset) -> String {
        let mut out = Vec::new();
        DataTypesInspection.inspect(dataset, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_column_types_for_scores() {
        let dataset = Dataset::from_batch(TestBatch::scores());
        let columns = DataTypesInspection::column_types(&dataset);

        let summary: Vec<(&str, usize, &str)> = columns
            .iter()
            .map(|c| (c.name.as_str(), c.non_null, c.dtype.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("id", 3, "Int64"),
                ("name", 3, "Utf8"),
                ("score", 2, "Float64")
            ]
        );
    }

    #[test]
    fn test_text_mentions_every_column() {
        let dataset = Dataset::from_batch(TestBatch::mixed());
        let text = render(&dataset);

        assert!(text.contains("Data Types and Non-null Counts:"));
        for column in dataset.columns() {
            assert!(text.contains(column.name()), "missing {}", column.name());
        }
        assert!(text.contains("4 non-null"));
        assert!(text.contains("Date32(1)"));
    }

    #[test]
    fn test_text_non_null_counts() {
        let text = render(&Dataset::from_batch(TestBatch::scores()));

        assert_eq!(text.matches("3 non-null").count(), 2);
        assert_eq!(text.matches("2 non-null").count(), 1);
        assert!(text.contains("Int64(1), Utf8(1), Float64(1)"));
        assert!(text.contains("3 entries"));
        assert!(text.contains("Data columns (total 3 columns):"));
    }

    #[test]
    fn test_row_label_padded_outside_color_codes() {
        let text = render(&Dataset::from_batch(TestBatch::scores()));

        assert!(text.contains(&label(format!("{:<LABEL_WIDTH$}", "Rows:"))));
        assert!(!text.contains(&format!("{:<LABEL_WIDTH$}", label("Rows:"))));
    }

    #[test]
    fn test_dtype_counts_group_in_first_seen_order() {
        let batch = TestBatch::builder()
            .column_string("a", &["x"])
            .column_i64("b", &[1])
            .column_string("c", &["y"])
            .build();
        let columns = DataTypesInspection::column_types(&Dataset::from_batch(batch));
        let counts = DataTypesInspection::dtype_counts(&columns);

        assert_eq!(
            counts,
            vec![
                DtypeCount {
                    dtype: "Utf8".to_string(),
                    columns: 2
                },
                DtypeCount {
                    dtype: "Int64".to_string(),
                    columns: 1
                },
            ]
        );
    }

    #[test]
    fn test_empty_dataset_still_lists_columns() {
        let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, true)]));
        let dataset = Dataset::from_batches(&schema, &[]).unwrap();
        let text = render(&dataset);

        assert!(text.contains("0 entries"));
        assert!(text.contains("id"));
        assert!(text.contains("0 non-null"));
    }

    #[test]
    fn test_json_report() {
        let dataset = Dataset::from_batch(TestBatch::scores());
        let json = DataTypesInspection.to_json(&dataset).unwrap();

        assert_eq!(json["strategy"], "types");
        assert_eq!(json["rows"], 3);
        assert_eq!(json["columns"][2]["name"], "score");
        assert_eq!(json["columns"][2]["non_null"], 2);
        assert_eq!(json["dtypes"][0]["dtype"], "Int64");
    }
}
