//! In-memory tabular datasets and the loaders that produce them.

pub mod format;
pub mod loader;

pub use format::{ArrowVariant, DetectedFormat, detect_format, resolve_format};
pub use loader::load_dataset;

use anyhow::Result;
use arrow::{
    array::{Array, ArrayRef, AsArray, RecordBatch},
    compute::concat_batches,
    datatypes::{DataType, Field, Float32Type, Float64Type, SchemaRef},
};

const DEFAULT_LABEL: &str = "Dataset";

/// A table of named, typed columns held as a single Arrow record batch.
///
/// Inspection only ever borrows a dataset; nothing in this crate mutates one
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    batch: RecordBatch,
    label: Option<String>,
}

impl Dataset {
    pub fn from_batch(batch: RecordBatch) -> Self {
        Self { batch, label: None }
    }

    /// Concatenate `batches` into one dataset. An empty slice yields a
    /// zero-row dataset with the given schema.
    pub fn from_batches(schema: &SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
        let batch = concat_batches(schema, batches)?;
        Ok(Self::from_batch(batch))
    }

    /// Attach a display label, usually the source path.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Total size of the Arrow buffers backing this dataset.
    pub fn memory_size(&self) -> usize {
        self.batch.get_array_memory_size()
    }

    /// Columns in schema order.
    pub fn columns(&self) -> impl Iterator<Item = Column<'_>> {
        let schema = self.batch.schema_ref();
        schema
            .fields()
            .iter()
            .zip(self.batch.columns())
            .enumerate()
            .map(|(index, (field, array))| Column {
                index,
                field: field.as_ref(),
                array,
            })
    }

    /// Columns of the given kind, in schema order.
    pub fn columns_of_kind(&self, kind: ColumnKind) -> impl Iterator<Item = Column<'_>> {
        self.columns().filter(move |c| c.kind() == kind)
    }
}

/// A borrowed view of one column.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub index: usize,
    pub field: &'a Field,
    pub array: &'a ArrayRef,
}

impl<'a> Column<'a> {
    pub fn name(&self) -> &'a str {
        self.field.name()
    }

    pub fn data_type(&self) -> &'a DataType {
        self.field.data_type()
    }

    pub fn kind(&self) -> ColumnKind {
        ColumnKind::of(self.data_type())
    }

    /// Values that are neither null nor, for floating point columns, NaN.
    pub fn non_missing_count(&self) -> usize {
        let nan_count = match self.array.data_type() {
            DataType::Float64 => self
                .array
                .as_primitive::<Float64Type>()
                .iter()
                .filter(|v| v.is_some_and(f64::is_nan))
                .count(),
            DataType::Float32 => self
                .array
                .as_primitive::<Float32Type>()
                .iter()
                .filter(|v| v.is_some_and(f32::is_nan))
                .count(),
            _ => 0,
        };
        self.array.len() - self.array.null_count() - nan_count
    }
}

/// How a column participates in summary statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integers, unsigned integers, floats and decimals.
    Numeric,
    /// Strings, booleans and dictionary-encoded strings.
    Categorical,
    /// Temporal, binary, nested and non-string dictionary types.
    Other,
}

impl ColumnKind {
    pub fn of(data_type: &DataType) -> Self {
        match data_type {
            dt if dt.is_numeric() => ColumnKind::Numeric,
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View | DataType::Boolean => {
                ColumnKind::Categorical
            }
            DataType::Dictionary(_, values)
                if matches!(
                    **values,
                    DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
                ) =>
            {
                ColumnKind::Categorical
            }
            _ => ColumnKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_data::TestBatch;
    use arrow::datatypes::{Field, Schema, TimeUnit};
    use std::sync::Arc;

    #[test]
    fn test_column_kind_classification() {
        assert_eq!(ColumnKind::of(&DataType::Int64), ColumnKind::Numeric);
        assert_eq!(ColumnKind::of(&DataType::UInt8), ColumnKind::Numeric);
        assert_eq!(ColumnKind::of(&DataType::Float32), ColumnKind::Numeric);
        assert_eq!(
            ColumnKind::of(&DataType::Decimal128(10, 2)),
            ColumnKind::Numeric
        );
        assert_eq!(ColumnKind::of(&DataType::Utf8), ColumnKind::Categorical);
        assert_eq!(ColumnKind::of(&DataType::Boolean), ColumnKind::Categorical);
        assert_eq!(
            ColumnKind::of(&DataType::Dictionary(
                Box::new(DataType::Int32),
                Box::new(DataType::Utf8)
            )),
            ColumnKind::Categorical
        );
        assert_eq!(
            ColumnKind::of(&DataType::Dictionary(
                Box::new(DataType::Int32),
                Box::new(DataType::Int64)
            )),
            ColumnKind::Other
        );
        assert_eq!(ColumnKind::of(&DataType::Date32), ColumnKind::Other);
        assert_eq!(
            ColumnKind::of(&DataType::Timestamp(TimeUnit::Microsecond, None)),
            ColumnKind::Other
        );
    }

    #[test]
    fn test_columns_in_schema_order() {
        let dataset = Dataset::from_batch(TestBatch::scores());
        let names: Vec<&str> = dataset.columns().map(|c| c.name()).collect();
        assert_eq!(names, vec!["id", "name", "score"]);
        assert_eq!(dataset.num_rows(), 3);
        assert_eq!(dataset.num_columns(), 3);
    }

    #[test]
    fn test_non_missing_count_skips_nulls_and_nan() {
        let batch = TestBatch::builder()
            .column_f64_nullable("x", &[Some(1.0), None, Some(f64::NAN), Some(4.0)])
            .column_string_nullable("s", &[Some("a"), None, None, Some("b")])
            .build();
        let dataset = Dataset::from_batch(batch);
        let counts: Vec<usize> = dataset.columns().map(|c| c.non_missing_count()).collect();
        assert_eq!(counts, vec![2, 2]);
    }

    #[test]
    fn test_non_missing_count_nullable_integers() {
        let batch = TestBatch::builder()
            .column_i64_nullable("visits", &[Some(3), None, Some(0), None])
            .build();
        let dataset = Dataset::from_batch(batch);
        let column = dataset.columns().next().unwrap();
        assert_eq!(column.kind(), ColumnKind::Numeric);
        assert_eq!(column.non_missing_count(), 2);
    }

    #[test]
    fn test_columns_of_kind() {
        let dataset = Dataset::from_batch(TestBatch::scores());
        let numeric: Vec<&str> = dataset
            .columns_of_kind(ColumnKind::Numeric)
            .map(|c| c.name())
            .collect();
        let categorical: Vec<&str> = dataset
            .columns_of_kind(ColumnKind::Categorical)
            .map(|c| c.name())
            .collect();
        assert_eq!(numeric, vec!["id", "score"]);
        assert_eq!(categorical, vec!["name"]);
    }

    #[test]
    fn test_from_batches_concatenates() {
        let first = TestBatch::builder()
            .column_i64("id", &[1, 2])
            .build();
        let second = TestBatch::builder().column_i64("id", &[3]).build();
        let schema = first.schema();
        let dataset = Dataset::from_batches(&schema, &[first, second]).unwrap();
        assert_eq!(dataset.num_rows(), 3);
    }

    #[test]
    fn test_from_no_batches_is_empty() {
        let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, true)]));
        let dataset = Dataset::from_batches(&schema, &[]).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.num_columns(), 1);
    }

    #[test]
    fn test_label_defaults() {
        let dataset = Dataset::from_batch(TestBatch::scores());
        assert_eq!(dataset.label(), "Dataset");
        assert_eq!(dataset.with_label("scores.csv").label(), "scores.csv");
    }
}
