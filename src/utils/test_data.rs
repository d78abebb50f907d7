//! Test data factory for creating Arrow `RecordBatch`es in tests.
//!
//! # Usage
//!
//! ```rust
//! use frame_lens::utils::test_data::TestBatch;
//!
//! let batch = TestBatch::builder()
//!     .column_i64("id", &[1, 2, 3])
//!     .column_string("name", &["a", "b", "c"])
//!     .build();
//!
//! // or using a preset batch
//! let batch = TestBatch::scores(); // id: i64, name: string, score: nullable f64
//! ```

use std::sync::Arc;

use arrow::{
    array::{
        ArrayRef, BooleanArray, Date32Array, DictionaryArray, Float64Array, Int32Array,
        Int64Array, RecordBatch, StringArray,
    },
    datatypes::{Field, Int32Type, Schema},
};

#[derive(Default)]
pub struct TestBatchBuilder {
    columns: Vec<(String, ArrayRef, bool)>, // (name, array, nullable)
}

impl TestBatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column_i32(mut self, name: &str, values: &[i32]) -> Self {
        let array: ArrayRef = Arc::new(Int32Array::from(values.to_vec()));
        self.columns.push((name.to_string(), array, false));
        self
    }

    pub fn column_i64(mut self, name: &str, values: &[i64]) -> Self {
        let array: ArrayRef = Arc::new(Int64Array::from(values.to_vec()));
        self.columns.push((name.to_string(), array, false));
        self
    }

    pub fn column_i64_nullable(mut self, name: &str, values: &[Option<i64>]) -> Self {
        let array: ArrayRef = Arc::new(Int64Array::from(values.to_vec()));
        self.columns.push((name.to_string(), array, true));
        self
    }

    pub fn column_f64(mut self, name: &str, values: &[f64]) -> Self {
        let array: ArrayRef = Arc::new(Float64Array::from(values.to_vec()));
        self.columns.push((name.to_string(), array, false));
        self
    }

    pub fn column_f64_nullable(mut self, name: &str, values: &[Option<f64>]) -> Self {
        let array: ArrayRef = Arc::new(Float64Array::from(values.to_vec()));
        self.columns.push((name.to_string(), array, true));
        self
    }

    pub fn column_string(mut self, name: &str, values: &[&str]) -> Self {
        let array: ArrayRef = Arc::new(StringArray::from(values.to_vec()));
        self.columns.push((name.to_string(), array, false));
        self
    }

    pub fn column_string_nullable(mut self, name: &str, values: &[Option<&str>]) -> Self {
        let array: ArrayRef = Arc::new(StringArray::from(values.to_vec()));
        self.columns.push((name.to_string(), array, true));
        self
    }

    /// Dictionary-encoded strings with `Int32` keys.
    pub fn column_dictionary(mut self, name: &str, values: &[&str]) -> Self {
        let array: DictionaryArray<Int32Type> = values.iter().copied().collect();
        self.columns.push((name.to_string(), Arc::new(array), false));
        self
    }

    pub fn column_bool(mut self, name: &str, values: &[bool]) -> Self {
        let array: ArrayRef = Arc::new(BooleanArray::from(values.to_vec()));
        self.columns.push((name.to_string(), array, false));
        self
    }

    /// values are days since epoch
    pub fn column_date32(mut self, name: &str, values: &[i32]) -> Self {
        let array: ArrayRef = Arc::new(Date32Array::from(values.to_vec()));
        self.columns.push((name.to_string(), array, false));
        self
    }

    pub fn build(self) -> RecordBatch {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|(name, array, nullable)| Field::new(name, array.data_type().clone(), *nullable))
            .collect();

        let schema = Arc::new(Schema::new(fields));
        let arrays: Vec<ArrayRef> = self
            .columns
            .into_iter()
            .map(|(_, array, _)| array)
            .collect();

        RecordBatch::try_new(schema, arrays).expect("failed to create RecordBatch")
    }
}

pub struct TestBatch;

impl TestBatch {
    pub fn builder() -> TestBatchBuilder {
        TestBatchBuilder::new()
    }

    /// Three rows: `id` (i64), `name` (string) and `score` (f64, second row null).
    pub fn scores() -> RecordBatch {
        Self::builder()
            .column_i64("id", &[1, 2, 3])
            .column_string("name", &["ada", "grace", "linus"])
            .column_f64_nullable("score", &[Some(91.5), None, Some(78.25)])
            .build()
    }

    /// Columns of every kind: numeric, categorical and one excluded temporal column.
    pub fn mixed() -> RecordBatch {
        Self::builder()
            .column_i32("qty", &[4, 1, 4, 2])
            .column_f64("price", &[2.5, 10.0, 2.5, 7.25])
            .column_string("city", &["Oslo", "Lima", "Oslo", "Kyiv"])
            .column_bool("in_stock", &[true, false, true, true])
            .column_dictionary("tier", &["gold", "basic", "basic", "gold"])
            .column_date32("shipped", &[19000, 19001, 19002, 19003])
            .build()
    }
}

/// Writers for laying test batches down on disk in each supported format.
pub mod files {
    use std::{fs::File, path::Path};

    use anyhow::Result;
    use arrow::{
        array::RecordBatch,
        csv::WriterBuilder,
        ipc::writer::{FileWriter, StreamWriter},
    };
    use parquet::arrow::ArrowWriter;

    pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
        writer.write(batch)?;
        writer.close()?;
        Ok(())
    }

    pub fn write_arrow_file(path: &Path, batch: &RecordBatch) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = FileWriter::try_new(file, &batch.schema())?;
        writer.write(batch)?;
        writer.finish()?;
        Ok(())
    }

    pub fn write_arrow_stream(path: &Path, batch: &RecordBatch) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = StreamWriter::try_new(file, &batch.schema())?;
        writer.write(batch)?;
        writer.finish()?;
        Ok(())
    }

    pub fn write_csv(path: &Path, batch: &RecordBatch) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = WriterBuilder::new().with_header(true).build(file);
        writer.write(batch)?;
        Ok(())
    }
}
