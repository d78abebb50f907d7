//! Read Parquet, Arrow IPC and delimited text files into a [`Dataset`].

use std::{
    fs::File,
    io::{Seek, SeekFrom},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result, bail};
use arrow::{
    array::RecordBatch,
    csv::{ReaderBuilder, reader::Format},
    datatypes::SchemaRef,
    ipc::reader::{FileReader, StreamReader},
};
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::{
    Dataset,
    format::{ArrowVariant, DetectedFormat},
};

/// Records scanned when inferring a CSV schema.
const CSV_INFER_RECORDS: usize = 1000;

/// Load the file at `path`, already resolved to `format`, into memory.
pub fn load_dataset(path: &Path, format: DetectedFormat, batch_size: usize) -> Result<Dataset> {
    debug!("loading {} as {:?}", path.display(), format);

    let (schema, batches) = match format {
        DetectedFormat::Parquet => read_parquet(path, batch_size)?,
        DetectedFormat::Arrow {
            variant: ArrowVariant::File,
        } => read_arrow_file(path)?,
        DetectedFormat::Arrow {
            variant: ArrowVariant::Stream,
        } => read_arrow_stream(path)?,
        DetectedFormat::Csv => read_delimited(path, b',', batch_size)?,
        DetectedFormat::Tsv => read_delimited(path, b'\t', batch_size)?,
        DetectedFormat::Unknown => bail!("cannot load {}: unknown format", path.display()),
    };

    let dataset =
        Dataset::from_batches(&schema, &batches)?.with_label(path.display().to_string());

    info!(
        "loaded {} ({} rows, {} columns, {} batches)",
        path.display(),
        dataset.num_rows(),
        dataset.num_columns(),
        batches.len()
    );

    Ok(dataset)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("failed to open {}", path.display()))
}

fn read_parquet(path: &Path, batch_size: usize) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)
        .context("reading parquet metadata")?
        .with_batch_size(batch_size);
    let schema = Arc::clone(builder.schema());
    let reader = builder.build().context("building parquet reader")?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

fn read_arrow_file(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let reader = FileReader::try_new_buffered(open(path)?, None)
        .context("not a valid arrow file format")?;
    let schema = reader.schema();
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

fn read_arrow_stream(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let reader = StreamReader::try_new_buffered(open(path)?, None)
        .context("not a valid arrow stream format")?;
    let schema = reader.schema();
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

/// Empty fields are read as nulls for every column type.
fn read_delimited(
    path: &Path,
    delimiter: u8,
    batch_size: usize,
) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let format = Format::default()
        .with_header(true)
        .with_delimiter(delimiter);

    let mut file = open(path)?;
    let (schema, records) = format
        .infer_schema(&mut file, Some(CSV_INFER_RECORDS))
        .context("inferring schema")?;
    if schema.fields().is_empty() {
        bail!("{} has no header row", path.display());
    }
    debug!("inferred schema from {records} records: {schema:?}");

    file.seek(SeekFrom::Start(0))?;
    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_delimiter(delimiter)
        .with_batch_size(batch_size)
        .build(file)?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}
