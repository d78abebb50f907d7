//! Input format detection for data files.

use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::Path,
};

use anyhow::{Context, Result, bail};
use arrow::ipc::reader::StreamReader;
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    InputFormat,
    inspection::style::{dim, value},
};

const PARQUET_MAGIC: &[u8] = b"PAR1";
const ARROW_MAGIC: &[u8] = b"ARROW1";
const CONTINUATION_MARKER: &[u8] = &[0xff; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowVariant {
    File,
    Stream,
}

impl std::fmt::Display for ArrowVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArrowVariant::File => write!(f, "file"),
            ArrowVariant::Stream => write!(f, "stream"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum DetectedFormat {
    Parquet,
    Arrow { variant: ArrowVariant },
    Csv,
    Tsv,
    Unknown,
}

impl std::fmt::Display for DetectedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectedFormat::Parquet => write!(f, "{}", value("Parquet")),
            DetectedFormat::Arrow { variant } => write!(
                f,
                "{} {}",
                value("Arrow IPC"),
                dim(format!("({})", variant))
            ),
            DetectedFormat::Csv => write!(f, "{}", value("CSV")),
            DetectedFormat::Tsv => write!(f, "{}", value("TSV")),
            DetectedFormat::Unknown => write!(f, "{}", dim("Unknown")),
        }
    }
}

impl DetectedFormat {
    pub fn to_json(&self) -> Value {
        json!(self)
    }
}

/// Detect the format of a data file.
///
/// Checks, in order:
/// 1. Parquet (PAR1 at both ends)
/// 2. Arrow file (ARROW1 at both ends)
/// 3. `.csv` / `.tsv` extension, since delimited text has no magic
/// 4. Arrow stream (continuation marker, then a parseable schema message)
pub fn detect_format(path: &Path) -> Result<DetectedFormat> {
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    if magic_bytes_match_start(&mut file, PARQUET_MAGIC)?
        && magic_bytes_match_end(&mut file, PARQUET_MAGIC)?
    {
        return Ok(DetectedFormat::Parquet);
    }

    if magic_bytes_match_start(&mut file, ARROW_MAGIC)?
        && magic_bytes_match_end(&mut file, ARROW_MAGIC)?
    {
        return Ok(DetectedFormat::Arrow {
            variant: ArrowVariant::File,
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => return Ok(DetectedFormat::Csv),
        Some("tsv") => return Ok(DetectedFormat::Tsv),
        _ => {}
    }

    // streams written since IPC format v1.0 open with a continuation marker
    if magic_bytes_match_start(&mut file, CONTINUATION_MARKER)? {
        file.seek(SeekFrom::Start(0))?;
        if StreamReader::try_new_buffered(file, None).is_ok() {
            return Ok(DetectedFormat::Arrow {
                variant: ArrowVariant::Stream,
            });
        }
    }

    Ok(DetectedFormat::Unknown)
}

/// Resolve the requested input format against the file itself.
///
/// Explicit formats are trusted except for Arrow, whose file/stream variant
/// still has to be read from the data.
pub fn resolve_format(path: &Path, requested: InputFormat) -> Result<DetectedFormat> {
    let detected = match requested {
        InputFormat::Parquet => DetectedFormat::Parquet,
        InputFormat::Csv => DetectedFormat::Csv,
        InputFormat::Tsv => DetectedFormat::Tsv,
        InputFormat::Arrow => match detect_format(path)? {
            arrow @ DetectedFormat::Arrow { .. } => arrow,
            _ => bail!("{} is not an Arrow IPC file or stream", path.display()),
        },
        InputFormat::Auto => detect_format(path)?,
    };

    if detected == DetectedFormat::Unknown {
        bail!(
            "could not detect the format of {}; pass --input-format explicitly",
            path.display()
        );
    }

    Ok(detected)
}

fn magic_bytes_match_start(file: &mut File, expected: &[u8]) -> Result<bool> {
    if file.metadata()?.len() < expected.len() as u64 {
        return Ok(false);
    }

    let mut buf = vec![0u8; expected.len()];
    file.seek(SeekFrom::Start(0))?;
    file.read_exact(&mut buf)?;

    Ok(buf == expected)
}

fn magic_bytes_match_end(file: &mut File, expected: &[u8]) -> Result<bool> {
    if file.metadata()?.len() < expected.len() as u64 {
        return Ok(false);
    }

    let mut buf = vec![0u8; expected.len()];

    // converting from usize to i64 can overflow, so we allow
    // for errors rather than panicking or overflowing
    let expected_len: i64 = expected.len().try_into()?;

    file.seek(SeekFrom::End(-expected_len))?;
    file.read_exact(&mut buf)?;

    Ok(buf == expected)
}
