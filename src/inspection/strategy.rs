//! The inspection strategy trait.

use std::io::Write;

use anyhow::Result;
use serde_json::Value;

use crate::dataset::Dataset;

/// One interchangeable way of inspecting a dataset.
///
/// Implementations are stateless and only read the dataset they are given.
pub trait InspectionStrategy: Send + Sync {
    /// Short identifier, e.g. "types".
    fn name(&self) -> &str;

    /// Write a human-readable report for `dataset`.
    fn inspect(&self, dataset: &Dataset, out: &mut dyn Write) -> Result<()>;

    /// Serialize the same report to JSON
    fn to_json(&self, dataset: &Dataset) -> Result<Value>;

    /// Render to JSON
    fn render_to_json(&self, dataset: &Dataset, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", serde_json::to_string(&self.to_json(dataset)?)?)?;
        Ok(())
    }
}
