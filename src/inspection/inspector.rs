//! The inspector: holds one strategy and delegates inspection to it.

use std::{
    fmt,
    io::{self, Write},
    sync::Arc,
};

use anyhow::Result;
use log::debug;

use super::strategy::InspectionStrategy;
use crate::dataset::Dataset;

/// Runs the currently selected [`InspectionStrategy`] against datasets.
///
/// An inspector always holds exactly one strategy. Strategies are shared
/// through `Arc`, so the same strategy value can back several inspectors.
pub struct Inspector {
    strategy: Arc<dyn InspectionStrategy>,
}

impl Inspector {
    pub fn new(strategy: Arc<dyn InspectionStrategy>) -> Self {
        Self { strategy }
    }

    /// Replace the current strategy. Always succeeds.
    pub fn set_strategy(&mut self, strategy: Arc<dyn InspectionStrategy>) {
        debug!(
            "switching inspection strategy from {} to {}",
            self.strategy.name(),
            strategy.name()
        );
        self.strategy = strategy;
    }

    pub fn strategy(&self) -> &dyn InspectionStrategy {
        self.strategy.as_ref()
    }

    /// Inspect `dataset` with the current strategy, writing to stdout.
    pub fn execute_inspection(&self, dataset: &Dataset) -> Result<()> {
        let mut out = io::stdout().lock();
        self.execute_inspection_to(dataset, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Inspect `dataset` with the current strategy, writing to `out`.
    pub fn execute_inspection_to(&self, dataset: &Dataset, out: &mut dyn Write) -> Result<()> {
        debug!(
            "running {} inspection on {}",
            self.strategy.name(),
            dataset.label()
        );
        self.strategy.inspect(dataset, out)
    }

    /// Like [`Inspector::execute_inspection_to`], but as one JSON line.
    pub fn execute_inspection_json(&self, dataset: &Dataset, out: &mut dyn Write) -> Result<()> {
        debug!(
            "running {} inspection on {} (json)",
            self.strategy.name(),
            dataset.label()
        );
        self.strategy.render_to_json(dataset, out)
    }
}

impl fmt::Debug for Inspector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspector")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
