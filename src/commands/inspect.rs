//! Inspect command: load a dataset and run the selected strategies over it.

use std::io::{self, Write};

use anyhow::{Result, anyhow};

use crate::{
    InspectArgs,
    dataset::{Dataset, load_dataset, resolve_format},
    inspection::Inspector,
};

pub fn run(args: &InspectArgs) -> Result<()> {
    let path = args.file.as_std_path();
    let format = resolve_format(path, args.input_format)?;
    let dataset = load_dataset(path, format, args.batch_size)
        .map_err(|e| anyhow!("Failed to load {}: {:#}", args.file, e))?;

    let (first, rest) = args
        .strategy
        .split_first()
        .ok_or_else(|| anyhow!("at least one --strategy is required"))?;

    let json = args.format.resolves_to_json();
    let mut inspector = Inspector::new((*first).into());
    render(&inspector, &dataset, json)?;

    for kind in rest {
        inspector.set_strategy((*kind).into());
        render(&inspector, &dataset, json)?;
    }

    Ok(())
}

fn render(inspector: &Inspector, dataset: &Dataset, json: bool) -> Result<()> {
    if json {
        let mut out = io::stdout().lock();
        inspector.execute_inspection_json(dataset, &mut out)?;
        out.flush()?;
        Ok(())
    } else {
        inspector.execute_inspection(dataset)
    }
}
