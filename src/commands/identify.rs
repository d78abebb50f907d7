//! Identify command: report the detected format of a data file.

use anyhow::Result;

use crate::{IdentifyArgs, dataset::detect_format};

pub fn run(args: &IdentifyArgs) -> Result<()> {
    let format = detect_format(args.file.as_std_path())?;

    if args.format.resolves_to_json() {
        println!("{}", serde_json::to_string(&format.to_json())?);
    } else {
        println!("{}", format);
    }

    Ok(())
}
