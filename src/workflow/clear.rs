//! Workflow clear step.
use super::batch_root_for_status;
use crate::batch;
use crate::cli::ClearArgs;
use anyhow::Result;

/// Remove generated records and the last report. Config and history stay.
pub fn run_clear(args: &ClearArgs) -> Result<()> {
    let batch_root = batch_root_for_status(&args.batch)?;
    if !batch_root.exists() {
        println!("nothing to clear in {}", batch_root.display());
        return Ok(());
    }
    let removed = batch::clear_results(&batch_root)?;
    if removed.is_empty() {
        println!("nothing to clear in {}", batch_root.display());
    }
    for path in removed {
        println!("removed {}", path.display());
    }
    Ok(())
}
