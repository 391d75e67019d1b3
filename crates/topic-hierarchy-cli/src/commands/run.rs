//! Run command: execute the full reconciliation pipeline.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{error, info};

use topic_hierarchy_core::config::HierarchySpec;
use topic_hierarchy_core::input::TrainedTier;
use topic_hierarchy_core::pipeline::run_hierarchy;

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the project spec JSON file
    #[arg(short, long)]
    pub spec: PathBuf,
}

/// Load spec and tiers, run the pipeline, report the outcome.
///
/// Returns the process exit code: 0 on success, 1 on any error.
pub fn run_command(args: RunArgs) -> i32 {
    let spec = match HierarchySpec::from_file(&args.spec) {
        Ok(spec) => spec,
        Err(e) => {
            error!("failed to load spec {}: {e}", args.spec.display());
            return 1;
        }
    };
    info!(
        max_assign = spec.max_assign(),
        detail = ?spec.output_detail,
        "loaded spec from {}",
        args.spec.display()
    );

    let main = match TrainedTier::load(
        Path::new(&spec.main_model.input),
        spec.main_model.topics,
        "main tier",
    ) {
        Ok(tier) => tier,
        Err(e) => {
            error!("failed to load main tier: {e}");
            return 1;
        }
    };
    let sub = match TrainedTier::load(
        Path::new(&spec.sub_model.input),
        spec.sub_model.topics,
        "sub tier",
    ) {
        Ok(tier) => tier,
        Err(e) => {
            error!("failed to load sub tier: {e}");
            return 1;
        }
    };

    match run_hierarchy(&spec, main, sub) {
        Ok(report) => {
            println!(
                "reconciled {} sub topics in {:.3}s ({} documents exported)",
                report.assignment.len(),
                report.elapsed.as_secs_f64(),
                report.total_docs
            );
            if !report.degenerate_rows.is_empty() {
                println!(
                    "warning: {} sub topic(s) had no positive similarity: {:?}",
                    report.degenerate_rows.len(),
                    report.degenerate_rows
                );
            }
            0
        }
        Err(e) => {
            error!("pipeline failed: {e}");
            1
        }
    }
}
