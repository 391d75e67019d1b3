//! Validate command: check a project spec without touching tier data.

use std::path::PathBuf;

use clap::Args;
use tracing::error;

use topic_hierarchy_core::config::HierarchySpec;

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the project spec JSON file
    #[arg(short, long)]
    pub spec: PathBuf,
}

/// Parse and validate the spec, printing what the run would produce.
pub fn validate_command(args: ValidateArgs) -> i32 {
    match HierarchySpec::from_file(&args.spec) {
        Ok(spec) => {
            println!("spec ok: {}", args.spec.display());
            println!(
                "  tiers: {} main topics, {} sub topics, maxAssign {}",
                spec.main_model.topics,
                spec.sub_model.topics,
                spec.max_assign()
            );
            println!("  corpus -> {}", spec.document_output_path().display());
            println!("  main topics -> {}", spec.main_topic_output_path().display());
            println!("  sub topics -> {}", spec.sub_topic_output_path().display());
            if let Some(p) = spec.similarity_output_path() {
                println!("  similarity matrix -> {}", p.display());
            }
            if let Some(p) = spec.assignment_output_path() {
                println!("  assignment table -> {}", p.display());
            }
            0
        }
        Err(e) => {
            error!("invalid spec {}: {e}", args.spec.display());
            1
        }
    }
}
