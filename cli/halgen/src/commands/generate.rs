//! `halgen generate` — scan the hardware tree and write BUILD.gn.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use halgen_chips::{validate_target, Severity};
use halgen_gn::{BuildPlan, BuildSummary};
use log::debug;

use crate::manifest::HalgenManifest;

/// Command-line overrides applied on top of the manifest.
#[derive(Debug, Default)]
pub struct GenerateOptions<'a> {
    pub chip: Option<&'a str>,
    pub board: Option<&'a str>,
    /// Destination; relative paths resolve against the project directory.
    pub output: Option<&'a Path>,
    pub sorted: bool,
    /// Print the document instead of writing it.
    pub stdout: bool,
}

/// Resolve the plan for this run.
pub fn plan(manifest: Option<&HalgenManifest>, options: &GenerateOptions<'_>) -> BuildPlan {
    let mut plan = manifest
        .map(HalgenManifest::to_plan)
        .unwrap_or_else(BuildPlan::rk2206);

    if let Some(chip) = options.chip {
        plan.target.chip = chip.to_string();
    }
    if let Some(board) = options.board {
        plan.target.board = board.to_string();
    }
    if let Some(output) = options.output {
        plan.output = PathBuf::from(output);
    }
    if options.sorted {
        plan.sorted = true;
    }
    plan
}

/// Generate the build file for the project at `project_dir`.
pub fn run(
    project_dir: &Path,
    manifest: Option<&HalgenManifest>,
    options: &GenerateOptions<'_>,
) -> Result<()> {
    let plan = plan(manifest, options);
    debug!("resolved plan: {plan:?}");

    if let Err(issues) = validate_target(&plan.chips, &plan.target) {
        let has_errors = issues.iter().any(|i| i.severity == Severity::Error);
        for issue in &issues {
            eprintln!("{}: {}", issue.severity, issue.message);
        }
        if has_errors {
            bail!(
                "cannot generate for chip '{}'. Use 'halgen chips' to see known chips.",
                plan.target.chip
            );
        }
    }

    if options.stdout {
        let (text, _) = plan
            .render(project_dir)
            .with_context(|| format!("generating for {}", plan.target.chip))?;
        print!("{text}");
        return Ok(());
    }

    let summary = plan
        .run(project_dir)
        .with_context(|| format!("generating for {}", plan.target.chip))?;
    print_summary(&plan, &summary);
    Ok(())
}

fn print_summary(plan: &BuildPlan, summary: &BuildSummary) {
    println!("Target: {} ({})", plan.target.chip, plan.target.board);
    for report in &summary.roots {
        println!(
            "  {:<25} {:>4} kept {:>4} excluded",
            report.root.display(),
            report.kept.len(),
            report.excluded.len()
        );
    }
    if let Some(output) = &summary.output {
        println!(
            "Wrote {} ({} sources, {} excluded)",
            output.display(),
            summary.kept(),
            summary.excluded()
        );
    }
}
