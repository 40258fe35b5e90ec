use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use ndlm_core::to_canonical_json_bytes;
use ndlm_validate::{run_suite, SuiteConfig, SuiteReport};
use tracing::info;

use crate::write_bytes;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Master seed; overrides the seed in `--config`.
    #[arg(long)]
    pub seed: Option<u64>,
    /// YAML suite configuration. Missing fields keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Destination of the canonical JSON report.
    #[arg(long)]
    pub json_output: PathBuf,
    /// Destination of the Markdown report.
    #[arg(long)]
    pub md_output: PathBuf,
}

pub fn run(args: &ValidateArgs) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let report = run_suite(&config)?;

    let json = to_canonical_json_bytes(&report)?;
    write_bytes(&args.json_output, &json)?;
    let markdown = render_markdown(&report)?;
    write_bytes(&args.md_output, markdown.as_bytes())?;
    info!(
        json = %args.json_output.display(),
        markdown = %args.md_output.display(),
        "reports written"
    );

    let summary = report.summary;
    println!(
        "validation summary: total={} passed={} failed={} all_passed={} hash={}",
        summary.total, summary.passed, summary.failed, summary.all_passed, report.results_hash
    );
    if !summary.all_passed {
        return Err(format!("{} of {} checkers failed", summary.failed, summary.total).into());
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<SuiteConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&raw)?)
        }
        None => Ok(SuiteConfig::default()),
    }
}

fn render_markdown(report: &SuiteReport) -> Result<String, Box<dyn Error>> {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let mut out = String::new();
    writeln!(out, "# Validation Results")?;
    writeln!(out)?;
    writeln!(out, "- Timestamp: {timestamp}")?;
    writeln!(out, "- Schema: {}", report.schema_version)?;
    writeln!(out, "- Seed: {}", report.seed)?;
    writeln!(out, "- Total checks: {}", report.summary.total)?;
    writeln!(out, "- PASS: {}", report.summary.passed)?;
    writeln!(out, "- FAIL: {}", report.summary.failed)?;
    writeln!(out, "- Results hash: `{}`", report.results_hash)?;
    writeln!(out)?;
    writeln!(out, "## Validated items")?;
    writeln!(out)?;
    for result in &report.results {
        let status = if result.passed() { "PASS" } else { "FAIL" };
        let diagnostics = String::from_utf8(to_canonical_json_bytes(result.diagnostics())?)?;
        writeln!(out, "- {}: {status}", result.name())?;
        writeln!(out, "  equation refs: {}", result.equation_refs())?;
        writeln!(out, "  details: {}", result.details())?;
        writeln!(out, "  diagnostics: {diagnostics}")?;
    }
    Ok(out)
}
