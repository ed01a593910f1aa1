//! Predict command: factor-based success probability.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use appeal_lint_core::catalog::DEFAULT_VIOLATION_TYPE;
use appeal_lint_core::config::Config;
use appeal_lint_core::labels::{self, LabelKind};
use appeal_lint_core::predict;

use crate::render;

/// Arguments for the `predict` subcommand.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Violation type (parking, speeding, red_light, general).
    #[arg(long = "violation", value_name = "TYPE")]
    pub violation_type: Option<String>,

    /// Factors that apply (comma-separated or repeated).
    #[arg(long = "factor", value_name = "ID", value_delimiter = ',')]
    pub factors: Vec<String>,

    /// Appeal dimension selection, e.g. `evidence=strong` (repeatable).
    #[arg(long = "dimension", value_name = "ID=VALUE", value_parser = parse_selection)]
    pub dimensions: Vec<(String, String)>,
}

fn parse_selection(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got {s:?}"))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(format!("expected ID=VALUE, got {s:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Predict the chance an appeal succeeds.
#[instrument(name = "cmd_predict", skip_all)]
pub fn cmd_predict(args: PredictArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(
        violation = ?args.violation_type,
        factors = args.factors.len(),
        dimensions = args.dimensions.len(),
        "executing predict command"
    );

    let violation_type = args
        .violation_type
        .as_deref()
        .or(config.violation_type.as_deref())
        .unwrap_or(DEFAULT_VIOLATION_TYPE);

    let report = predict::predict_success(violation_type, &args.factors, args.dimensions);
    render::diagnostics(&report.diagnostics);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let locale = config.locale;
    println!(
        "{} {} ({} likelihood)",
        labels::display(LabelKind::Violation, &report.violation_type, locale).bold(),
        render::percent(report.probability).bold(),
        render::tier(report.tier),
    );
    println!(
        "  {} {}",
        "Base rate:".dimmed(),
        render::percent(report.base_rate)
    );

    render::bullets(
        "Strengths:",
        report.strengths.iter().map(|n| render::note(n, locale)),
    );
    render::bullets(
        "Weaknesses:",
        report.weaknesses.iter().map(|n| render::note(n, locale)),
    );
    println!(
        "\n  {} {}",
        "Recommendation:".cyan(),
        labels::advice(&report.recommendation, locale)
    );

    Ok(())
}
