//! Analyze command: issue detection in a driver's statement.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use appeal_lint_core::Advice;
use appeal_lint_core::catalog::DEFAULT_VIOLATION_TYPE;
use appeal_lint_core::config::Config;
use appeal_lint_core::labels::{self, LabelKind};
use appeal_lint_core::statement;

use super::read_input_file;
use crate::render;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Statement file to analyze.
    pub file: Utf8PathBuf,

    /// Violation type (parking, speeding, red_light, general).
    #[arg(long = "violation", value_name = "TYPE")]
    pub violation_type: Option<String>,

    /// Fail unless the success probability reaches this percentage.
    #[arg(long, value_name = "PERCENT")]
    pub min_probability: Option<f64>,
}

/// Detect contestable issues in a statement file.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, violation = ?args.violation_type, "executing analyze command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let violation_type = args
        .violation_type
        .as_deref()
        .or(config.violation_type.as_deref())
        .unwrap_or(DEFAULT_VIOLATION_TYPE);

    let report =
        statement::analyze_statement_with(&content, violation_type, &config.match_options());
    render::diagnostics(&report.diagnostics);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let locale = config.locale;
        println!(
            "{} ({})",
            args.file.bold(),
            labels::display(LabelKind::Violation, &report.violation_type, locale)
        );

        match report.probability {
            Some(p) => println!("\n  {} {p:.1}%", "Success probability:".cyan()),
            None => println!("\n  {} {}", "Success probability:".cyan(), "n/a".dimmed()),
        }

        if !report.issues.is_empty() {
            println!("\n  {}", "Issues:".cyan());
        }
        for issue in &report.issues {
            println!(
                "    {} {} {}",
                render::impact(issue.impact),
                labels::display(LabelKind::Category, &issue.category, locale),
                format!(
                    "(confidence {}, {} match{})",
                    issue.confidence,
                    issue.match_count,
                    if issue.match_count == 1 { "" } else { "es" }
                )
                .dimmed()
            );
            for snippet in &issue.snippets {
                println!("           \"{}\"", snippet.marked().dimmed());
            }
        }

        let advice = |a: &Advice| labels::advice(a, locale);
        render::bullets("Strengths:", report.strengths.iter().map(advice));
        render::bullets("Weaknesses:", report.weaknesses.iter().map(advice));
        println!(
            "\n  {} {}",
            "Recommendation:".cyan(),
            labels::advice(&report.recommendation, locale)
        );
    }

    if let Some(min) = args.min_probability {
        let p = report.probability.unwrap_or(0.0);
        if p < min {
            anyhow::bail!(
                "{} success probability {p:.1}% is below minimum {min:.1}%.",
                args.file
            );
        }
    }

    Ok(())
}
