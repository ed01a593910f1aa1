//! Score command: appeal draft quality.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use appeal_lint_core::{Advice, AppealType};
use appeal_lint_core::config::Config;
use appeal_lint_core::labels::{self, LabelKind};
use appeal_lint_core::quality;

use super::read_input_file;
use crate::render;

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Draft file to score.
    pub file: Utf8PathBuf,

    /// Appeal type (procedural, factual, legal, comprehensive).
    #[arg(long, value_name = "TYPE")]
    pub appeal_type: Option<String>,

    /// Minimum acceptable overall score (1–5).
    #[arg(long = "min", value_name = "SCORE")]
    pub min_score: Option<f64>,
}

/// Score an appeal draft and optionally gate on the overall score.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, appeal_type = ?args.appeal_type, "executing score command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let appeal_type = args
        .appeal_type
        .as_deref()
        .or(config.appeal_type.as_deref())
        .unwrap_or(AppealType::DEFAULT.as_str());
    let min_score = args.min_score.or(config.quality_min_score);

    let report = quality::score_quality(&content, appeal_type);
    render::diagnostics(&report.diagnostics);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let Some(ref metrics) = report.metrics else {
        if min_score.is_some() {
            bail!("{} is empty; nothing to score.", args.file);
        }
        if !global_json {
            println!("{}: {}", args.file.bold(), "empty draft".yellow());
        }
        return Ok(());
    };

    if !global_json {
        let locale = config.locale;
        println!(
            "{} ({} appeal)",
            args.file.bold(),
            labels::display(LabelKind::AppealType, report.appeal_type.as_str(), locale)
        );
        println!(
            "\n  {} {}/5",
            "Overall:".cyan(),
            render::score(metrics.overall).bold()
        );
        for (name, value) in [
            ("Clarity", metrics.clarity),
            ("Persuasiveness", metrics.persuasiveness),
            ("Professionalism", metrics.professionalism),
            ("Relevance", metrics.relevance),
        ] {
            println!("    {:<16} {}", format!("{name}:").dimmed(), render::score(value));
        }
        let advice = |a: &Advice| labels::advice(a, locale);
        render::bullets("Suggestions:", metrics.suggestions.iter().map(advice));
        render::bullets("Strengths:", metrics.strengths.iter().map(advice));
    }

    if let Some(min) = min_score
        && metrics.overall < min
    {
        bail!(
            "{} scores {:.1} (min: {:.1}). Address the suggestions above.",
            args.file,
            metrics.overall,
            min,
        );
    }

    Ok(())
}
