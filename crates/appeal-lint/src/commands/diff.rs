//! Diff command: word-level comparison of two drafts.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use appeal_lint_core::diff::{self, ChangeKind, DiffRun, DiffStats};

use super::read_input_file;

/// Arguments for the `diff` subcommand.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Original draft.
    pub original: Utf8PathBuf,

    /// Modified draft.
    pub modified: Utf8PathBuf,

    /// Print token counts instead of the marked-up text.
    #[arg(long)]
    pub stats: bool,
}

#[derive(Serialize)]
struct DiffOutput {
    runs: Vec<DiffRun>,
    stats: DiffStats,
}

/// Compare two draft files.
#[instrument(name = "cmd_diff", skip_all, fields(original = %args.original, modified = %args.modified))]
pub fn cmd_diff(
    args: DiffArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(stats = args.stats, "executing diff command");

    let original = read_input_file(&args.original, max_input_bytes)?;
    let modified = read_input_file(&args.modified, max_input_bytes)?;

    let runs = diff::diff_texts(&original, &modified);
    let stats = diff::summarize(&runs);

    if global_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&DiffOutput { runs, stats })?
        );
    } else if args.stats {
        println!(
            "{} unchanged, {} added, {} removed",
            stats.unchanged,
            format!("{}", stats.added).green(),
            format!("{}", stats.removed).red(),
        );
    } else {
        println!("{}", markup(&runs));
    }

    Ok(())
}

/// Inline markup: `[-removed-]` and `{+added+}`.
fn markup(runs: &[DiffRun]) -> String {
    runs.iter()
        .map(|run| match run.kind {
            ChangeKind::Unchanged => run.text.clone(),
            ChangeKind::Added => format!("{{+{}+}}", run.text).green().to_string(),
            ChangeKind::Removed => format!("[-{}-]", run.text).red().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
