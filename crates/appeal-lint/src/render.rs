//! Shared text-output helpers.
//!
//! Reports from the core library carry ids and numbers; these helpers turn
//! them into colored terminal text in the configured locale.

use appeal_lint_core::Diagnostic;
use appeal_lint_core::Tier;
use appeal_lint_core::catalog::Impact;
use appeal_lint_core::labels::{self, LabelKind, Locale};
use appeal_lint_core::predict::{NoteSource, PredictionNote};
use owo_colors::OwoColorize;

/// Format a 0–1 probability as a percentage.
pub fn percent(p: f64) -> String {
    format!("{:.0}%", p * 100.0)
}

/// Tier name, colored by band.
pub fn tier(tier: Tier) -> String {
    match tier {
        Tier::High => tier.as_str().green().to_string(),
        Tier::Moderate => tier.as_str().yellow().to_string(),
        Tier::Low => tier.as_str().red().to_string(),
    }
}

/// Impact tag padded for column alignment.
pub fn impact(impact: Impact) -> String {
    let tag = format!("{:<6}", impact.as_str().to_uppercase());
    match impact {
        Impact::High => tag.red().bold().to_string(),
        Impact::Medium => tag.yellow().to_string(),
        Impact::Low => tag.dimmed().to_string(),
    }
}

/// A 1–5 sub-score, colored against the advice thresholds.
pub fn score(value: f64) -> String {
    let text = format!("{value:.1}");
    if value >= 4.0 {
        text.green().to_string()
    } else if value >= 3.5 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// Human-readable text for a prediction note.
pub fn note(note: &PredictionNote, locale: Locale) -> String {
    let delta = format!("{:+.0} pts", note.delta * 100.0);
    match (note.source, note.dimension.as_deref()) {
        (NoteSource::Option, Some(dimension)) => format!(
            "{}: {} ({delta})",
            labels::display(LabelKind::Dimension, dimension, locale),
            labels::display(LabelKind::Option, &note.id, locale),
        ),
        (NoteSource::MissedFactor, _) => format!(
            "{} not claimed (would add {delta})",
            labels::display(LabelKind::Factor, &note.id, locale),
        ),
        _ => format!(
            "{} ({delta})",
            labels::display(LabelKind::Factor, &note.id, locale)
        ),
    }
}

/// Print a titled bullet list, skipping empty lists.
pub fn bullets<I, S>(title: &str, items: I)
where
    I: IntoIterator<Item = S>,
    S: std::fmt::Display,
{
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return;
    }
    println!("\n  {}", title.cyan());
    for item in items {
        println!("    - {item}");
    }
}

/// Print fallbacks to stderr as notes.
pub fn diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        eprintln!("{} {d}", "note:".yellow());
    }
}
