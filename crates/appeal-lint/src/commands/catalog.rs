//! Catalog command: list the ids other commands accept.

use anyhow::bail;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use appeal_lint_core::AppealType;
use appeal_lint_core::catalog::{
    self, APPEAL_DIMENSIONS, AppealDimension, VIOLATION_PROFILES, ViolationProfile,
};
use appeal_lint_core::labels::{self, LabelKind, Locale};

use crate::render;

/// Arguments for the `catalog` subcommand.
#[derive(Args, Debug, Default)]
pub struct CatalogArgs {
    /// Show only this violation type.
    #[arg(long = "violation", value_name = "TYPE")]
    pub violation_type: Option<String>,
}

#[derive(Serialize)]
struct CatalogOutput<'a> {
    violation_types: Vec<&'a ViolationProfile>,
    dimensions: &'a [AppealDimension],
    appeal_types: &'a [AppealType],
}

/// Print the built-in catalog.
#[instrument(name = "cmd_catalog", skip_all)]
pub fn cmd_catalog(args: CatalogArgs, global_json: bool, locale: Locale) -> anyhow::Result<()> {
    debug!(violation = ?args.violation_type, "executing catalog command");

    let profiles: Vec<&ViolationProfile> = match args.violation_type.as_deref() {
        Some(id) => match catalog::violation_profile(id) {
            Some(profile) => vec![profile],
            None => bail!(
                "unknown violation type {id:?} (expected one of: {})",
                VIOLATION_PROFILES
                    .iter()
                    .map(|p| p.id)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        },
        None => VIOLATION_PROFILES.iter().collect(),
    };

    if global_json {
        let output = CatalogOutput {
            violation_types: profiles,
            dimensions: APPEAL_DIMENSIONS,
            appeal_types: AppealType::ALL,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for profile in &profiles {
        println!(
            "{} {} {}",
            profile.id.bold(),
            labels::display(LabelKind::Violation, profile.id, locale),
            format!("(base rate {})", render::percent(profile.base_rate)).dimmed()
        );
        println!("  {}", "Factors:".cyan());
        for factor in profile.factors {
            println!(
                "    {:<20} {:>+4.0}  {}",
                factor.id,
                factor.delta * 100.0,
                labels::display(LabelKind::Factor, factor.id, locale)
            );
        }
        println!("  {}", "Issue categories:".cyan());
        for category in profile.issue_categories() {
            println!(
                "    {} {:<20} {}",
                render::impact(category.impact),
                category.id,
                labels::display(LabelKind::Category, category.id, locale)
            );
        }
        println!();
    }

    if args.violation_type.is_none() {
        println!("{}", "Appeal dimensions".bold());
        for dimension in APPEAL_DIMENSIONS {
            let options: Vec<String> = dimension
                .options
                .iter()
                .map(|o| format!("{} ({:+.0})", o.value, o.delta * 100.0))
                .collect();
            println!("  {:<14} {}", dimension.id, options.join(", "));
        }
        println!();
        println!("{}", "Appeal types".bold());
        for t in AppealType::ALL {
            println!(
                "  {:<14} {}",
                t.as_str(),
                labels::display(LabelKind::AppealType, t.as_str(), locale)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_catalog_prints() {
        assert!(cmd_catalog(CatalogArgs::default(), false, Locale::En).is_ok());
        assert!(cmd_catalog(CatalogArgs::default(), true, Locale::Es).is_ok());
    }

    #[test]
    fn unknown_violation_type_fails() {
        let args = CatalogArgs {
            violation_type: Some("jaywalking".into()),
        };
        let err = cmd_catalog(args, false, Locale::En).unwrap_err();
        assert!(err.to_string().contains("unknown violation type"));
    }
}
