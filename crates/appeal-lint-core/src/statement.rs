//! Statement analysis: issue detection with confidence scoring.
//!
//! Each matched issue category gets a 0–100 confidence from its match
//! count and impact class:
//!
//! `confidence = min(100, round(count × factor × 20))`, factor 1.5 / 1.0 / 0.5
//!
//! The aggregate success probability starts at 25% and adds each issue's
//! impact weight (15 / 10 / 5 points) scaled by its confidence, capped at
//! 95%. With no matched issues there is no aggregate at all.

use std::collections::HashMap;
use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::advice::{self, Advice};
use crate::catalog::{self, Impact, VIOLATION_PROFILES};
use crate::error::Diagnostic;
use crate::matcher::{MatchOptions, PatternMatcher, Snippet};
use crate::scoring::{self, Bounds, Weighted};

/// Starting point of the aggregate probability, in percent.
pub const BASE_PROBABILITY: f64 = 25.0;

/// Bounds of the aggregate probability, in percent.
pub const PROBABILITY_BOUNDS: Bounds = Bounds::new(0.0, 95.0);

/// Bounds of a per-issue confidence.
pub const CONFIDENCE_BOUNDS: Bounds = Bounds::new(0.0, 100.0);

/// One compiled matcher per built-in violation profile.
static MATCHERS: LazyLock<HashMap<&'static str, PatternMatcher>> = LazyLock::new(|| {
    VIOLATION_PROFILES
        .iter()
        .map(|p| {
            let matcher =
                PatternMatcher::new(&p.issue_categories()).expect("built-in catalog compiles");
            (p.id, matcher)
        })
        .collect()
});

/// An issue category found in the statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetectedIssue {
    /// Issue category id.
    pub category: String,
    /// Impact class of the category.
    pub impact: Impact,
    /// Category description.
    pub description: String,
    /// Total keyword matches.
    pub match_count: usize,
    /// Confidence, 0–100.
    pub confidence: u8,
    /// Up to three context windows.
    pub snippets: Vec<Snippet>,
}

/// Result of analyzing a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatementReport {
    /// Violation type the statement was scanned against.
    pub violation_type: String,
    /// Detected issues, highest confidence first.
    pub issues: Vec<DetectedIssue>,
    /// Aggregate success probability in percent (0–95). Absent when no
    /// issue was detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// What the statement already does well.
    pub strengths: Vec<Advice>,
    /// Gaps worth addressing.
    pub weaknesses: Vec<Advice>,
    /// Overall recommendation.
    pub recommendation: Advice,
    /// Fallbacks applied while resolving ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Confidence for `match_count` matches of a category with `impact`.
pub fn confidence(match_count: usize, impact: Impact) -> u8 {
    let raw = scoring::combine(
        0.0,
        [Weighted::new(match_count as f64, impact.confidence_factor() * 20.0)],
        CONFIDENCE_BOUNDS,
    );
    raw.round() as u8
}

/// Aggregate probability over detected issues, or `None` if there are none.
pub fn aggregate_probability(issues: &[DetectedIssue]) -> Option<f64> {
    if issues.is_empty() {
        return None;
    }
    let terms = issues.iter().map(|i| {
        Weighted::new(
            f64::from(i.confidence) / 100.0,
            i.impact.probability_weight(),
        )
    });
    Some(scoring::round1(scoring::combine(
        BASE_PROBABILITY,
        terms,
        PROBABILITY_BOUNDS,
    )))
}

/// Analyze a statement with default snippet settings.
pub fn analyze_statement(text: &str, violation_type_id: &str) -> StatementReport {
    analyze_statement_with(text, violation_type_id, &MatchOptions::default())
}

/// Analyze a statement against the issue categories of a violation type.
///
/// Unknown violation types fall back to the general catalog and record a
/// [`Diagnostic`].
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn analyze_statement_with(
    text: &str,
    violation_type_id: &str,
    options: &MatchOptions,
) -> StatementReport {
    let (profile, diagnostic) = catalog::resolve_violation(violation_type_id);
    if let Some(ref d) = diagnostic {
        tracing::warn!(diagnostic = %d, "falling back to default violation type");
    }

    let found = MATCHERS
        .get(profile.id)
        .map(|m| m.find(text, options))
        .unwrap_or_default();

    let mut issues: Vec<DetectedIssue> = profile
        .issue_categories()
        .iter()
        .filter_map(|category| {
            let m = found.get(category.id)?;
            Some(DetectedIssue {
                category: category.id.to_string(),
                impact: category.impact,
                description: category.description.to_string(),
                match_count: m.count,
                confidence: confidence(m.count, category.impact),
                snippets: m.snippets.clone(),
            })
        })
        .collect();
    // Stable: equal confidences keep catalog order.
    issues.sort_by(|a, b| b.confidence.cmp(&a.confidence));

    let probability = aggregate_probability(&issues);
    tracing::debug!(
        violation_type = profile.id,
        issues = issues.len(),
        probability = ?probability,
        "statement analyzed"
    );

    let advice = advice::statement_advice(&issues, probability);

    StatementReport {
        violation_type: profile.id.to_string(),
        issues,
        probability,
        strengths: advice.strengths,
        weaknesses: advice.weaknesses,
        recommendation: advice.recommendation,
        diagnostics: diagnostic.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_ground_in_weak_statement_is_not_called_strong() {
        let report = analyze_statement("The sign was hidden, no sign, faded sign.", "parking");
        assert_eq!(report.recommendation, Advice::WeakBasis);
        assert_eq!(
            report.strengths,
            vec![Advice::PromisingGround {
                category: "unclear_signage".into()
            }]
        );
    }

    #[test]
    fn confidence_formula() {
        assert_eq!(confidence(1, Impact::High), 30);
        assert_eq!(confidence(1, Impact::Medium), 20);
        assert_eq!(confidence(1, Impact::Low), 10);
        assert_eq!(confidence(3, Impact::High), 90);
        assert_eq!(confidence(4, Impact::High), 100);
        assert_eq!(confidence(50, Impact::Low), 100);
        assert_eq!(confidence(0, Impact::High), 0);
    }

    #[test]
    fn estimate_scenario() {
        let report = analyze_statement(
            "The officer estimated the vehicle was going approximately 45 mph",
            "speeding",
        );
        let issue = report
            .issues
            .iter()
            .find(|i| i.category == "speed_estimate")
            .expect("speed estimate detected");
        assert!(issue.confidence > 0);
        assert_eq!(issue.match_count, 2);
        for term in ["estimated", "approximately"] {
            assert!(
                issue.snippets.iter().any(|s| s.text.contains(term)),
                "no snippet for {term}"
            );
        }
        // 25 + 15 * 0.6
        assert_eq!(report.probability, Some(34.0));
    }

    #[test]
    fn issues_sorted_by_confidence() {
        let report = analyze_statement(
            "I was loading a delivery. The sign was faded, the sign was hidden, \
             and there was no sign at the corner.",
            "parking",
        );
        let confidences: Vec<_> = report.issues.iter().map(|i| i.confidence).collect();
        let mut sorted = confidences.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(confidences, sorted);
        assert_eq!(report.issues[0].category, "unclear_signage");
    }

    #[test]
    fn no_matches_means_no_probability() {
        let report = analyze_statement("I drove to work on Tuesday.", "parking");
        assert!(report.issues.is_empty());
        assert!(report.probability.is_none());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn empty_input_is_neutral() {
        let report = analyze_statement("   ", "parking");
        assert!(report.issues.is_empty());
        assert!(report.probability.is_none());
    }

    #[test]
    fn unknown_violation_type_falls_back() {
        let report = analyze_statement("It was a medical emergency.", "jaywalking");
        assert_eq!(report.violation_type, "general");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.issues[0].category, "emergency");
    }

    #[test]
    fn aggregate_is_capped() {
        let text = "sign sign sign sign meter meter meter meter broken out of order \
                    incorrect incorrect incorrect incorrect not my car stolen stolen stolen \
                    emergency hospital ambulance medical permit permit paid displayed receipt";
        let report = analyze_statement(text, "parking");
        let p = report.probability.unwrap();
        assert!((0.0..=95.0).contains(&p));
        assert!((p - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn custom_options_limit_snippets() {
        let options = MatchOptions {
            snippet_radius: 5,
            max_snippets: 1,
        };
        let report = analyze_statement_with("sign, sign, sign", "parking", &options);
        assert_eq!(report.issues[0].match_count, 3);
        assert_eq!(report.issues[0].snippets.len(), 1);
    }
}
