//! Multi-factor success prediction.
//!
//! An additive linear model: the violation profile's base rate plus the
//! delta of every selected factor plus one option delta per appeal
//! dimension, clamped to [0.05, 0.95]. The clamp keeps the model from ever
//! claiming certainty in either direction.

use std::collections::{BTreeMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::advice::{self, Advice, Capped, PREDICTION_CAP, Tier};
use crate::catalog::{self, APPEAL_DIMENSIONS, DimensionOption, Factor};
use crate::error::Diagnostic;
use crate::scoring::{self, Bounds, Weighted};

/// Bounds of a predicted probability.
pub const PROBABILITY_BOUNDS: Bounds = Bounds::new(0.05, 0.95);

/// Where a prediction note came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoteSource {
    /// A selected violation factor.
    Factor,
    /// A selected appeal dimension option.
    Option,
    /// A helpful factor the caller did not select.
    MissedFactor,
}

/// One entry in a strengths or weaknesses list.
///
/// Carries ids rather than text; render with [`crate::labels`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictionNote {
    /// Kind of entry.
    pub source: NoteSource,
    /// Factor id, or option value for [`NoteSource::Option`].
    pub id: String,
    /// Dimension id for [`NoteSource::Option`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
    /// The delta this entry contributes (or would contribute).
    pub delta: f64,
}

impl PredictionNote {
    fn factor(factor: &Factor, source: NoteSource) -> Self {
        Self {
            source,
            id: factor.id.to_string(),
            dimension: None,
            delta: factor.delta,
        }
    }

    fn option(dimension: &str, option: &DimensionOption) -> Self {
        Self {
            source: NoteSource::Option,
            id: option.value.to_string(),
            dimension: Some(dimension.to_string()),
            delta: option.delta,
        }
    }
}

/// Result of a success prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictionReport {
    /// Violation type the prediction used.
    pub violation_type: String,
    /// Base rate of that violation type.
    pub base_rate: f64,
    /// Predicted success probability in [0.05, 0.95].
    pub probability: f64,
    /// Likelihood band.
    pub tier: Tier,
    /// Selected entries that raise the probability, strongest first (at most 5).
    pub strengths: Vec<PredictionNote>,
    /// Selected entries that lower it, then helpful factors not selected (at most 5).
    pub weaknesses: Vec<PredictionNote>,
    /// The option used for every dimension, defaults included.
    pub selections: BTreeMap<String, String>,
    /// Recommendation for the tier.
    pub recommendation: Advice,
    /// Fallbacks applied while resolving ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Predict appeal success from selected factors and dimension options.
///
/// Unknown factor and dimension ids are ignored, unknown option values
/// fall back to the dimension's zero-delta default, and an unknown
/// violation type falls back to the general profile. Each fallback is
/// recorded as a [`Diagnostic`]. Repeated factor ids count once; for a
/// repeated dimension the last selection wins.
#[tracing::instrument(skip_all, fields(violation_type = violation_type_id))]
pub fn predict_success<F, D, K, V>(
    violation_type_id: &str,
    selected_factors: F,
    dimension_selections: D,
) -> PredictionReport
where
    F: IntoIterator,
    F::Item: AsRef<str>,
    D: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let (profile, fallback) = catalog::resolve_violation(violation_type_id);
    let mut diagnostics: Vec<Diagnostic> = fallback.into_iter().collect();

    let mut selected_ids = HashSet::new();
    for id in selected_factors {
        let id = catalog::normalize_id(id.as_ref());
        if profile.factor(&id).is_some() {
            selected_ids.insert(id);
        } else {
            diagnostics.push(Diagnostic::UnknownFactor {
                requested: id,
                violation_type: profile.id.to_string(),
            });
        }
    }
    // Catalog order keeps the output independent of selection order.
    let selected: Vec<&Factor> = profile
        .factors
        .iter()
        .filter(|f| selected_ids.contains(f.id))
        .collect();

    let mut chosen: BTreeMap<&'static str, &'static DimensionOption> = APPEAL_DIMENSIONS
        .iter()
        .map(|d| (d.id, d.default_option()))
        .collect();
    for (dimension_id, value) in dimension_selections {
        let Some(dimension) = catalog::appeal_dimension(dimension_id.as_ref()) else {
            diagnostics.push(Diagnostic::UnknownDimension {
                requested: dimension_id.as_ref().to_string(),
            });
            continue;
        };
        let option = dimension
            .option(&catalog::normalize_id(value.as_ref()))
            .unwrap_or_else(|| {
                diagnostics.push(Diagnostic::UnknownOption {
                    dimension: dimension.id.to_string(),
                    requested: value.as_ref().to_string(),
                    fallback: dimension.default.to_string(),
                });
                dimension.default_option()
            });
        chosen.insert(dimension.id, option);
    }

    for d in &diagnostics {
        tracing::warn!(diagnostic = %d, "prediction input defaulted");
    }

    let terms = selected
        .iter()
        .map(|f| Weighted::unit(f.delta))
        .chain(chosen.values().map(|o| Weighted::unit(o.delta)));
    let probability = scoring::round_to(
        scoring::combine(profile.base_rate, terms, PROBABILITY_BOUNDS),
        4,
    );
    let tier = Tier::from_probability(probability);

    let (strengths, weaknesses) = partition_notes(&selected, &chosen, profile.factors);

    tracing::debug!(
        base_rate = profile.base_rate,
        factors = selected.len(),
        probability,
        tier = tier.as_str(),
        "prediction computed"
    );

    PredictionReport {
        violation_type: profile.id.to_string(),
        base_rate: profile.base_rate,
        probability,
        tier,
        strengths,
        weaknesses,
        selections: chosen
            .iter()
            .map(|(d, o)| ((*d).to_string(), o.value.to_string()))
            .collect(),
        recommendation: advice::prediction_recommendation(tier),
        diagnostics,
    }
}

/// Split selections by sign of delta and add missed opportunities.
fn partition_notes(
    selected: &[&Factor],
    chosen: &BTreeMap<&'static str, &'static DimensionOption>,
    all_factors: &[Factor],
) -> (Vec<PredictionNote>, Vec<PredictionNote>) {
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for factor in selected {
        let note = PredictionNote::factor(factor, NoteSource::Factor);
        if factor.delta > 0.0 {
            positive.push(note);
        } else if factor.delta < 0.0 {
            negative.push(note);
        }
    }
    for (dimension, option) in chosen {
        let note = PredictionNote::option(dimension, option);
        if option.delta > 0.0 {
            positive.push(note);
        } else if option.delta < 0.0 {
            negative.push(note);
        }
    }

    positive.sort_by(|a, b| b.delta.total_cmp(&a.delta));
    negative.sort_by(|a, b| a.delta.total_cmp(&b.delta));

    let mut missed: Vec<PredictionNote> = all_factors
        .iter()
        .filter(|f| f.delta > 0.0 && !selected.iter().any(|s| s.id == f.id))
        .map(|f| PredictionNote::factor(f, NoteSource::MissedFactor))
        .collect();
    missed.sort_by(|a, b| b.delta.total_cmp(&a.delta));

    let mut strengths = Capped::new(PREDICTION_CAP);
    strengths.extend(positive);
    let mut weaknesses = Capped::new(PREDICTION_CAP);
    weaknesses.extend(negative.into_iter().chain(missed));

    (strengths.into_vec(), weaknesses.into_vec())
}
