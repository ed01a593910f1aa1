//! Appeal draft quality scoring.
//!
//! Four independent heuristic sub-scores, each in [1, 5]:
//!
//! - **clarity**: a step function of average sentence length, best at
//!   15–25 words, plus up to one point for paragraph structure
//! - **persuasiveness**: `min(5, 2 + terms/5)` over rhetorical and legal
//!   vocabulary, plus a half-point appeal-type bonus
//! - **professionalism**: starts at 3; greeting, closing, a date, and the
//!   absence of slang each add half a point; shouting costs a point and
//!   more than three `!` costs half
//! - **relevance**: `3 + min(2, terms/3)` over the appeal type's
//!   vocabulary, or one point per represented ground for comprehensive
//!   appeals
//!
//! Overall = 0.25·clarity + 0.30·persuasiveness + 0.20·professionalism +
//! 0.25·relevance, rounded to one decimal.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::advice::{self, Advice};
use crate::catalog::{self, AppealType, INFORMAL_TERMS, PERSUASIVE_TERMS};
use crate::error::Diagnostic;
use crate::matcher::TermSet;
use crate::scoring::{self, Bounds, Weighted};
use crate::text;

/// Bounds of every sub-score and of the overall score.
pub const SCORE_BOUNDS: Bounds = Bounds::new(1.0, 5.0);

/// Weights of clarity, persuasiveness, professionalism, and relevance.
pub const WEIGHTS: [f64; 4] = [0.25, 0.30, 0.20, 0.25];

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(dear\s+\w+|to whom it may concern)").expect("valid regex")
});

/// A sign-off on its own line, followed by a comma or the line end.
static CLOSING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(sincerely|respectfully(\s+yours)?|yours\s+(truly|faithfully|sincerely)|((kind|best|warm)\s+)?regards)[ \t]*(,|\r?$)",
    )
    .expect("valid regex")
});

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b
        | \b\d{4}-\d{2}-\d{2}\b
        | \b(jan(uary)?|feb(ruary)?|mar(ch)?|apr(il)?|may|june?|july?|aug(ust)?
            |sep(t(ember)?)?|oct(ober)?|nov(ember)?|dec(ember)?)\.?\s+\d{1,2}(st|nd|rd|th)?\b",
    )
    .expect("valid regex")
});

static PERSUASIVE: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(PERSUASIVE_TERMS).expect("built-in term list compiles"));

static INFORMAL: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(INFORMAL_TERMS).expect("built-in term list compiles"));

/// Relevance and bonus vocabulary per appeal type.
static APPEAL_TERMS: LazyLock<HashMap<AppealType, (TermSet, TermSet)>> = LazyLock::new(|| {
    AppealType::ALL
        .iter()
        .map(|&t| {
            let relevance =
                TermSet::new(t.relevance_terms()).expect("built-in term list compiles");
            let bonus = TermSet::new(t.bonus_terms()).expect("built-in term list compiles");
            (t, (relevance, bonus))
        })
        .collect()
});

fn relevance_set(appeal_type: AppealType) -> Option<&'static TermSet> {
    APPEAL_TERMS.get(&appeal_type).map(|(relevance, _)| relevance)
}

fn bonus_set(appeal_type: AppealType) -> Option<&'static TermSet> {
    APPEAL_TERMS.get(&appeal_type).map(|(_, bonus)| bonus)
}

/// Four or more consecutive all-caps words, or one very long one.
static SHOUTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{2,}(?:[\s,;:.!?]+[A-Z]{2,}){3,}\b|\b[A-Z]{12,}\b").expect("valid regex")
});

/// Raw counts and flags the sub-scores are computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextSignals {
    /// Sentences detected.
    pub sentences: usize,
    /// Words detected.
    pub words: usize,
    /// Blank-line separated blocks.
    pub paragraphs: usize,
    /// Average words per sentence.
    pub avg_sentence_length: f64,
    /// Rhetorical and legal term matches.
    pub persuasive_terms: usize,
    /// Appeal-type term matches.
    pub relevance_terms: usize,
    /// A formal greeting is present.
    pub has_greeting: bool,
    /// A formal closing is present.
    pub has_closing: bool,
    /// A date is present.
    pub has_date: bool,
    /// Slang or emotional terms found.
    pub informal_terms: usize,
    /// A run of capitals was found.
    pub shouting: bool,
    /// Exclamation marks found.
    pub exclamations: usize,
}

/// Sub-scores, overall score, and advice for a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QualityMetrics {
    /// Sentence-length and structure score (1–5).
    pub clarity: f64,
    /// Evidence and argument vocabulary score (1–5).
    pub persuasiveness: f64,
    /// Tone and letter-format score (1–5).
    pub professionalism: f64,
    /// Focus on the chosen appeal type (1–5).
    pub relevance: f64,
    /// Weighted combination, one decimal.
    pub overall: f64,
    /// Improvements, most important first (at most 3).
    pub suggestions: Vec<Advice>,
    /// What already works (at most 3).
    pub strengths: Vec<Advice>,
    /// Inputs to the sub-scores.
    pub signals: TextSignals,
}

/// Result of scoring a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QualityReport {
    /// Appeal type the draft was scored against.
    pub appeal_type: AppealType,
    /// Scores, or `None` when the draft is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<QualityMetrics>,
    /// Fallbacks applied while resolving ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Score an appeal draft.
///
/// Unknown appeal types fall back to [`AppealType::DEFAULT`] and record a
/// [`Diagnostic`]. Empty or whitespace-only drafts produce no metrics.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn score_quality(text: &str, appeal_type_id: &str) -> QualityReport {
    let (appeal_type, diagnostic) = catalog::resolve_appeal_type(appeal_type_id);
    if let Some(ref d) = diagnostic {
        tracing::warn!(diagnostic = %d, "falling back to default appeal type");
    }
    let diagnostics = diagnostic.into_iter().collect();

    if text.trim().is_empty() {
        return QualityReport {
            appeal_type,
            metrics: None,
            diagnostics,
        };
    }

    let signals = collect_signals(text, appeal_type);
    let clarity = round2(clarity_score(&signals));
    let persuasiveness = round2(persuasiveness_score(text, &signals, appeal_type));
    let professionalism = round2(professionalism_score(&signals));
    let relevance = round2(relevance_score(text, &signals, appeal_type));
    let overall = overall_score(clarity, persuasiveness, professionalism, relevance);

    tracing::debug!(
        clarity,
        persuasiveness,
        professionalism,
        relevance,
        overall,
        "draft scored"
    );

    let mut metrics = QualityMetrics {
        clarity,
        persuasiveness,
        professionalism,
        relevance,
        overall,
        suggestions: Vec::new(),
        strengths: Vec::new(),
        signals,
    };
    let (suggestions, strengths) = advice::quality_advice(&metrics, appeal_type);
    metrics.suggestions = suggestions;
    metrics.strengths = strengths;

    QualityReport {
        appeal_type,
        metrics: Some(metrics),
        diagnostics,
    }
}

/// Combine four sub-scores with [`WEIGHTS`], rounded to one decimal.
pub fn overall_score(clarity: f64, persuasiveness: f64, professionalism: f64, relevance: f64) -> f64 {
    let terms = [clarity, persuasiveness, professionalism, relevance]
        .into_iter()
        .zip(WEIGHTS)
        .map(|(v, w)| Weighted::new(v, w));
    scoring::round1(scoring::combine(0.0, terms, SCORE_BOUNDS))
}

fn collect_signals(text: &str, appeal_type: AppealType) -> TextSignals {
    let sentences = text::split_sentences(text);
    TextSignals {
        sentences: sentences.len(),
        words: text::extract_words(text).len(),
        paragraphs: text::split_paragraphs(text).len(),
        avg_sentence_length: scoring::round1(text::average_sentence_length(&sentences)),
        persuasive_terms: PERSUASIVE.count(text),
        relevance_terms: relevance_set(appeal_type).map_or(0, |t| t.count(text)),
        has_greeting: GREETING.is_match(text),
        has_closing: CLOSING.is_match(text),
        has_date: DATE.is_match(text),
        informal_terms: INFORMAL.count(text),
        shouting: SHOUTING.is_match(text),
        exclamations: text.matches('!').count(),
    }
}

fn clarity_score(signals: &TextSignals) -> f64 {
    let avg = signals.avg_sentence_length;
    let step = if signals.sentences == 0 {
        1.0
    } else if avg < 8.0 {
        2.5
    } else if avg < 15.0 {
        3.5
    } else if avg <= 25.0 {
        4.5
    } else if avg <= 35.0 {
        3.0
    } else {
        2.0
    };
    let structure = if signals.paragraphs > 1 {
        (0.25 * signals.paragraphs as f64).min(1.0)
    } else {
        0.0
    };
    SCORE_BOUNDS.clamp(step + structure)
}

fn persuasiveness_score(text: &str, signals: &TextSignals, appeal_type: AppealType) -> f64 {
    let base = (2.0 + signals.persuasive_terms as f64 / 5.0).min(5.0);
    let bonus = if bonus_set(appeal_type).is_some_and(|t| t.all(text)) {
        0.5
    } else {
        0.0
    };
    SCORE_BOUNDS.clamp(base + bonus)
}

fn professionalism_score(signals: &TextSignals) -> f64 {
    let bonuses = [
        signals.has_greeting,
        signals.has_closing,
        signals.informal_terms == 0,
        signals.has_date,
    ]
    .into_iter()
    .filter(|&b| b)
    .count() as f64
        * 0.5;
    let shouting = if signals.shouting { 1.0 } else { 0.0 };
    let exclamations = if signals.exclamations > 3 { 0.5 } else { 0.0 };
    SCORE_BOUNDS.clamp(3.0 + bonuses - shouting - exclamations)
}

fn relevance_score(text: &str, signals: &TextSignals, appeal_type: AppealType) -> f64 {
    let bonus = if appeal_type == AppealType::Comprehensive {
        let represented = AppealType::ALL
            .iter()
            .filter(|t| **t != AppealType::Comprehensive)
            .filter(|t| relevance_set(**t).is_some_and(|set| set.any(text)))
            .count();
        (represented as f64).min(2.0)
    } else {
        (signals.relevance_terms as f64 / 3.0).min(2.0)
    };
    SCORE_BOUNDS.clamp(3.0 + bonus)
}

fn round2(v: f64) -> f64 {
    scoring::round_to(v, 2)
}
