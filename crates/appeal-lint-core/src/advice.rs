//! Recommendation generation.
//!
//! Turns scorer output into short advisory lists. Rules are evaluated in
//! priority order and each list stops accepting entries at its cap, so the
//! most important advice always survives.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::{AppealType, Impact};
use crate::labels::LabelKind;
use crate::quality::QualityMetrics;
use crate::statement::DetectedIssue;

/// Entries kept in statement and quality advice lists.
pub const ADVICE_CAP: usize = 3;

/// Entries kept in prediction strength/weakness lists.
pub const PREDICTION_CAP: usize = 5;

/// Sub-score below which a quality suggestion fires.
pub const SUGGESTION_THRESHOLD: f64 = 3.5;

/// Sub-score at or above which a quality strength fires.
pub const STRENGTH_THRESHOLD: f64 = 4.0;

/// A list that silently drops entries past its cap.
#[derive(Debug, Clone)]
pub struct Capped<T> {
    cap: usize,
    items: Vec<T>,
}

impl<T> Capped<T> {
    /// Create an empty list holding at most `cap` entries.
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            items: Vec::with_capacity(cap),
        }
    }

    /// Append `item` unless the list is full. Returns whether it was kept.
    pub fn push(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Append the output of `item` when `condition` holds and there is room.
    pub fn push_if(&mut self, condition: bool, item: impl FnOnce() -> T) {
        if condition && !self.is_full() {
            self.items.push(item());
        }
    }

    /// Whether the cap has been reached.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    /// Consume the list.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Extend<T> for Capped<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            if !self.push(item) {
                break;
            }
        }
    }
}

/// Likelihood band for an appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Below 40%.
    Low,
    /// 40% up to 70%.
    Moderate,
    /// 70% and above.
    High,
}

impl Tier {
    /// Band a probability in [0, 1].
    pub fn from_probability(p: f64) -> Self {
        if p >= 0.70 {
            Self::High
        } else if p >= 0.40 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Returns the tier as a lowercase string slice.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of advice, identified by a stable rule id.
///
/// Carries ids rather than text; render with [`crate::labels::advice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Advice {
    /// A confident high-impact ground in a statement with a fair chance.
    StrongGround {
        /// Issue category id.
        category: String,
    },
    /// A confident high-impact ground in a statement that is still weak overall.
    PromisingGround {
        /// Issue category id.
        category: String,
    },
    /// Three or more grounds and a fair chance.
    SeveralGrounds,
    /// Nothing in the statement matched a category.
    NoGrounds,
    /// Only medium and low impact grounds matched.
    NoHighImpact,
    /// Exactly one ground matched.
    SingleGround,
    /// A ground matched with low confidence.
    PassingMention {
        /// Issue category id.
        category: String,
    },
    /// Statement probability of 70% or more.
    StrongBasis {
        /// Highest-confidence category id.
        lead: String,
    },
    /// Statement probability of 45% up to 70%.
    ReasonableBasis {
        /// Highest-confidence category id.
        lead: String,
    },
    /// Statement probability below 45%.
    WeakBasis,
    /// No issue detected at all.
    DescribeMore,
    /// Prediction in the high tier.
    LikelyToSucceed,
    /// Prediction in the moderate tier.
    WorthAppealing,
    /// Prediction in the low tier.
    UnlikelyToSucceed,
    /// Clarity below the suggestion threshold.
    ShortenSentences,
    /// Persuasiveness below the suggestion threshold.
    CiteEvidence,
    /// Professionalism below the threshold, with shouting detected.
    AvoidCapitals,
    /// Professionalism below the threshold.
    FormalTone,
    /// Relevance below the threshold for a comprehensive appeal.
    BroadenGrounds,
    /// Relevance below the threshold for a focused appeal.
    StayOnTopic {
        /// The appeal type the draft was scored against.
        appeal_type: AppealType,
    },
    /// Clarity at or above the strength threshold.
    ClearWriting,
    /// Persuasiveness at or above the strength threshold.
    PersuasiveEvidence,
    /// Professionalism at or above the strength threshold.
    ProfessionalTone,
    /// Relevance at or above the strength threshold.
    FocusedGrounds,
}

impl Advice {
    /// The stable rule id, as serialized in the `rule` tag.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::StrongGround { .. } => "strong_ground",
            Self::PromisingGround { .. } => "promising_ground",
            Self::SeveralGrounds => "several_grounds",
            Self::NoGrounds => "no_grounds",
            Self::NoHighImpact => "no_high_impact",
            Self::SingleGround => "single_ground",
            Self::PassingMention { .. } => "passing_mention",
            Self::StrongBasis { .. } => "strong_basis",
            Self::ReasonableBasis { .. } => "reasonable_basis",
            Self::WeakBasis => "weak_basis",
            Self::DescribeMore => "describe_more",
            Self::LikelyToSucceed => "likely_to_succeed",
            Self::WorthAppealing => "worth_appealing",
            Self::UnlikelyToSucceed => "unlikely_to_succeed",
            Self::ShortenSentences => "shorten_sentences",
            Self::CiteEvidence => "cite_evidence",
            Self::AvoidCapitals => "avoid_capitals",
            Self::FormalTone => "formal_tone",
            Self::BroadenGrounds => "broaden_grounds",
            Self::StayOnTopic { .. } => "stay_on_topic",
            Self::ClearWriting => "clear_writing",
            Self::PersuasiveEvidence => "persuasive_evidence",
            Self::ProfessionalTone => "professional_tone",
            Self::FocusedGrounds => "focused_grounds",
        }
    }

    /// The catalog id the advice text refers to, if any.
    pub fn subject(&self) -> Option<(LabelKind, &str)> {
        match self {
            Self::StrongGround { category }
            | Self::PromisingGround { category }
            | Self::PassingMention { category } => Some((LabelKind::Category, category.as_str())),
            Self::StrongBasis { lead } | Self::ReasonableBasis { lead } => {
                Some((LabelKind::Category, lead.as_str()))
            }
            Self::StayOnTopic { appeal_type } => Some((LabelKind::AppealType, appeal_type.as_str())),
            _ => None,
        }
    }
}

/// Advice for a statement analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementAdvice {
    /// What the statement already does well.
    pub strengths: Vec<Advice>,
    /// Gaps worth addressing.
    pub weaknesses: Vec<Advice>,
    /// Overall recommendation.
    pub recommendation: Advice,
}

/// Probability (percent) at which a statement stops being a weak basis.
const REASONABLE_BASIS: f64 = 45.0;

/// Probability (percent) at which a statement is a strong basis.
const STRONG_BASIS: f64 = 70.0;

/// Build advice for detected issues. `issues` must be sorted by
/// descending confidence; `probability` is the aggregate percentage.
///
/// Grounds are only called strong when the aggregate probability is out
/// of the weak band, so strengths never contradict the recommendation.
pub fn statement_advice(issues: &[DetectedIssue], probability: Option<f64>) -> StatementAdvice {
    let Some(probability) = probability else {
        return StatementAdvice {
            strengths: Vec::new(),
            weaknesses: vec![Advice::NoGrounds],
            recommendation: Advice::DescribeMore,
        };
    };
    let fair_chance = probability >= REASONABLE_BASIS;

    let mut strengths = Capped::new(ADVICE_CAP);
    for issue in issues
        .iter()
        .filter(|i| i.impact == Impact::High && i.confidence >= 60)
    {
        let category = issue.category.clone();
        strengths.push(if fair_chance {
            Advice::StrongGround { category }
        } else {
            Advice::PromisingGround { category }
        });
    }
    strengths.push_if(fair_chance && issues.len() >= 3, || Advice::SeveralGrounds);

    let mut weaknesses = Capped::new(ADVICE_CAP);
    weaknesses.push_if(!issues.iter().any(|i| i.impact == Impact::High), || {
        Advice::NoHighImpact
    });
    weaknesses.push_if(issues.len() == 1, || Advice::SingleGround);
    for issue in issues.iter().filter(|i| i.confidence < 30) {
        weaknesses.push(Advice::PassingMention {
            category: issue.category.clone(),
        });
    }

    let lead = issues.first().map(|i| i.category.clone()).unwrap_or_default();
    let recommendation = if probability >= STRONG_BASIS {
        Advice::StrongBasis { lead }
    } else if fair_chance {
        Advice::ReasonableBasis { lead }
    } else {
        Advice::WeakBasis
    };

    StatementAdvice {
        strengths: strengths.into_vec(),
        weaknesses: weaknesses.into_vec(),
        recommendation,
    }
}

/// Recommendation for a predicted tier.
pub fn prediction_recommendation(tier: Tier) -> Advice {
    match tier {
        Tier::High => Advice::LikelyToSucceed,
        Tier::Moderate => Advice::WorthAppealing,
        Tier::Low => Advice::UnlikelyToSucceed,
    }
}

/// Suggestions and strengths for quality sub-scores.
pub fn quality_advice(metrics: &QualityMetrics, appeal_type: AppealType) -> (Vec<Advice>, Vec<Advice>) {
    let mut suggestions = Capped::new(ADVICE_CAP);
    suggestions.push_if(metrics.clarity < SUGGESTION_THRESHOLD, || {
        Advice::ShortenSentences
    });
    suggestions.push_if(metrics.persuasiveness < SUGGESTION_THRESHOLD, || {
        Advice::CiteEvidence
    });
    suggestions.push_if(metrics.professionalism < SUGGESTION_THRESHOLD, || {
        if metrics.signals.shouting {
            Advice::AvoidCapitals
        } else {
            Advice::FormalTone
        }
    });
    suggestions.push_if(metrics.relevance < SUGGESTION_THRESHOLD, || {
        if appeal_type == AppealType::Comprehensive {
            Advice::BroadenGrounds
        } else {
            Advice::StayOnTopic { appeal_type }
        }
    });

    let mut strengths = Capped::new(ADVICE_CAP);
    strengths.push_if(metrics.clarity >= STRENGTH_THRESHOLD, || Advice::ClearWriting);
    strengths.push_if(metrics.persuasiveness >= STRENGTH_THRESHOLD, || {
        Advice::PersuasiveEvidence
    });
    strengths.push_if(metrics.professionalism >= STRENGTH_THRESHOLD, || {
        Advice::ProfessionalTone
    });
    strengths.push_if(metrics.relevance >= STRENGTH_THRESHOLD, || Advice::FocusedGrounds);

    (suggestions.into_vec(), strengths.into_vec())
}
