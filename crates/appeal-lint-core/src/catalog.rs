//! Static keyword and weight catalogs.
//!
//! Everything the matcher and scorers know about the domain lives here as
//! declarative tables keyed by stable ids. Display text is deliberately
//! absent; see [`crate::labels`] for the human-readable side.
//!
//! The tables are illustrative. They encode common grounds for contesting
//! parking, speeding, and red-light citations, not any real jurisdiction's
//! rules.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Diagnostic;

/// Violation type used when the caller's id is unknown.
pub const DEFAULT_VIOLATION_TYPE: &str = "general";

/// How strongly a detected issue category bears on an appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Grounds that routinely decide an appeal on their own.
    High,
    /// Grounds that help but rarely decide an appeal alone.
    Medium,
    /// Mitigating context.
    Low,
}

impl Impact {
    /// Multiplier applied to match counts when computing confidence.
    pub const fn confidence_factor(self) -> f64 {
        match self {
            Self::High => 1.5,
            Self::Medium => 1.0,
            Self::Low => 0.5,
        }
    }

    /// Percentage points a fully confident match adds to the aggregate probability.
    pub const fn probability_weight(self) -> f64 {
        match self {
            Self::High => 15.0,
            Self::Medium => 10.0,
            Self::Low => 5.0,
        }
    }

    /// Returns the impact class as a lowercase string slice.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named class of statement weakness detected by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IssueCategory {
    /// Stable id.
    pub id: &'static str,
    /// Words and phrases matched whole-word, case-insensitively.
    pub keywords: &'static [&'static str],
    /// Impact class.
    pub impact: Impact,
    /// Developer-facing description of what the category captures.
    pub description: &'static str,
}

/// A situational fact carrying a fixed probability delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Factor {
    /// Stable id, unique within its profile.
    pub id: &'static str,
    /// Signed change to the success probability.
    pub delta: f64,
}

/// Base rate, factors, and issue categories for one violation type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViolationProfile {
    /// Stable id.
    pub id: &'static str,
    /// Historical success rate for appeals of this type (0–1).
    pub base_rate: f64,
    /// Factors the caller may select.
    pub factors: &'static [Factor],
    /// Issue categories specific to this type. The general set is
    /// scanned in addition; see [`ViolationProfile::issue_categories`].
    pub categories: &'static [IssueCategory],
}

impl ViolationProfile {
    /// Look up a factor by id.
    pub fn factor(&self, id: &str) -> Option<&'static Factor> {
        self.factors.iter().find(|f| f.id == id)
    }

    /// All issue categories scanned for this type: its own, then the
    /// general set (unless this is the general profile).
    pub fn issue_categories(&self) -> Vec<IssueCategory> {
        let mut all = self.categories.to_vec();
        if self.id != DEFAULT_VIOLATION_TYPE {
            all.extend_from_slice(GENERAL_CATEGORIES);
        }
        all
    }
}

/// One selectable value of an appeal dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionOption {
    /// Stable value, unique within its dimension.
    pub value: &'static str,
    /// Signed change to the success probability.
    pub delta: f64,
}

/// An ordinal, user-selected qualitative input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppealDimension {
    /// Stable id.
    pub id: &'static str,
    /// Available options.
    pub options: &'static [DimensionOption],
    /// Value of the zero-delta option used when nothing is selected.
    pub default: &'static str,
}

impl AppealDimension {
    /// Look up an option by value.
    pub fn option(&self, value: &str) -> Option<&'static DimensionOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// The zero-delta default option.
    pub fn default_option(&self) -> &'static DimensionOption {
        self.options
            .iter()
            .find(|o| o.value == self.default)
            .unwrap_or(&NEUTRAL_OPTION)
    }
}

static NEUTRAL_OPTION: DimensionOption = DimensionOption {
    value: "not_stated",
    delta: 0.0,
};

/// The kind of argument an appeal draft is making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppealType {
    /// The citation was issued or served improperly.
    Procedural,
    /// The facts alleged are wrong.
    Factual,
    /// The cited rule does not apply or was misapplied.
    Legal,
    /// A mix of the above.
    Comprehensive,
}

impl AppealType {
    /// Every appeal type, in catalog order.
    pub const ALL: &'static [Self] = &[
        Self::Procedural,
        Self::Factual,
        Self::Legal,
        Self::Comprehensive,
    ];

    /// Used when the caller's id is unknown.
    pub const DEFAULT: Self = Self::Comprehensive;

    /// Returns the appeal type id.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Procedural => "procedural",
            Self::Factual => "factual",
            Self::Legal => "legal",
            Self::Comprehensive => "comprehensive",
        }
    }

    /// Parse an id, case-insensitively.
    pub fn lookup(id: &str) -> Option<Self> {
        let id = normalize_id(id);
        Self::ALL.iter().copied().find(|t| t.as_str() == id)
    }

    /// Terms that make a draft relevant to this appeal type.
    ///
    /// Empty for [`AppealType::Comprehensive`], which scores relevance by
    /// how many of the other types' term sets it touches.
    pub const fn relevance_terms(self) -> &'static [&'static str] {
        match self {
            Self::Procedural => PROCEDURAL_TERMS,
            Self::Factual => FACTUAL_TERMS,
            Self::Legal => LEGAL_TERMS,
            Self::Comprehensive => &[],
        }
    }

    /// Terms that must all appear for the persuasiveness bonus.
    pub const fn bonus_terms(self) -> &'static [&'static str] {
        match self {
            Self::Procedural => &["notice", "deadline"],
            Self::Factual => &["photograph", "time"],
            Self::Legal => &["code", "section"],
            Self::Comprehensive => &[],
        }
    }
}

impl std::fmt::Display for AppealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// -- Issue categories -------------------------------------------------------

/// Categories scanned for every violation type.
pub static GENERAL_CATEGORIES: &[IssueCategory] = &[
    IssueCategory {
        id: "procedural_error",
        keywords: &[
            "incorrect",
            "wrong date",
            "wrong address",
            "wrong street",
            "misspelled",
            "missing information",
            "not signed",
            "no signature",
            "illegible",
            "incomplete",
        ],
        impact: Impact::High,
        description: "The citation itself contains a clerical or procedural defect.",
    },
    IssueCategory {
        id: "vehicle_identity",
        keywords: &[
            "not my car",
            "not my vehicle",
            "stolen",
            "sold the car",
            "wrong plate",
            "cloned plate",
            "different vehicle",
        ],
        impact: Impact::High,
        description: "The cited vehicle is not the appellant's.",
    },
    IssueCategory {
        id: "officer_uncertainty",
        keywords: &[
            "appeared to",
            "believed",
            "unsure",
            "might have",
            "unclear",
            "did not see",
            "could not confirm",
        ],
        impact: Impact::Medium,
        description: "The issuing officer's account is hedged or unverified.",
    },
    IssueCategory {
        id: "emergency",
        keywords: &[
            "emergency",
            "hospital",
            "ambulance",
            "medical",
            "urgent care",
            "went into labor",
        ],
        impact: Impact::Medium,
        description: "A genuine emergency explains the conduct.",
    },
];

static PARKING_CATEGORIES: &[IssueCategory] = &[
    IssueCategory {
        id: "unclear_signage",
        keywords: &[
            "sign",
            "signs",
            "signage",
            "obscured",
            "hidden",
            "faded",
            "covered",
            "unreadable",
            "confusing",
        ],
        impact: Impact::High,
        description: "Restrictions were not clearly posted.",
    },
    IssueCategory {
        id: "meter_fault",
        keywords: &[
            "meter",
            "out of order",
            "malfunction",
            "malfunctioning",
            "not working",
            "jammed",
            "app error",
        ],
        impact: Impact::High,
        description: "Payment equipment failed.",
    },
    IssueCategory {
        id: "valid_permit",
        keywords: &[
            "permit",
            "placard",
            "disabled badge",
            "displayed",
            "paid",
            "receipt",
        ],
        impact: Impact::Medium,
        description: "The vehicle was authorised to park.",
    },
    IssueCategory {
        id: "loading_activity",
        keywords: &["loading", "unloading", "delivery", "dropping off", "picking up"],
        impact: Impact::Low,
        description: "The stop was a brief, permitted loading activity.",
    },
    IssueCategory {
        id: "time_dispute",
        keywords: &["grace period", "few minutes", "just arrived", "returned", "minutes"],
        impact: Impact::Low,
        description: "The overstay was trivial or disputed.",
    },
];

static SPEEDING_CATEGORIES: &[IssueCategory] = &[
    IssueCategory {
        id: "speed_estimate",
        keywords: &[
            "estimated",
            "approximately",
            "roughly",
            "visual estimate",
            "paced",
            "guessed",
        ],
        impact: Impact::High,
        description: "The recorded speed rests on an estimate rather than a measurement.",
    },
    IssueCategory {
        id: "equipment_calibration",
        keywords: &[
            "radar",
            "laser",
            "lidar",
            "calibration",
            "calibrated",
            "speed gun",
        ],
        impact: Impact::High,
        description: "Measurement equipment may not have been calibrated.",
    },
    IssueCategory {
        id: "speed_limit_signage",
        keywords: &[
            "speed limit sign",
            "no speed sign",
            "limit changed",
            "construction zone",
            "temporary limit",
        ],
        impact: Impact::Medium,
        description: "The applicable limit was not clearly posted.",
    },
    IssueCategory {
        id: "traffic_flow",
        keywords: &["flow of traffic", "other cars", "keeping up", "overtaking"],
        impact: Impact::Low,
        description: "The driver was moving with surrounding traffic.",
    },
];

static RED_LIGHT_CATEGORIES: &[IssueCategory] = &[
    IssueCategory {
        id: "signal_timing",
        keywords: &[
            "yellow",
            "amber",
            "short yellow",
            "light changed",
            "timing",
            "already in the intersection",
        ],
        impact: Impact::High,
        description: "The signal phase was too short or already committed to.",
    },
    IssueCategory {
        id: "yield_to_authority",
        keywords: &[
            "emergency vehicle",
            "fire truck",
            "police direction",
            "waved through",
            "yield",
        ],
        impact: Impact::High,
        description: "The driver moved to make way or on instruction.",
    },
    IssueCategory {
        id: "camera_evidence",
        keywords: &["camera", "photo", "photograph", "video", "footage", "blurry"],
        impact: Impact::Medium,
        description: "Automated evidence is missing or unclear.",
    },
    IssueCategory {
        id: "obstructed_view",
        keywords: &["obstructed", "blocked view", "glare", "sun", "truck in front"],
        impact: Impact::Medium,
        description: "The signal could not be seen.",
    },
];

// -- Violation profiles -----------------------------------------------------

/// Every violation profile, in catalog order.
pub static VIOLATION_PROFILES: &[ViolationProfile] = &[
    ViolationProfile {
        id: "parking",
        base_rate: 0.65,
        factors: &[
            Factor { id: "signage", delta: 0.25 },
            Factor { id: "meter_broken", delta: 0.20 },
            Factor { id: "permit_displayed", delta: 0.30 },
            Factor { id: "loading_zone", delta: 0.10 },
            Factor { id: "emergency", delta: 0.15 },
            Factor { id: "prior_tickets", delta: -0.15 },
            Factor { id: "blocking_hydrant", delta: -0.20 },
            Factor { id: "expired_meter", delta: -0.10 },
        ],
        categories: PARKING_CATEGORIES,
    },
    ViolationProfile {
        id: "speeding",
        base_rate: 0.35,
        factors: &[
            Factor { id: "radar_uncalibrated", delta: 0.30 },
            Factor { id: "estimate_only", delta: 0.20 },
            Factor { id: "sign_missing", delta: 0.15 },
            Factor { id: "dashcam_footage", delta: 0.15 },
            Factor { id: "medical_emergency", delta: 0.15 },
            Factor { id: "school_zone", delta: -0.20 },
            Factor { id: "excessive_speed", delta: -0.20 },
        ],
        categories: SPEEDING_CATEGORIES,
    },
    ViolationProfile {
        id: "red_light",
        base_rate: 0.30,
        factors: &[
            Factor { id: "yellow_too_short", delta: 0.25 },
            Factor { id: "camera_unclear", delta: 0.20 },
            Factor { id: "yielding_emergency", delta: 0.30 },
            Factor { id: "wrong_vehicle", delta: 0.30 },
            Factor { id: "pedestrian_present", delta: -0.20 },
            Factor { id: "repeat_offense", delta: -0.10 },
        ],
        categories: RED_LIGHT_CATEGORIES,
    },
    ViolationProfile {
        id: DEFAULT_VIOLATION_TYPE,
        base_rate: 0.45,
        factors: &[
            Factor { id: "procedural_error", delta: 0.25 },
            Factor { id: "wrong_vehicle", delta: 0.30 },
            Factor { id: "emergency", delta: 0.15 },
            Factor { id: "prior_violations", delta: -0.15 },
            Factor { id: "admitted_fault", delta: -0.20 },
        ],
        categories: GENERAL_CATEGORIES,
    },
];

/// Every appeal dimension, in catalog order.
pub static APPEAL_DIMENSIONS: &[AppealDimension] = &[
    AppealDimension {
        id: "evidence",
        options: &[
            DimensionOption { value: "strong", delta: 0.15 },
            DimensionOption { value: "moderate", delta: 0.05 },
            DimensionOption { value: "none", delta: 0.0 },
            DimensionOption { value: "weak", delta: -0.10 },
        ],
        default: "none",
    },
    AppealDimension {
        id: "timeliness",
        options: &[
            DimensionOption { value: "early", delta: 0.05 },
            DimensionOption { value: "on_time", delta: 0.0 },
            DimensionOption { value: "late", delta: -0.20 },
        ],
        default: "on_time",
    },
    AppealDimension {
        id: "prior_record",
        options: &[
            DimensionOption { value: "clean", delta: 0.05 },
            DimensionOption { value: "not_stated", delta: 0.0 },
            DimensionOption { value: "minor", delta: -0.05 },
            DimensionOption { value: "extensive", delta: -0.15 },
        ],
        default: "not_stated",
    },
    AppealDimension {
        id: "witnesses",
        options: &[
            DimensionOption { value: "independent", delta: 0.10 },
            DimensionOption { value: "passenger", delta: 0.03 },
            DimensionOption { value: "none", delta: 0.0 },
        ],
        default: "none",
    },
];

// -- Quality term lists -----------------------------------------------------

/// Rhetorical and legal vocabulary counted by the persuasiveness score.
pub static PERSUASIVE_TERMS: &[&str] = &[
    "therefore",
    "because",
    "evidence",
    "clearly",
    "demonstrate",
    "demonstrates",
    "documented",
    "respectfully",
    "request",
    "pursuant",
    "regulation",
    "statute",
    "ordinance",
    "accordingly",
    "furthermore",
    "consequently",
    "fact",
    "shows",
    "proof",
    "photograph",
    "witness",
    "receipt",
    "dismiss",
    "dismissal",
];

/// Slang and emotional terms that cost professionalism.
pub static INFORMAL_TERMS: &[&str] = &[
    "gonna",
    "wanna",
    "kinda",
    "lol",
    "dude",
    "yeah",
    "stupid",
    "ridiculous",
    "crap",
    "scam",
    "joke",
    "whatever",
];

static PROCEDURAL_TERMS: &[&str] = &[
    "notice",
    "procedure",
    "served",
    "deadline",
    "process",
    "officer",
    "citation",
    "issued",
    "hearing",
    "timely",
];

static FACTUAL_TERMS: &[&str] = &[
    "photo",
    "photograph",
    "witness",
    "receipt",
    "evidence",
    "sign",
    "meter",
    "time",
    "location",
    "permit",
];

static LEGAL_TERMS: &[&str] = &[
    "code",
    "section",
    "statute",
    "ordinance",
    "regulation",
    "law",
    "violation",
    "pursuant",
    "subsection",
    "municipal",
];

// -- Lookups ----------------------------------------------------------------

/// Trim and lowercase an id, accepting `-` for `_`.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_ascii_lowercase().replace('-', "_")
}

/// Look up a violation profile by id.
pub fn violation_profile(id: &str) -> Option<&'static ViolationProfile> {
    let id = normalize_id(id);
    VIOLATION_PROFILES.iter().find(|p| p.id == id)
}

/// Look up a violation profile, falling back to the general profile.
pub fn resolve_violation(id: &str) -> (&'static ViolationProfile, Option<Diagnostic>) {
    if let Some(profile) = violation_profile(id) {
        return (profile, None);
    }
    let fallback = general_profile();
    let diagnostic = Diagnostic::UnknownViolationType {
        requested: id.to_string(),
        fallback: fallback.id.to_string(),
    };
    (fallback, Some(diagnostic))
}

/// Look up an appeal type, falling back to [`AppealType::DEFAULT`].
pub fn resolve_appeal_type(id: &str) -> (AppealType, Option<Diagnostic>) {
    AppealType::lookup(id).map_or_else(
        || {
            let diagnostic = Diagnostic::UnknownAppealType {
                requested: id.to_string(),
                fallback: AppealType::DEFAULT.as_str().to_string(),
            };
            (AppealType::DEFAULT, Some(diagnostic))
        },
        |t| (t, None),
    )
}

/// Look up an appeal dimension by id.
pub fn appeal_dimension(id: &str) -> Option<&'static AppealDimension> {
    let id = normalize_id(id);
    APPEAL_DIMENSIONS.iter().find(|d| d.id == id)
}

fn general_profile() -> &'static ViolationProfile {
    VIOLATION_PROFILES
        .iter()
        .find(|p| p.id == DEFAULT_VIOLATION_TYPE)
        .unwrap_or(&VIOLATION_PROFILES[0])
}
