//! Core library for appeal-lint.
//!
//! Heuristic analysis of traffic and parking ticket appeals: keyword-based
//! issue detection in a driver's statement, a factor-based success
//! predictor, a draft quality scorer, and a word-level draft comparison.
//! Every analysis is a pure function over its inputs and the built-in
//! [`catalog`].
//!
//! # Modules
//!
//! - [`statement`] - Issue detection with confidence scoring
//! - [`predict`] - Multi-factor success prediction
//! - [`quality`] - Draft quality sub-scores and overall score
//! - [`diff`] - Word-level draft comparison
//! - [`catalog`] - Violation profiles, factors, dimensions, appeal types
//! - [`matcher`] - Whole-word keyword matching with snippets
//! - [`labels`] - Display labels for catalog ids
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and diagnostics
//!
//! # Quick Start
//!
//! ```
//! use appeal_lint_core::{analyze_statement, predict_success};
//!
//! let report = analyze_statement(
//!     "The officer estimated my speed; the radar was never calibrated.",
//!     "speeding",
//! );
//! assert!(!report.issues.is_empty());
//!
//! let prediction = predict_success("parking", ["signage"], [("evidence", "strong")]);
//! assert!(prediction.probability <= 0.95);
//! ```
#![deny(unsafe_code)]

pub mod advice;
pub mod catalog;
pub mod config;
pub mod diff;
pub mod error;
pub mod labels;
pub mod matcher;
pub mod predict;
pub mod quality;
pub mod scoring;
pub mod statement;
pub mod text;

pub use advice::{Advice, Tier};
pub use catalog::{AppealType, Impact};
pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use diff::{ChangeKind, DiffRun, DiffStats, diff_texts};
pub use error::{CatalogError, CatalogResult, ConfigError, ConfigResult, Diagnostic};
pub use labels::Locale;
pub use matcher::{MatchOptions, PatternMatcher, match_categories};
pub use predict::{PredictionReport, predict_success};
pub use quality::{QualityMetrics, QualityReport, score_quality};
pub use statement::{DetectedIssue, StatementReport, analyze_statement, analyze_statement_with};
