//! Error types for appeal-lint-core.
//!
//! Hard errors are limited to configuration loading and caller-supplied
//! catalogs. The analysis operations themselves never fail; anything they
//! cannot honour exactly is reported as a [`Diagnostic`] alongside a
//! defaulted result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while compiling a caller-supplied keyword catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A keyword could not be turned into a whole-word pattern.
    #[error("invalid keyword {keyword:?} in category {category}: {source}")]
    InvalidKeyword {
        /// Category the keyword belongs to.
        category: String,
        /// The offending keyword.
        keyword: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A category has no usable keywords.
    #[error("category {0} has no keywords")]
    EmptyCategory(String),
}

/// Result type alias using [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A soft diagnostic: the caller asked for something unknown and the
/// engine substituted a default instead of failing.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Violation type id not in the catalog.
    #[error("unknown violation type {requested:?}, using {fallback:?}")]
    UnknownViolationType {
        /// The id the caller passed.
        requested: String,
        /// The profile used instead.
        fallback: String,
    },

    /// Factor id not defined for the resolved violation type.
    #[error("unknown factor {requested:?} for violation type {violation_type:?}, ignored")]
    UnknownFactor {
        /// The id the caller passed.
        requested: String,
        /// Violation type the lookup ran against.
        violation_type: String,
    },

    /// Appeal dimension id not in the catalog.
    #[error("unknown appeal dimension {requested:?}, ignored")]
    UnknownDimension {
        /// The id the caller passed.
        requested: String,
    },

    /// Option value not defined for a known dimension.
    #[error("unknown option {requested:?} for dimension {dimension:?}, using {fallback:?}")]
    UnknownOption {
        /// Dimension being selected.
        dimension: String,
        /// The value the caller passed.
        requested: String,
        /// The zero-delta default used instead.
        fallback: String,
    },

    /// Appeal type id not in the catalog.
    #[error("unknown appeal type {requested:?}, using {fallback:?}")]
    UnknownAppealType {
        /// The id the caller passed.
        requested: String,
        /// The appeal type used instead.
        fallback: String,
    },
}
