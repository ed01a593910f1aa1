//! Whole-word keyword matching with context snippets.
//!
//! Each keyword compiles to a case-insensitive, word-boundary anchored
//! pattern, so `sign` never matches inside `signature`. Multi-word phrases
//! tolerate any run of whitespace between their words.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::IssueCategory;
use crate::error::{CatalogError, CatalogResult};

/// Default number of characters captured either side of a match.
pub const DEFAULT_SNIPPET_RADIUS: usize = 25;

/// Default number of snippets kept per category.
pub const DEFAULT_MAX_SNIPPETS: usize = 3;

/// Tuning for snippet extraction. Counting is never capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Characters of context either side of a match.
    pub snippet_radius: usize,
    /// Snippets kept per category.
    pub max_snippets: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            snippet_radius: DEFAULT_SNIPPET_RADIUS,
            max_snippets: DEFAULT_MAX_SNIPPETS,
        }
    }
}

/// A window of text around one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Snippet {
    /// The context window, verbatim.
    pub text: String,
    /// The catalog keyword that matched.
    pub keyword: String,
    /// Byte offset of the match within `text`.
    pub highlight_start: usize,
    /// Byte offset one past the match within `text`.
    pub highlight_end: usize,
}

impl Snippet {
    /// The matched text, as it appeared in the input.
    pub fn term(&self) -> &str {
        self.text
            .get(self.highlight_start..self.highlight_end)
            .unwrap_or_default()
    }

    /// The window with the match wrapped in `**`.
    pub fn marked(&self) -> String {
        match (
            self.text.get(..self.highlight_start),
            self.text.get(self.highlight_start..self.highlight_end),
            self.text.get(self.highlight_end..),
        ) {
            (Some(before), Some(term), Some(after)) => format!("{before}**{term}**{after}"),
            _ => self.text.clone(),
        }
    }
}

/// Matches found for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryMatch {
    /// Every match, including those beyond the snippet cap.
    pub count: usize,
    /// Snippets for the earliest matches, in text order.
    pub snippets: Vec<Snippet>,
}

#[derive(Debug)]
struct CompiledCategory {
    id: &'static str,
    patterns: Vec<(&'static str, Regex)>,
}

/// A catalog compiled into patterns, reusable across texts.
#[derive(Debug)]
pub struct PatternMatcher {
    categories: Vec<CompiledCategory>,
}

impl PatternMatcher {
    /// Compile every keyword of every category.
    ///
    /// Blank keywords are skipped; a category left with none is an error.
    pub fn new(categories: &[IssueCategory]) -> CatalogResult<Self> {
        let categories = categories
            .iter()
            .map(compile_category)
            .collect::<CatalogResult<Vec<_>>>()?;
        Ok(Self { categories })
    }

    /// Number of compiled categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the matcher has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Scan `text`, returning only categories with at least one match.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), categories = self.categories.len()))]
    pub fn find(&self, text: &str, options: &MatchOptions) -> BTreeMap<&'static str, CategoryMatch> {
        let mut found = BTreeMap::new();
        if text.trim().is_empty() {
            return found;
        }

        for category in &self.categories {
            let mut hits: Vec<(usize, usize, &'static str)> = category
                .patterns
                .iter()
                .flat_map(|(keyword, re)| {
                    re.find_iter(text).map(move |m| (m.start(), m.end(), *keyword))
                })
                .collect();

            if hits.is_empty() {
                continue;
            }
            hits.sort_unstable();

            let snippets = hits
                .iter()
                .take(options.max_snippets)
                .map(|&(start, end, keyword)| {
                    snippet(text, start, end, keyword, options.snippet_radius)
                })
                .collect();

            tracing::debug!(category = category.id, count = hits.len(), "category matched");
            found.insert(
                category.id,
                CategoryMatch {
                    count: hits.len(),
                    snippets,
                },
            );
        }

        found
    }
}

/// Match `text` against `categories` with default options.
pub fn match_categories(
    text: &str,
    categories: &[IssueCategory],
) -> CatalogResult<BTreeMap<&'static str, CategoryMatch>> {
    Ok(PatternMatcher::new(categories)?.find(text, &MatchOptions::default()))
}

/// A plain word list compiled once into whole-word patterns.
///
/// Used by the quality scorer, whose term lists carry no categories.
#[derive(Debug)]
pub struct TermSet {
    patterns: Vec<Regex>,
}

impl TermSet {
    /// Compile every term. Blank terms are skipped.
    pub fn new(terms: &[&str]) -> Result<Self, regex::Error> {
        let patterns = terms
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| keyword_pattern(t))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Total whole-word, case-insensitive occurrences of all terms.
    pub fn count(&self, text: &str) -> usize {
        self.patterns.iter().map(|re| re.find_iter(text).count()).sum()
    }

    /// Whether any term occurs.
    pub fn any(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }

    /// Whether every term occurs. False for an empty set.
    pub fn all(&self, text: &str) -> bool {
        !self.patterns.is_empty() && self.patterns.iter().all(|re| re.is_match(text))
    }
}

fn compile_category(category: &IssueCategory) -> CatalogResult<CompiledCategory> {
    let mut patterns = Vec::with_capacity(category.keywords.len());
    for &keyword in category.keywords {
        if keyword.trim().is_empty() {
            continue;
        }
        let re = keyword_pattern(keyword).map_err(|source| CatalogError::InvalidKeyword {
            category: category.id.to_string(),
            keyword: keyword.to_string(),
            source,
        })?;
        patterns.push((keyword, re));
    }
    if patterns.is_empty() {
        return Err(CatalogError::EmptyCategory(category.id.to_string()));
    }
    Ok(CompiledCategory {
        id: category.id,
        patterns,
    })
}

fn keyword_pattern(keyword: &str) -> Result<Regex, regex::Error> {
    let body = keyword
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    RegexBuilder::new(&format!(r"\b{body}\b"))
        .case_insensitive(true)
        .build()
}

fn snippet(text: &str, start: usize, end: usize, keyword: &str, radius: usize) -> Snippet {
    let lo = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(i, _)| i);
    let hi = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| end + i);

    Snippet {
        text: text[lo..hi].to_string(),
        keyword: keyword.to_string(),
        highlight_start: start - lo,
        highlight_end: end - lo,
    }
}
