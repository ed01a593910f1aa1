//! Word-level comparison of two drafts.
//!
//! A greedy two-cursor aligner over whitespace tokens. On a mismatch it
//! looks ahead in both sequences: if the modified token reappears in the
//! original at least as soon as the original token reappears in the
//! modified text, the original token is classified as removed; otherwise
//! the modified token is classified as added. Ties, including neither
//! token reappearing, remove the original token first.
//!
//! The comparison keys on where the *other* side's token resumes. Keying
//! on the current token's own reappearance instead would classify the
//! word after a one-word insertion as removed and re-added, e.g. `hidden`
//! in "the sign was hidden" → "the sign was completely hidden".
//!
//! The result is not a minimal edit script, but the runs always partition
//! both inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present in both versions.
    Unchanged,
    /// Only in the modified version.
    Added,
    /// Only in the original version.
    Removed,
}

impl ChangeKind {
    /// Whether the run belongs to the original text.
    pub const fn in_original(self) -> bool {
        !matches!(self, Self::Added)
    }

    /// Whether the run belongs to the modified text.
    pub const fn in_modified(self) -> bool {
        !matches!(self, Self::Removed)
    }
}

/// A maximal span of tokens with one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiffRun {
    /// Tokens joined by single spaces.
    pub text: String,
    /// How the span changed.
    pub kind: ChangeKind,
}

/// Token counts per classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiffStats {
    /// Tokens present in both versions.
    pub unchanged: usize,
    /// Tokens only in the modified version.
    pub added: usize,
    /// Tokens only in the original version.
    pub removed: usize,
}

/// Compare two texts word by word.
///
/// Both inputs are tokenized on whitespace. Adjacent runs with the same
/// classification are merged. Two empty inputs produce no runs.
#[tracing::instrument(skip_all, fields(original_len = original.len(), modified_len = modified.len()))]
pub fn diff_texts(original: &str, modified: &str) -> Vec<DiffRun> {
    let a: Vec<&str> = original.split_whitespace().collect();
    let b: Vec<&str> = modified.split_whitespace().collect();

    let mut builder = RunBuilder::default();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            builder.push(ChangeKind::Unchanged, a[i]);
            i += 1;
            j += 1;
            continue;
        }
        // Distance until b[j] shows up again in a, and a[i] in b.
        let removal = lookahead(&a[i + 1..], b[j]);
        let addition = lookahead(&b[j + 1..], a[i]);
        if removal <= addition {
            builder.push(ChangeKind::Removed, a[i]);
            i += 1;
        } else {
            builder.push(ChangeKind::Added, b[j]);
            j += 1;
        }
    }
    for token in &a[i..] {
        builder.push(ChangeKind::Removed, token);
    }
    for token in &b[j..] {
        builder.push(ChangeKind::Added, token);
    }

    let runs = builder.finish();
    tracing::debug!(runs = runs.len(), "texts compared");
    runs
}

/// Count tokens per classification.
pub fn summarize(runs: &[DiffRun]) -> DiffStats {
    runs.iter().fold(DiffStats::default(), |mut stats, run| {
        let tokens = run.text.split_whitespace().count();
        match run.kind {
            ChangeKind::Unchanged => stats.unchanged += tokens,
            ChangeKind::Added => stats.added += tokens,
            ChangeKind::Removed => stats.removed += tokens,
        }
        stats
    })
}

/// Rebuild one side of a comparison from its runs.
///
/// `keep` selects the runs that belong to that side, e.g.
/// [`ChangeKind::in_original`].
pub fn reconstruct(runs: &[DiffRun], keep: impl Fn(ChangeKind) -> bool) -> String {
    runs.iter()
        .filter(|r| keep(r.kind))
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Offset of `token` in `rest`, or `usize::MAX` if absent.
fn lookahead(rest: &[&str], token: &str) -> usize {
    rest.iter().position(|t| *t == token).unwrap_or(usize::MAX)
}

#[derive(Default)]
struct RunBuilder {
    runs: Vec<DiffRun>,
}

impl RunBuilder {
    fn push(&mut self, kind: ChangeKind, token: &str) {
        match self.runs.last_mut() {
            Some(last) if last.kind == kind => {
                last.text.push(' ');
                last.text.push_str(token);
            }
            _ => self.runs.push(DiffRun {
                text: token.to_string(),
                kind,
            }),
        }
    }

    fn finish(self) -> Vec<DiffRun> {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn kinds(runs: &[DiffRun]) -> Vec<ChangeKind> {
        runs.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn identical_texts_are_one_unchanged_run() {
        let text = "The sign was hidden behind a tree.";
        let runs = diff_texts(text, text);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].kind, ChangeKind::Unchanged);
        assert_eq!(runs[0].text, text);
    }

    #[test]
    fn empty_modified_removes_everything() {
        let runs = diff_texts("pay the fine", "");
        assert_eq!(
            runs,
            vec![DiffRun {
                text: "pay the fine".into(),
                kind: ChangeKind::Removed
            }]
        );
    }

    #[test]
    fn empty_original_adds_everything() {
        let runs = diff_texts("", "  contest   the fine ");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].kind, ChangeKind::Added);
        assert_eq!(runs[0].text, "contest the fine");
    }

    #[test]
    fn both_empty_is_no_runs() {
        assert!(diff_texts("", "").is_empty());
        assert!(diff_texts("  ", "\n").is_empty());
    }

    #[test]
    fn inserted_word() {
        let runs = diff_texts("the sign was hidden", "the sign was completely hidden");
        assert_eq!(
            kinds(&runs),
            vec![ChangeKind::Unchanged, ChangeKind::Added, ChangeKind::Unchanged]
        );
        assert_eq!(runs[1].text, "completely");
    }

    #[test]
    fn deleted_word() {
        let runs = diff_texts("I was really parked legally", "I was parked legally");
        assert_eq!(
            kinds(&runs),
            vec![ChangeKind::Unchanged, ChangeKind::Removed, ChangeKind::Unchanged]
        );
        assert_eq!(runs[1].text, "really");
    }

    #[test]
    fn replaced_word_prefers_removal_first() {
        let runs = diff_texts("the meter was broken", "the meter was faulty");
        assert_eq!(
            kinds(&runs),
            vec![ChangeKind::Unchanged, ChangeKind::Removed, ChangeKind::Added]
        );
        assert_eq!(runs[1].text, "broken");
        assert_eq!(runs[2].text, "faulty");
    }

    #[test]
    fn equal_finite_lookahead_removes_first() {
        let runs = diff_texts("a b", "b a");
        assert_eq!(
            runs,
            vec![
                DiffRun { text: "a".into(), kind: ChangeKind::Removed },
                DiffRun { text: "b".into(), kind: ChangeKind::Unchanged },
                DiffRun { text: "a".into(), kind: ChangeKind::Added },
            ]
        );
    }

    #[test]
    fn nearer_resumption_decides_direction() {
        // "a" resumes at once in the original; "x" is three tokens away in the modified.
        let moved_back = diff_texts("x a b c", "a b c x");
        assert_eq!(
            kinds(&moved_back),
            vec![ChangeKind::Removed, ChangeKind::Unchanged, ChangeKind::Added]
        );
        assert_eq!(moved_back[0].text, "x");
        assert_eq!(moved_back[1].text, "a b c");

        // Mirror image: "a" resumes at once in the modified, so "x" is added.
        let moved_front = diff_texts("a b c x", "x a b c");
        assert_eq!(
            kinds(&moved_front),
            vec![ChangeKind::Added, ChangeKind::Unchanged, ChangeKind::Removed]
        );
        assert_eq!(moved_front[0].text, "x");
    }

    #[test]
    fn adjacent_runs_merge() {
        let runs = diff_texts("a b c", "x y z");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "a b c");
        assert_eq!(runs[1].text, "x y z");
    }

    #[test]
    fn runs_reconstruct_both_sides() {
        let pairs = [
            ("the sign was hidden", "the sign was completely hidden"),
            ("a a a b", "b a a a"),
            ("one two three", "three two one"),
            ("x y x y x", "y x y"),
            ("The officer  estimated my speed.", "The officer\nguessed my speed, roughly."),
            ("", "new text"),
            ("old text", ""),
            ("same same same", "same"),
        ];
        for (original, modified) in pairs {
            let runs = diff_texts(original, modified);
            assert_eq!(
                reconstruct(&runs, ChangeKind::in_original),
                normalized(original),
                "original of {original:?} -> {modified:?}"
            );
            assert_eq!(
                reconstruct(&runs, ChangeKind::in_modified),
                normalized(modified),
                "modified of {original:?} -> {modified:?}"
            );
            for pair in runs.windows(2) {
                assert_ne!(pair[0].kind, pair[1].kind, "unmerged runs");
            }
        }
    }

    #[test]
    fn summary_counts_tokens() {
        let runs = diff_texts("I was parked here", "I was not parked there");
        let stats = summarize(&runs);
        assert_eq!(stats.unchanged, 3);
        assert_eq!(stats.added, 2);
        assert_eq!(stats.removed, 1);
    }
}
