//! Approximate-match diagnostics for failed edits
//!
//! When `old_text` is not found verbatim, the matcher slides a window of
//! the same line count over the file and scores each window against the
//! caller's text, treating each line as an atomic token. The best window is
//! rendered as a unified diff so the caller can see exactly what the file
//! really contains.
//!
//! Line tokens score a one-character typo on a single line as 0. When no
//! window clears the threshold on lines alone, a few of the most promising
//! windows are rescored character by character under a diff deadline.

use similar::TextDiff;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Windows scoring at or below this ratio are not worth showing
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Lines of context around each hunk in the rendered diff
const DIFF_CONTEXT_RADIUS: usize = 3;

/// Windows rescored character by character when lines alone find nothing
const CHAR_REFINE_CANDIDATES: usize = 8;

/// Deadline for a single character-level diff
const CHAR_DIFF_TIMEOUT: Duration = Duration::from_millis(50);

/// Best-scoring line window in a file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityMatch {
    /// Zero-based index of the first line in the window
    pub start_line: usize,

    /// Similarity ratio in [0, 1]
    pub ratio: f64,
}

impl SimilarityMatch {
    /// One-based line number, as shown to callers
    pub fn line_number(&self) -> usize {
        self.start_line + 1
    }

    /// Ratio formatted as a whole percentage
    pub fn percent(&self) -> String {
        format!("{:.0}%", self.ratio * 100.0)
    }
}

/// Diagnostic attached to a failed edit
#[derive(Debug, Clone, PartialEq)]
pub enum NoMatchHint {
    /// A window scored above the threshold
    Similar { best: SimilarityMatch, diff: String },

    /// Nothing in the file was close enough to suggest
    NoneFound,
}

impl fmt::Display for NoMatchHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Similar { best, diff } => write!(
                f,
                "Best match ({} similar) at line {}:\n{}",
                best.percent(),
                best.line_number(),
                diff
            ),
            Self::NoneFound => write!(f, "No similar text found. Verify the file content."),
        }
    }
}

/// Finds the region of a file most similar to some expected text
#[derive(Debug, Clone, Copy)]
pub struct SimilarityMatcher {
    threshold: f64,
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl SimilarityMatcher {
    /// Create a matcher; the threshold is clamped into [0, 1]
    pub fn new(threshold: f64) -> Self {
        debug!(%threshold, "SimilarityMatcher::new: called");
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score every line window of `content` against `expected`
    ///
    /// The window is as tall as `expected`. Ties keep the earliest window.
    pub fn best_match(&self, content: &str, expected: &str) -> SimilarityMatch {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let expected_lines: Vec<&str> = expected.split_inclusive('\n').collect();
        let window = expected_lines.len();
        let candidates = (lines.len() + 1).saturating_sub(window).max(1);
        debug!(
            total_lines = lines.len(),
            %window,
            %candidates,
            "SimilarityMatcher::best_match: scanning windows"
        );

        let mut best = SimilarityMatch {
            start_line: 0,
            ratio: 0.0,
        };

        for start in 0..candidates {
            let ratio = line_ratio(&expected_lines, window_lines(&lines, start, window));
            if ratio > best.ratio {
                best = SimilarityMatch {
                    start_line: start,
                    ratio,
                };
            }
        }

        if best.ratio <= self.threshold {
            debug!(ratio = best.ratio, "SimilarityMatcher::best_match: refining by characters");
            if let Some(refined) = refine_by_chars(&lines, expected, window, candidates)
                && refined.ratio > best.ratio
            {
                best = refined;
            }
        }

        debug!(start_line = best.start_line, ratio = best.ratio, "SimilarityMatcher::best_match: done");
        best
    }

    /// Build the failure hint shown when `expected` is not in `content`
    ///
    /// `label` names the file in the diff header.
    pub fn diagnose(&self, content: &str, expected: &str, label: &str) -> NoMatchHint {
        debug!(%label, "SimilarityMatcher::diagnose: called");
        let best = self.best_match(content, expected);

        if best.ratio <= self.threshold {
            debug!(ratio = best.ratio, "SimilarityMatcher::diagnose: below threshold");
            return NoMatchHint::NoneFound;
        }

        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let window = expected.split_inclusive('\n').count();
        let actual = window_lines(&lines, best.start_line, window).concat();
        let actual_label = format!("{} (actual, line {})", label, best.line_number());

        let diff = TextDiff::from_lines(expected, actual.as_str())
            .unified_diff()
            .context_radius(DIFF_CONTEXT_RADIUS)
            .header("old_text (provided)", &actual_label)
            .to_string();

        NoMatchHint::Similar {
            best,
            diff: diff.trim_end().to_string(),
        }
    }
}

/// Normalized similarity of two strings: `2 * matched / (len(a) + len(b))`
///
/// Characters are the comparison unit. The diff gives up after a short
/// deadline, so very dissimilar long inputs get an approximate score.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    f64::from(TextDiff::configure().timeout(CHAR_DIFF_TIMEOUT).diff_chars(a, b).ratio())
}

/// Ratio over line sequences, each line one token
fn line_ratio(expected: &[&str], window: &[&str]) -> f64 {
    f64::from(TextDiff::from_slices(expected, window).ratio())
}

/// Rescore the windows whose characters overlap `expected` most
///
/// Candidates are picked by a cheap character-count overlap, then scored
/// with [`similarity_ratio`] in file order so ties keep the earliest window.
fn refine_by_chars(lines: &[&str], expected: &str, window: usize, candidates: usize) -> Option<SimilarityMatch> {
    let expected_counts = char_counts(expected);
    let expected_len = expected.chars().count();

    let mut ranked: Vec<(usize, f64)> = (0..candidates)
        .map(|start| {
            let text = window_lines(lines, start, window).concat();
            (start, overlap_ratio(&expected_counts, expected_len, &text))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(CHAR_REFINE_CANDIDATES);
    ranked.sort_by_key(|(start, _)| *start);

    let mut best: Option<SimilarityMatch> = None;
    for (start, _) in ranked {
        let text = window_lines(lines, start, window).concat();
        let ratio = similarity_ratio(expected, &text);
        if best.is_none_or(|b| ratio > b.ratio) {
            best = Some(SimilarityMatch {
                start_line: start,
                ratio,
            });
        }
    }
    best
}

fn char_counts(text: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Upper bound on the character ratio, ignoring order
fn overlap_ratio(expected_counts: &HashMap<char, usize>, expected_len: usize, text: &str) -> f64 {
    let mut remaining = expected_counts.clone();
    let mut shared = 0usize;
    let mut len = 0usize;
    for c in text.chars() {
        len += 1;
        if let Some(n) = remaining.get_mut(&c)
            && *n > 0
        {
            *n -= 1;
            shared += 1;
        }
    }
    let total = expected_len + len;
    if total == 0 {
        return 1.0;
    }
    2.0 * shared as f64 / total as f64
}

fn window_lines<'a>(lines: &'a [&'a str], start: usize, window: usize) -> &'a [&'a str] {
    let start = start.min(lines.len());
    let end = (start + window).min(lines.len());
    &lines[start..end]
}
