//! Correction feedback for recitation attempts.
//!
//! Two passes over the normalized texts: character frequency deltas give
//! order-independent missing/extra sets, and a greedy scan with a small
//! lookahead window finds where characters were skipped, inserted or
//! substituted.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// How far ahead the alignment scan looks for a resync point.
const LOOKAHEAD: usize = 3;
const MAX_MISSING_SHOWN: usize = 6;
const MAX_SUBSTITUTIONS_SHOWN: usize = 3;
const MAX_EXTRA_SHOWN: usize = 3;

/// A character read as another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub expected: char,
    pub actual: char,
    /// Index into the normalized reference.
    pub position: usize,
}

/// One statement in a feedback report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The attempt was empty after normalization.
    NoSpeech,
    /// The attempt matched the reference exactly.
    FullyCorrect,
    Missing { chars: Vec<char>, truncated: bool },
    Substituted { pairs: Vec<Substitution>, truncated: bool },
    Extra { chars: Vec<char>, truncated: bool },
    TooShort { expected: usize, actual: usize },
    TooLong { expected: usize, actual: usize },
    /// Different, but nothing specific to point at.
    NearlyThere,
}

fn quoted(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join("、")
}

fn more(truncated: bool) -> &'static str {
    if truncated {
        "等"
    } else {
        ""
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSpeech => write!(f, "你没有说话哦，请再试一次～"),
            Self::FullyCorrect => write!(f, "太棒了！你读得完全正确！"),
            Self::Missing { chars, truncated } => {
                write!(f, "你漏掉了这些字：{}{}", quoted(chars), more(*truncated))
            }
            Self::Substituted { pairs, truncated } => {
                let list = pairs
                    .iter()
                    .map(|s| format!("\"{}\"应该是\"{}\"", s.actual, s.expected))
                    .collect::<Vec<_>>()
                    .join("，");
                write!(f, "有些字读错了：{}{}", list, more(*truncated))
            }
            Self::Extra { chars, truncated } => {
                write!(f, "这些字是多余的：{}{}", quoted(chars), more(*truncated))
            }
            Self::TooShort { expected, actual } => {
                write!(f, "你只说了{actual}个字，但应该要说{expected}个字哦～")
            }
            Self::TooLong { expected, actual } => {
                write!(f, "你说得有点长，标准答案是{expected}个字，你说了{actual}个字")
            }
            Self::NearlyThere => {
                write!(f, "读得不错，但还有一点点小差异，再仔细听一遍标准读音试试～")
            }
        }
    }
}

/// Ordered diagnostics for one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl FeedbackReport {
    fn single(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }

    /// Human-readable suggestion lines, in order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    pub fn is_fully_correct(&self) -> bool {
        self.diagnostics == [Diagnostic::FullyCorrect]
    }
}

impl fmt::Display for FeedbackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("\n"))
    }
}

/// Compare an attempt against the reference and describe what to fix.
pub fn generate_feedback(reference: &str, attempt: &str) -> FeedbackReport {
    let reference: Vec<char> = normalize(reference).chars().collect();
    let attempt: Vec<char> = normalize(attempt).chars().collect();

    if attempt.is_empty() {
        return FeedbackReport::single(Diagnostic::NoSpeech);
    }
    if reference == attempt {
        return FeedbackReport::single(Diagnostic::FullyCorrect);
    }

    let reference_counts = counts(&reference);
    let attempt_counts = counts(&attempt);
    let missing = surplus(&reference, &reference_counts, &attempt_counts);
    let extra = surplus(&attempt, &attempt_counts, &reference_counts);

    let alignment = align(&reference, &attempt, &missing, &extra);

    let missing = distinct(missing.iter().chain(&alignment.skipped));
    let extra = distinct(extra.iter().chain(&alignment.inserted));

    FeedbackReport {
        diagnostics: assemble(
            &missing,
            &alignment.substitutions,
            &extra,
            reference.len(),
            attempt.len(),
        ),
    }
}

fn counts(chars: &[char]) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for &c in chars {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Characters of `chars` occurring more often than in `other`, repeated by the
/// difference, in first-occurrence order.
fn surplus(
    chars: &[char],
    own: &HashMap<char, usize>,
    other: &HashMap<char, usize>,
) -> Vec<char> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for &c in chars {
        if !seen.insert(c) {
            continue;
        }
        let have = own.get(&c).copied().unwrap_or(0);
        let against = other.get(&c).copied().unwrap_or(0);
        result.extend(std::iter::repeat(c).take(have.saturating_sub(against)));
    }
    result
}

fn distinct<'a>(chars: impl Iterator<Item = &'a char>) -> Vec<char> {
    let mut seen = HashSet::new();
    chars.copied().filter(|c| seen.insert(*c)).collect()
}

/// Position-aware findings of the lookahead scan.
#[derive(Debug, Default, PartialEq, Eq)]
struct Alignment {
    /// Reference characters jumped over that the frequency pass did not flag.
    skipped: Vec<char>,
    /// Attempt characters jumped over that the frequency pass did not flag.
    inserted: Vec<char>,
    substitutions: Vec<Substitution>,
}

fn align(reference: &[char], attempt: &[char], missing: &[char], extra: &[char]) -> Alignment {
    let mut result = Alignment::default();
    let mut i = 0;
    let mut j = 0;

    while i < reference.len() && j < attempt.len() {
        if reference[i] == attempt[j] {
            i += 1;
            j += 1;
            continue;
        }

        let mut found = false;
        for offset in 1..=LOOKAHEAD {
            if reference.get(i + offset) == Some(&attempt[j]) {
                // Attempt skipped reference[i..i + offset]
                for &c in &reference[i..i + offset] {
                    if !missing.contains(&c) && !result.skipped.contains(&c) {
                        result.skipped.push(c);
                    }
                }
                i += offset + 1;
                j += 1;
                found = true;
                break;
            }
            if attempt.get(j + offset) == Some(&reference[i]) {
                // Attempt inserted attempt[j..j + offset]
                for &c in &attempt[j..j + offset] {
                    if !extra.contains(&c) && !result.inserted.contains(&c) {
                        result.inserted.push(c);
                    }
                }
                i += 1;
                j += offset + 1;
                found = true;
                break;
            }
        }

        if !found {
            result.substitutions.push(Substitution {
                expected: reference[i],
                actual: attempt[j],
                position: i,
            });
            i += 1;
            j += 1;
        }
    }

    result
}

/// Build suggestions in display order: missing, substituted, extra, length.
fn assemble(
    missing: &[char],
    substitutions: &[Substitution],
    extra: &[char],
    expected_len: usize,
    actual_len: usize,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if !missing.is_empty() {
        diagnostics.push(Diagnostic::Missing {
            chars: missing.iter().copied().take(MAX_MISSING_SHOWN).collect(),
            truncated: missing.len() > MAX_MISSING_SHOWN,
        });
    }
    if !substitutions.is_empty() {
        diagnostics.push(Diagnostic::Substituted {
            pairs: substitutions.iter().copied().take(MAX_SUBSTITUTIONS_SHOWN).collect(),
            truncated: substitutions.len() > MAX_SUBSTITUTIONS_SHOWN,
        });
    }
    if !extra.is_empty() {
        diagnostics.push(Diagnostic::Extra {
            chars: extra.iter().copied().take(MAX_EXTRA_SHOWN).collect(),
            truncated: extra.len() > MAX_EXTRA_SHOWN,
        });
    }

    // Under 70% or over 130% of the reference length
    if actual_len * 10 < expected_len * 7 {
        diagnostics.push(Diagnostic::TooShort {
            expected: expected_len,
            actual: actual_len,
        });
    } else if actual_len * 10 > expected_len * 13 {
        diagnostics.push(Diagnostic::TooLong {
            expected: expected_len,
            actual: actual_len,
        });
    }

    if diagnostics.is_empty() {
        diagnostics.push(Diagnostic::NearlyThere);
    }
    diagnostics
}
