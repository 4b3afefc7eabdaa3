//! Match classifier: turns the matching service's continuous scores into tiers,
//! display ordering and summary figures.
//!
//! The classifier never recomputes a score. It only reads `match_score` and the four
//! per-dimension sub-scores exactly as the service returned them.

pub mod gaps;

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::models::MatchResult;
use crate::stats::score_percent;

pub use gaps::{rank_skill_gaps, RankedGap};

// ────────────────────────────────────────────────────────────────────────────
// Tiers
// ────────────────────────────────────────────────────────────────────────────

pub const EXCELLENT_THRESHOLD: f64 = 0.8;
pub const GOOD_THRESHOLD: f64 = 0.6;
pub const FAIR_THRESHOLD: f64 = 0.4;

/// Lower bounds are inclusive: 0.8 is Excellent, 0.6 is Good, 0.4 is Fair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchTier {
    Excellent,
    Good,
    Fair,
    Low,
}

impl MatchTier {
    pub fn classify(score: f64) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            MatchTier::Excellent
        } else if score >= GOOD_THRESHOLD {
            MatchTier::Good
        } else if score >= FAIR_THRESHOLD {
            MatchTier::Fair
        } else {
            // NaN lands here too: every comparison above is false
            MatchTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Excellent => "Excellent",
            MatchTier::Good => "Good",
            MatchTier::Fair => "Fair",
            MatchTier::Low => "Low",
        }
    }

    /// Presentation weight; higher tiers are listed first.
    pub fn weight(self) -> u8 {
        match self {
            MatchTier::Excellent => 3,
            MatchTier::Good => 2,
            MatchTier::Fair => 1,
            MatchTier::Low => 0,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MatchTier::Excellent => "green",
            MatchTier::Good => "yellow",
            MatchTier::Fair => "orange",
            MatchTier::Low => "red",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn tier_of(result: &MatchResult) -> MatchTier {
    MatchTier::classify(result.match_score)
}

// ────────────────────────────────────────────────────────────────────────────
// Breakdown & ordering
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionScore {
    pub label: &'static str,
    pub percent: u32,
    pub tier: MatchTier,
}

pub fn breakdown(result: &MatchResult) -> Vec<DimensionScore> {
    result
        .dimensions()
        .into_iter()
        .map(|(label, value)| DimensionScore {
            label,
            percent: score_percent(value),
            tier: MatchTier::classify(value),
        })
        .collect()
}

/// Tier weight descending, then score descending. Stable, so equal scores keep the
/// service's order.
pub fn rank_for_display(results: &[MatchResult]) -> Vec<&MatchResult> {
    let mut ranked: Vec<&MatchResult> = results.iter().collect();
    ranked.sort_by(|a, b| {
        tier_of(b)
            .weight()
            .cmp(&tier_of(a).weight())
            .then_with(|| compare_scores(b.match_score, a.match_score))
    });
    ranked
}

fn compare_scores(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    pub count: usize,
    pub average_score: f64,
    pub average_percent: u32,
    pub excellent_count: usize,
    /// Matches scoring under the Good threshold (Fair and Low).
    pub below_good_count: usize,
}

pub fn summarize(results: &[MatchResult]) -> MatchSummary {
    if results.is_empty() {
        return MatchSummary::default();
    }

    let sum: f64 = results.iter().map(|r| r.match_score).sum();
    let average_score = sum / results.len() as f64;

    MatchSummary {
        count: results.len(),
        average_score,
        average_percent: score_percent(average_score),
        excellent_count: results
            .iter()
            .filter(|r| tier_of(r) == MatchTier::Excellent)
            .count(),
        below_good_count: results
            .iter()
            .filter(|r| r.match_score < GOOD_THRESHOLD)
            .count(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
