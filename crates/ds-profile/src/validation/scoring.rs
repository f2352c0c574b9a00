use std::fmt;

use serde::Serialize;

use super::{CheckKind, CheckStatus, IndependenceCheck};
use crate::correlation::CorrelationRecord;

/// Fraction of a check's weight earned by a warning
const WARNING_CREDIT: f64 = 0.6;

/// Pairs listed per section of a correlation breakdown
pub const BREAKDOWN_LIMIT: usize = 5;

/// Weighted score for four statuses given in [`CheckKind::ALL`] order
pub fn score_statuses(statuses: &[CheckStatus; 4]) -> u32 {
    let total: f64 = CheckKind::ALL
        .iter()
        .zip(statuses)
        .map(|(kind, status)| match status {
            CheckStatus::Pass => kind.weight(),
            CheckStatus::Warning => kind.weight() * WARNING_CREDIT,
            CheckStatus::Fail => 0.0,
        })
        .sum();
    total.round() as u32
}

/// Letter-style band of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        if score >= 85 {
            Grade::Excellent
        } else if score >= 70 {
            Grade::Good
        } else if score >= 50 {
            Grade::Fair
        } else {
            Grade::Poor
        }
    }

    /// Badge text shown next to the score
    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent - ML Ready",
            Grade::Good => "Good - Minor issues",
            Grade::Fair => "Fair - Needs work",
            Grade::Poor => "Poor - Major issues",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Excellent => "excellent",
            Grade::Good => "good",
            Grade::Fair => "fair",
            Grade::Poor => "poor",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score out of 100 and its grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationScore {
    pub score: u32,
    pub grade: Grade,
}

impl ValidationScore {
    pub fn from_statuses(statuses: &[CheckStatus; 4]) -> Self {
        let score = score_statuses(statuses);
        Self {
            score,
            grade: Grade::from_score(score),
        }
    }
}

/// Summary of the independence check for display: the first few pairs of
/// each strong class plus counts for everything else
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationBreakdown {
    pub dependent: Vec<CorrelationRecord>,
    /// Dependent pairs not listed
    pub more_dependent: usize,
    pub independent: Vec<CorrelationRecord>,
    /// Independent pairs not listed
    pub more_independent: usize,
    pub dependent_count: usize,
    pub moderate_count: usize,
    pub independent_count: usize,
    pub total_pairs: usize,
}

impl CorrelationBreakdown {
    pub fn new(check: &IndependenceCheck) -> Self {
        let dependent_count = check.dependent_pairs.len();
        let independent_count = check.independent_pairs.len();
        let total_pairs = check.correlations.len();

        Self {
            dependent: check.dependent_pairs.iter().take(BREAKDOWN_LIMIT).cloned().collect(),
            more_dependent: dependent_count.saturating_sub(BREAKDOWN_LIMIT),
            independent: check.independent_pairs.iter().take(BREAKDOWN_LIMIT).cloned().collect(),
            more_independent: independent_count.saturating_sub(BREAKDOWN_LIMIT),
            dependent_count,
            moderate_count: total_pairs - dependent_count - independent_count,
            independent_count,
            total_pairs,
        }
    }

    /// Nothing to show when no pairs were analysed
    pub fn is_empty(&self) -> bool {
        self.total_pairs == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationCheckResult;

    use crate::validation::CheckStatus::{Fail, Pass, Warning};

    #[test]
    fn test_score_examples() {
        assert_eq!(score_statuses(&[Pass, Pass, Pass, Pass]), 100);
        assert_eq!(score_statuses(&[Fail, Fail, Fail, Fail]), 0);
        assert_eq!(score_statuses(&[Fail, Pass, Pass, Pass]), 75);
        assert_eq!(score_statuses(&[Warning, Warning, Warning, Warning]), 60);
        assert_eq!(score_statuses(&[Pass, Warning, Pass, Warning]), 80);
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_score(100), Grade::Excellent);
        assert_eq!(Grade::from_score(85), Grade::Excellent);
        assert_eq!(Grade::from_score(84), Grade::Good);
        assert_eq!(Grade::from_score(70), Grade::Good);
        assert_eq!(Grade::from_score(69), Grade::Fair);
        assert_eq!(Grade::from_score(50), Grade::Fair);
        assert_eq!(Grade::from_score(49), Grade::Poor);
        assert_eq!(Grade::Good.label(), "Good - Minor issues");
    }

    #[test]
    fn test_validation_score() {
        let score = ValidationScore::from_statuses(&[Fail, Pass, Pass, Pass]);
        assert_eq!(score.score, 75);
        assert_eq!(score.grade, Grade::Good);
    }

    #[test]
    fn test_breakdown_limits_and_counts() {
        let dependent: Vec<_> = (0..7)
            .map(|i| CorrelationRecord::new(format!("a{}", i), "z", 0.9))
            .collect();
        let independent: Vec<_> = (0..2)
            .map(|i| CorrelationRecord::new(format!("b{}", i), "z", 0.1))
            .collect();
        let mut correlations = dependent.clone();
        correlations.extend(independent.clone());
        correlations.push(CorrelationRecord::new("m", "z", 0.5));

        let check = IndependenceCheck {
            result: ValidationCheckResult::new(Pass, "Good mix: 2 independent, 7 dependent pairs"),
            correlations,
            dependent_pairs: dependent,
            independent_pairs: independent,
        };
        let breakdown = check.breakdown();

        assert_eq!(breakdown.dependent.len(), 5);
        assert_eq!(breakdown.dependent[0].col1, "a0");
        assert_eq!(breakdown.more_dependent, 2);
        assert_eq!(breakdown.independent.len(), 2);
        assert_eq!(breakdown.more_independent, 0);
        assert_eq!(breakdown.moderate_count, 1);
        assert_eq!(breakdown.total_pairs, 10);
        assert!(!breakdown.is_empty());
    }
}
