//! Rule-based risk tier classification
//!
//! Each factor contributes points from exactly one band; the summed score is
//! then mapped onto a tier by [`TIER_THRESHOLDS`]. Both tables are plain data
//! so they can be inspected and tested on their own.

use crate::subject::Smoker;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Attribute a score band is evaluated against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Age,
    Bmi,
    Smoker,
    Children,
}

impl Factor {
    pub const ALL: [Factor; 4] = [Factor::Age, Factor::Bmi, Factor::Smoker, Factor::Children];

    /// Numeric reading of this factor; smoking status reads as 1 or 0.
    pub fn measure(self, inputs: &RiskInputs) -> f64 {
        match self {
            Factor::Age => f64::from(inputs.age),
            Factor::Bmi => inputs.bmi,
            Factor::Smoker => {
                if inputs.smoker.is_smoker() {
                    1.0
                } else {
                    0.0
                }
            }
            Factor::Children => f64::from(inputs.children),
        }
    }
}

/// Half-open band `(above, up_to]` worth `points` for one factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
    pub factor: Factor,
    pub above: f64,
    pub up_to: f64,
    pub points: u32,
}

impl ScoreBand {
    const fn new(factor: Factor, above: f64, up_to: f64, points: u32) -> Self {
        Self {
            factor,
            above,
            up_to,
            points,
        }
    }

    pub fn contains(&self, x: f64) -> bool {
        x > self.above && x <= self.up_to
    }
}

const INF: f64 = f64::INFINITY;
const NEG_INF: f64 = f64::NEG_INFINITY;

/// Score bands per factor. Bands of one factor never overlap.
pub const SCORE_TABLE: [ScoreBand; 10] = [
    ScoreBand::new(Factor::Age, 50.0, INF, 2),
    ScoreBand::new(Factor::Age, 30.0, 50.0, 1),
    ScoreBand::new(Factor::Age, NEG_INF, 30.0, 0),
    ScoreBand::new(Factor::Bmi, 30.0, INF, 2),
    ScoreBand::new(Factor::Bmi, 25.0, 30.0, 1),
    ScoreBand::new(Factor::Bmi, NEG_INF, 25.0, 0),
    ScoreBand::new(Factor::Smoker, 0.0, INF, 3),
    ScoreBand::new(Factor::Smoker, NEG_INF, 0.0, 0),
    // three or more children
    ScoreBand::new(Factor::Children, 2.0, INF, 1),
    ScoreBand::new(Factor::Children, NEG_INF, 2.0, 0),
];

/// Minimum score per tier, highest tier first
pub const TIER_THRESHOLDS: [(u32, RiskTier); 3] = [
    (5, RiskTier::High),
    (3, RiskTier::Medium),
    (0, RiskTier::Low),
];

/// Largest score the table can produce
pub const MAX_SCORE: u32 = 8;

/// The four raw attributes the classifier looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskInputs {
    pub age: u32,
    pub bmi: f64,
    pub smoker: Smoker,
    pub children: u32,
}

/// Band that fired for one factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: Factor,
    pub measured: f64,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub tier: RiskTier,
    pub contributions: Vec<FactorContribution>,
}

/// Map a score onto its tier
pub fn tier_for_score(score: u32) -> RiskTier {
    TIER_THRESHOLDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, tier)| *tier)
        .unwrap_or(RiskTier::Low)
}

/// Score the inputs and explain which band each factor fell into
pub fn assess(age: u32, bmi: f64, smoker: Smoker, children: u32) -> RiskAssessment {
    let inputs = RiskInputs {
        age,
        bmi,
        smoker,
        children,
    };

    let contributions: Vec<FactorContribution> = Factor::ALL
        .iter()
        .map(|&factor| {
            let measured = factor.measure(&inputs);
            let points = SCORE_TABLE
                .iter()
                .filter(|band| band.factor == factor)
                .find(|band| band.contains(measured))
                .map_or(0, |band| band.points);
            FactorContribution {
                factor,
                measured,
                points,
            }
        })
        .collect();

    let score = contributions.iter().map(|c| c.points).sum();
    let tier = tier_for_score(score);
    log::trace!("risk score {score} -> {tier:?} for {inputs:?}");

    RiskAssessment {
        score,
        tier,
        contributions,
    }
}

pub fn risk_score(age: u32, bmi: f64, smoker: Smoker, children: u32) -> u32 {
    assess(age, bmi, smoker, children).score
}

/// Classify a subject's attributes into a risk tier.
///
/// Total over its inputs; range checking is the caller's concern.
pub fn classify(age: u32, bmi: f64, smoker: Smoker, children: u32) -> RiskTier {
    assess(age, bmi, smoker, children).tier
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands(factor: Factor) -> Vec<ScoreBand> {
        let mut out: Vec<ScoreBand> = SCORE_TABLE
            .iter()
            .copied()
            .filter(|b| b.factor == factor)
            .collect();
        out.sort_by(|a, b| a.above.total_cmp(&b.above));
        out
    }

    #[test]
    fn bands_partition_each_factor() {
        for factor in Factor::ALL {
            let bands = bands(factor);
            assert!(!bands.is_empty(), "{factor:?} has no bands");
            assert_eq!(bands.first().unwrap().above, NEG_INF);
            assert_eq!(bands.last().unwrap().up_to, INF);
            for pair in bands.windows(2) {
                assert_eq!(pair[0].up_to, pair[1].above, "gap or overlap in {factor:?}");
            }
        }
    }

    #[test]
    fn max_score_is_sum_of_top_bands() {
        let top: u32 = Factor::ALL
            .iter()
            .map(|&f| bands(f).iter().map(|b| b.points).max().unwrap_or(0))
            .sum();
        assert_eq!(top, MAX_SCORE);
    }

    #[test]
    fn thresholds_descend_to_zero() {
        for pair in TIER_THRESHOLDS.windows(2) {
            assert!(pair[0].0 > pair[1].0);
            assert!(pair[0].1 > pair[1].1);
        }
        assert_eq!(TIER_THRESHOLDS.last().map(|t| t.0), Some(0));
    }

    #[test]
    fn tier_cutoffs() {
        assert_eq!(tier_for_score(0), RiskTier::Low);
        assert_eq!(tier_for_score(2), RiskTier::Low);
        assert_eq!(tier_for_score(3), RiskTier::Medium);
        assert_eq!(tier_for_score(4), RiskTier::Medium);
        assert_eq!(tier_for_score(5), RiskTier::High);
        assert_eq!(tier_for_score(MAX_SCORE), RiskTier::High);
    }

    #[test]
    fn band_edges_are_inclusive_above() {
        assert_eq!(risk_score(30, 20.0, Smoker::No, 0), 0);
        assert_eq!(risk_score(31, 20.0, Smoker::No, 0), 1);
        assert_eq!(risk_score(50, 20.0, Smoker::No, 0), 1);
        assert_eq!(risk_score(51, 20.0, Smoker::No, 0), 2);
        assert_eq!(risk_score(18, 25.0, Smoker::No, 0), 0);
        assert_eq!(risk_score(18, 25.1, Smoker::No, 0), 1);
        assert_eq!(risk_score(18, 30.0, Smoker::No, 0), 1);
        assert_eq!(risk_score(18, 30.1, Smoker::No, 0), 2);
        assert_eq!(risk_score(18, 20.0, Smoker::No, 2), 0);
        assert_eq!(risk_score(18, 20.0, Smoker::No, 3), 1);
    }

    #[test]
    fn assessment_lists_every_factor() {
        let a = assess(55, 32.0, Smoker::Yes, 1);
        assert_eq!(a.score, 7);
        assert_eq!(a.tier, RiskTier::High);
        let points: Vec<(Factor, u32)> = a.contributions.iter().map(|c| (c.factor, c.points)).collect();
        assert_eq!(
            points,
            vec![
                (Factor::Age, 2),
                (Factor::Bmi, 2),
                (Factor::Smoker, 3),
                (Factor::Children, 0)
            ]
        );
    }

    #[test]
    fn nan_bmi_scores_nothing() {
        assert_eq!(risk_score(18, f64::NAN, Smoker::No, 0), 0);
    }

    #[test]
    fn tier_labels() {
        assert_eq!(RiskTier::High.to_string(), "High Risk");
        assert_eq!(RiskTier::Medium.label(), "Medium Risk");
        assert_eq!(serde_json::to_string(&RiskTier::Low).unwrap(), "\"low\"");
    }
}
