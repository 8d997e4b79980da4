//! Running Bayesian-style confidence and detection-risk model.
//!
//! A successful step updates confidence with posterior odds
//! `c×r / (c×r + (1 − c))` where `r = exploit_weight / 0.5`. Detection risk
//! grows linearly with the number of updates plus a small uniform jitter.

use rand::Rng;
use serde::{Deserialize, Serialize};

use aurora_core::types::ExploitKind;

use crate::scoring::round_to;

const NEUTRAL_WEIGHT: f64 = 0.5;
const FAILURE_DECAY: f64 = 0.7;
const DETECTION_PER_STEP: f64 = 0.04;
const DETECTION_JITTER: f64 = 0.02;
const CONFIDENCE_CEILING_PCT: f64 = 99.5;
const DETECTION_CEILING_PCT: f64 = 95.0;

/// Likelihood weight of a successful action of this kind.
pub fn exploit_weight(kind: ExploitKind) -> f64 {
    match kind {
        ExploitKind::Rce => 0.85,
        ExploitKind::Privesc => 0.78,
        ExploitKind::Dos => 0.30,
        ExploitKind::Sqli => 0.72,
        ExploitKind::Lfi => 0.65,
        ExploitKind::Other => NEUTRAL_WEIGHT,
    }
}

/// Confidence and detection risk after one update, both in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceUpdate {
    pub confidence: f64,
    pub detection_risk: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceModel {
    /// Starting confidence as a fraction.
    pub prior_confidence: f64,
    /// Detection risk before any step, as a fraction.
    pub detection_base: f64,
    step_count: u32,
}

impl Default for ConfidenceModel {
    fn default() -> Self {
        Self {
            prior_confidence: 0.30,
            detection_base: 0.05,
            step_count: 0,
        }
    }
}

impl ConfidenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of updates applied so far.
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Apply one step.
    ///
    /// `current` is the confidence as a fraction in `[0, 1]`. The detection
    /// jitter is the one draw taken from `rng`.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        current: f64,
        succeeded: bool,
        kind: ExploitKind,
        rng: &mut R,
    ) -> ConfidenceUpdate {
        self.step_count += 1;

        let posterior = if succeeded {
            let ratio = exploit_weight(kind) / NEUTRAL_WEIGHT;
            let weighted = current * ratio;
            let denominator = weighted + (1.0 - current);
            if denominator > 0.0 {
                weighted / denominator
            } else {
                current
            }
        } else {
            // Never reached by the scripted run.
            current * FAILURE_DECAY
        };

        let jitter = rng.gen_range(0.0..DETECTION_JITTER);
        let detection =
            self.detection_base + f64::from(self.step_count) * DETECTION_PER_STEP + jitter;

        ConfidenceUpdate {
            confidence: round_to((posterior * 100.0).min(CONFIDENCE_CEILING_PCT), 1),
            detection_risk: round_to((detection * 100.0).min(DETECTION_CEILING_PCT), 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Always draws the low end of any range.
    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_first_rce_update() {
        let mut model = ConfidenceModel::new();
        let update = model.update(0.30, true, ExploitKind::Rce, &mut zero_rng());

        // 0.3×1.7 / (0.51 + 0.7) = 0.4215
        assert_eq!(update.confidence, 42.1);
        // 0.05 + 1×0.04 + 0
        assert_eq!(update.detection_risk, 9.0);
        assert_eq!(model.step_count(), 1);
    }

    #[test]
    fn test_neutral_kind_keeps_confidence() {
        let mut model = ConfidenceModel::new();
        let update = model.update(0.30, true, ExploitKind::Other, &mut zero_rng());
        assert_eq!(update.confidence, 30.0);
    }

    #[test]
    fn test_dos_success_lowers_confidence() {
        let mut model = ConfidenceModel::new();
        let update = model.update(0.30, true, ExploitKind::Dos, &mut zero_rng());
        assert!(update.confidence < 30.0);
    }

    #[test]
    fn test_failure_decays() {
        let mut model = ConfidenceModel::new();
        let update = model.update(0.50, false, ExploitKind::Rce, &mut zero_rng());
        assert_eq!(update.confidence, 35.0);
    }

    #[test]
    fn test_ceilings() {
        let mut model = ConfidenceModel::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut last = model.update(0.999, true, ExploitKind::Rce, &mut rng);
        for _ in 0..40 {
            last = model.update(last.confidence / 100.0, true, ExploitKind::Rce, &mut rng);
        }
        assert_eq!(last.confidence, 99.5);
        assert_eq!(last.detection_risk, 95.0);
    }

    #[test]
    fn test_detection_grows_within_jitter() {
        let mut model = ConfidenceModel::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut confidence = 0.30;
        for step in 1..=9u32 {
            let update = model.update(confidence, true, ExploitKind::Privesc, &mut rng);
            let floor = 5.0 + f64::from(step) * 4.0;
            assert!(update.detection_risk >= floor - 0.05);
            assert!(update.detection_risk <= floor + 2.05);
            confidence = update.confidence / 100.0;
        }
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let run = |seed| {
            let mut model = ConfidenceModel::new();
            let mut rng = StdRng::seed_from_u64(seed);
            (0..5)
                .map(|_| model.update(0.4, true, ExploitKind::Sqli, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }
}
