use serde::{Deserialize, Serialize};

use crate::matching::error::MatchError;
use crate::matching::relevance::StrategyKind;

/// How the skills and alignment subscores combine into the overall score.
///
/// `overall = (skills_weight × skills + alignment_weight × alignment)
///            / (skills_weight + alignment_weight)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBlend {
    pub skills_weight: f64,
    pub alignment_weight: f64,
}

impl Default for ScoreBlend {
    /// Skills-dominant: 70 % skills, 30 % alignment.
    fn default() -> Self {
        Self {
            skills_weight: 0.7,
            alignment_weight: 0.3,
        }
    }
}

impl ScoreBlend {
    pub fn new(skills_weight: f64, alignment_weight: f64) -> Result<Self, MatchError> {
        let blend = Self {
            skills_weight,
            alignment_weight,
        };
        blend.validate()?;
        Ok(blend)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let valid = |w: f64| w.is_finite() && w >= 0.0;
        if !valid(self.skills_weight) || !valid(self.alignment_weight) {
            return Err(MatchError::InvalidConfig(
                "blend weights must be finite and non-negative".to_string(),
            ));
        }
        let total = self.skills_weight + self.alignment_weight;
        if !total.is_finite() {
            return Err(MatchError::InvalidConfig(
                "blend weights are too large to combine".to_string(),
            ));
        }
        if total <= 0.0 {
            return Err(MatchError::InvalidConfig(
                "blend weights must not both be zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Weighted mean of the two subscores, clamped to [0, 100]. Weights are
    /// scaled by the larger one first so the products cannot overflow.
    pub fn combine(&self, skills: f64, alignment: f64) -> f64 {
        let heaviest = self.skills_weight.max(self.alignment_weight);
        if heaviest.is_nan() || heaviest <= 0.0 {
            return 0.0;
        }
        let (ws, wa) = (
            self.skills_weight / heaviest,
            self.alignment_weight / heaviest,
        );
        let combined = (ws * skills + wa * alignment) / (ws + wa);
        if combined.is_finite() {
            combined.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// Tunables of the matching engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub blend: ScoreBlend,
    /// Minimum entry strength (0.0 – 1.0) needed to clear the role-relevance gate.
    pub relevance_threshold: f64,
    /// Share of a skill's weight credited when it only appears in an experience
    /// description. 0.0 disables description matching.
    pub experience_mention_credit: f64,
    pub strategy: StrategyKind,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            blend: ScoreBlend::default(),
            relevance_threshold: 0.2,
            experience_mention_credit: 0.0,
            strategy: StrategyKind::TokenOverlap,
        }
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        self.blend.validate()?;
        let unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !unit(self.relevance_threshold) {
            return Err(MatchError::InvalidConfig(format!(
                "relevance_threshold must be within 0..=1, got {}",
                self.relevance_threshold
            )));
        }
        if !unit(self.experience_mention_credit) {
            return Err(MatchError::InvalidConfig(format!(
                "experience_mention_credit must be within 0..=1, got {}",
                self.experience_mention_credit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid_and_skills_dominant() {
        let config = MatchingConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.blend.skills_weight > config.blend.alignment_weight);
    }

    #[test]
    fn test_combine_default_blend() {
        let blend = ScoreBlend::default();
        // 0.7*100 + 0.3*50 = 85
        assert!((blend.combine(100.0, 50.0) - 85.0).abs() < 1e-9);
        assert_eq!(blend.combine(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_combine_normalizes_unscaled_weights() {
        let blend = ScoreBlend::new(1.0, 1.0).unwrap();
        assert!((blend.combine(80.0, 40.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_blends_rejected() {
        assert!(ScoreBlend::new(0.0, 0.0).is_err());
        assert!(ScoreBlend::new(-1.0, 2.0).is_err());
        assert!(ScoreBlend::new(f64::NAN, 1.0).is_err());
        assert!(ScoreBlend::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn test_overflowing_blend_rejected() {
        let err = ScoreBlend::new(1e308, 1e308).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig(_)));
    }

    #[test]
    fn test_combine_large_finite_weights() {
        let blend = ScoreBlend::new(1e307, 1e307).unwrap();
        assert!((blend.combine(80.0, 40.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = MatchingConfig {
            relevance_threshold: 1.5,
            ..MatchingConfig::default()
        };
        assert!(matches!(config.validate(), Err(MatchError::InvalidConfig(_))));
    }
}
