//! Skills-weightage scoring.
//!
//! Algorithm:
//! 1. Normalize weightage keys and resume skills once (trim + lower-case).
//!    Duplicate keys keep the largest weight; negative weights count as 0.
//! 2. A key listed in the resume skills (exact, or on term boundaries inside a
//!    longer skill such as "python 3") earns its full weight.
//! 3. Otherwise a key mentioned in an experience description earns
//!    `experience_mention_credit × weight` (0 by default).
//! 4. subscore = matched_weight / total_weight × 100, or 0 when total is 0.
//!    The ratio is taken over weights scaled by the heaviest one, so huge
//!    finite weights cannot overflow into `inf / inf`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matching::tokenizer::{contains_term, normalize_term};
use crate::models::{ResumeRecord, SkillsWeightage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    SkillList,
    ExperienceDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub weight: f64,
    /// Fraction of `weight` credited, 0.0 – 1.0.
    pub credit: f64,
    pub source: MatchSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsBreakdown {
    pub subscore: f64,
    pub matched_weight: f64,
    pub total_weight: f64,
    pub matched: Vec<SkillMatch>,
    pub missing: Vec<String>,
}

/// Weightage keys in canonical form, sorted by key.
pub(crate) fn normalize_weightage(weightage: &SkillsWeightage) -> BTreeMap<String, f64> {
    let mut normalized: BTreeMap<String, f64> = BTreeMap::new();
    for (skill, weight) in weightage.iter() {
        let key = normalize_term(skill);
        if key.is_empty() {
            continue;
        }
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        let slot = normalized.entry(key).or_insert(0.0);
        *slot = slot.max(weight);
    }
    normalized
}

pub(crate) fn score_skills(
    weightage: &SkillsWeightage,
    resume: &ResumeRecord,
    experience_mention_credit: f64,
) -> SkillsBreakdown {
    let weights = normalize_weightage(weightage);
    let resume_skills: Vec<String> = resume
        .skills
        .iter()
        .map(|s| normalize_term(s))
        .filter(|s| !s.is_empty())
        .collect();
    let descriptions: Vec<String> = if experience_mention_credit > 0.0 {
        resume
            .experience
            .iter()
            .map(|e| e.description.to_lowercase())
            .collect()
    } else {
        Vec::new()
    };

    let heaviest = weights.values().copied().fold(0.0_f64, f64::max);

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut matched_weight = 0.0_f64;
    let mut total_weight = 0.0_f64;
    let mut matched_share = 0.0_f64;
    let mut total_share = 0.0_f64;

    for (skill, weight) in weights {
        let share = if heaviest > 0.0 { weight / heaviest } else { 0.0 };
        total_weight = saturating_add(total_weight, weight);
        total_share += share;

        let listed = resume_skills
            .iter()
            .any(|s| *s == skill || contains_term(s, &skill));
        let mentioned = !listed && descriptions.iter().any(|d| contains_term(d, &skill));

        let (credit, source) = if listed {
            (1.0, MatchSource::SkillList)
        } else if mentioned {
            (experience_mention_credit, MatchSource::ExperienceDescription)
        } else {
            missing.push(skill);
            continue;
        };

        matched_weight = saturating_add(matched_weight, credit * weight);
        matched_share += credit * share;
        matched.push(SkillMatch {
            skill,
            weight,
            credit,
            source,
        });
    }

    let subscore = if total_share > 0.0 {
        (matched_share / total_share * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    SkillsBreakdown {
        subscore,
        matched_weight,
        total_weight,
        matched,
        missing,
    }
}

/// Reported totals stay finite even when the weights sum past `f64::MAX`.
fn saturating_add(a: f64, b: f64) -> f64 {
    (a + b).min(f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperienceEntry;

    fn resume(skills: &[&str]) -> ResumeRecord {
        ResumeRecord {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..ResumeRecord::default()
        }
    }

    #[test]
    fn test_case_insensitive_full_match() {
        let weightage = SkillsWeightage::new().with("Python", 100.0);
        let breakdown = score_skills(&weightage, &resume(&["python", "Flask"]), 0.0);
        assert_eq!(breakdown.subscore, 100.0);
        assert_eq!(breakdown.matched.len(), 1);
        assert_eq!(breakdown.matched[0].skill, "python");
        assert_eq!(breakdown.matched[0].source, MatchSource::SkillList);
        assert!(breakdown.missing.is_empty());
    }

    #[test]
    fn test_partial_weight_fraction() {
        let weightage = SkillsWeightage::new().with("python", 50.0).with("django", 50.0);
        let breakdown = score_skills(&weightage, &resume(&["Python"]), 0.0);
        assert!((breakdown.subscore - 50.0).abs() < f64::EPSILON);
        assert_eq!(breakdown.missing, vec!["django"]);
    }

    #[test]
    fn test_term_boundary_substring_match() {
        let weightage = SkillsWeightage::new().with("python", 1.0).with("c", 1.0);
        let breakdown = score_skills(&weightage, &resume(&["Python 3.11", "Excel"]), 0.0);
        assert_eq!(breakdown.matched.len(), 1);
        assert_eq!(breakdown.missing, vec!["c"]);
    }

    #[test]
    fn test_c_does_not_match_cpp_or_csharp() {
        let weightage = SkillsWeightage::new().with("c", 100.0);
        let breakdown = score_skills(&weightage, &resume(&["C++", "C#"]), 0.0);
        assert_eq!(breakdown.subscore, 0.0);
        assert_eq!(breakdown.missing, vec!["c"]);
    }

    #[test]
    fn test_huge_weights_stay_finite() {
        let weightage: SkillsWeightage = [("python", 1e308), ("django", 1e308), ("docker", 1e308)]
            .into_iter()
            .collect();
        let breakdown = score_skills(&weightage, &resume(&["Python", "Django"]), 0.0);
        assert!(breakdown.subscore.is_finite());
        assert!((breakdown.subscore - 200.0 / 3.0).abs() < 1e-9);
        assert!(breakdown.total_weight.is_finite());
        assert!(breakdown.matched_weight.is_finite());
    }

    #[test]
    fn test_empty_weightage_scores_zero() {
        let breakdown = score_skills(&SkillsWeightage::new(), &resume(&["Python"]), 0.0);
        assert_eq!(breakdown.subscore, 0.0);
        assert_eq!(breakdown.total_weight, 0.0);
    }

    #[test]
    fn test_zero_and_negative_weights_degrade_to_zero() {
        let weightage = SkillsWeightage::new().with("python", 0.0).with("go", -5.0);
        let breakdown = score_skills(&weightage, &resume(&["Python", "Go"]), 0.0);
        assert_eq!(breakdown.subscore, 0.0);
        assert_eq!(breakdown.total_weight, 0.0);
    }

    #[test]
    fn test_duplicate_keys_keep_largest_weight() {
        let weightage = SkillsWeightage::new().with("Python", 10.0).with("python ", 30.0);
        let normalized = normalize_weightage(&weightage);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized["python"], 30.0);
    }

    #[test]
    fn test_experience_mentions_ignored_by_default() {
        let mut candidate = resume(&[]);
        candidate.experience = vec![ExperienceEntry::new("Engineer", "Shipped Django services")];
        let weightage = SkillsWeightage::new().with("django", 10.0);

        let off = score_skills(&weightage, &candidate, 0.0);
        assert_eq!(off.subscore, 0.0);

        let on = score_skills(&weightage, &candidate, 0.5);
        assert!((on.subscore - 50.0).abs() < f64::EPSILON);
        assert_eq!(on.matched[0].source, MatchSource::ExperienceDescription);
    }
}
