use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::alignment::AlignmentBreakdown;
use crate::matching::config::ScoreBlend;
use crate::matching::relevance::RoleRelevance;
use crate::matching::skills::SkillsBreakdown;
use crate::models::lenient::leading_number;
use crate::models::{JobDescriptionRecord, ResumeRecord};

pub const NO_RELEVANT_EXPERIENCE: &str = "No relevant job role experience";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Failed the role-relevance gate. `overall_score` is 0.0.
    Rejected,
    /// Passed the gate and was scored; the score may still be 0.0.
    Evaluated,
}

/// Candidate years against the years the JD asks for. Never affects the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceFit {
    pub candidate_years: f64,
    pub required_years: Option<f64>,
    pub meets_requirement: Option<bool>,
}

impl ExperienceFit {
    pub(crate) fn assess(job: &JobDescriptionRecord, resume: &ResumeRecord) -> Self {
        let required_years = job
            .experience_required
            .as_deref()
            .and_then(leading_number)
            .or_else(|| years_mentioned(&job.description));
        Self {
            candidate_years: resume.total_experience,
            required_years,
            meets_requirement: required_years.map(|req| resume.total_experience >= req),
        }
    }
}

/// "3 years", "5+ yrs" inside free-text descriptions.
fn years_mentioned(text: &str) -> Option<f64> {
    static YEARS: OnceLock<Regex> = OnceLock::new();
    let re = YEARS.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)").expect("valid years regex")
    });
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub rejection_reason: Option<String>,
    pub role_relevance: RoleRelevance,
    /// Absent when the gate rejected the candidate.
    pub skills: Option<SkillsBreakdown>,
    /// Absent when the gate rejected the candidate.
    pub alignment: Option<AlignmentBreakdown>,
    pub experience_fit: ExperienceFit,
    pub blend: ScoreBlend,
}

/// Full score report returned to callers. Plain data, serializable as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub overall_score: f64, // 0.0 – 100.0, one decimal
    pub verdict: Verdict,
    pub candidate_name: String,
    pub job_title: String,
    pub detailed_analysis: DetailedAnalysis,
    pub recommendation: String,
}

impl ScoreReport {
    pub fn is_rejected(&self) -> bool {
        self.verdict == Verdict::Rejected
    }

    pub fn skills_subscore(&self) -> f64 {
        self.detailed_analysis
            .skills
            .as_ref()
            .map_or(0.0, |s| s.subscore)
    }

    pub fn alignment_subscore(&self) -> f64 {
        self.detailed_analysis
            .alignment
            .as_ref()
            .map_or(0.0, |a| a.subscore)
    }
}

/// One-decimal rounding used for every reported score. Non-finite input is 0.
pub(crate) fn round_score(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    ((score * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

/// Human-readable summary line for a reviewer.
pub(crate) fn build_recommendation(score: f64, skills: Option<&SkillsBreakdown>) -> String {
    let Some(skills) = skills else {
        return "Not a fit: no work history related to this role.".to_string();
    };
    let top_gaps: Vec<&str> = skills.missing.iter().take(3).map(String::as_str).collect();

    if score >= 75.0 {
        "Strong fit. Relevant experience and most weighted skills are present.".to_string()
    } else if score >= 50.0 {
        if top_gaps.is_empty() {
            format!("Moderate fit ({score}/100). Experience only partly echoes the responsibilities.")
        } else {
            format!("Moderate fit ({score}/100). Missing skills: {}.", top_gaps.join(", "))
        }
    } else if top_gaps.is_empty() {
        format!("Low fit ({score}/100). Related role, but little overlap with the responsibilities.")
    } else {
        format!(
            "Low fit ({score}/100). Related role, but missing: {}.",
            top_gaps.join(", ")
        )
    }
}
