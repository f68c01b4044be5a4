//! Matching engine: pure, deterministic ATS scoring of one resume against one JD.
//!
//! Stages, in order:
//! 1. Role-relevance gate: no related experience entry → score 0.0 with
//!    `rejection_reason`, nothing else runs.
//! 2. Skills-weightage subscore.
//! 3. Experience/responsibility alignment subscore.
//! 4. Blend, clamp to [0, 100], round to one decimal.
//!
//! The engine holds only configuration and is shared read-only across requests.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::matching::alignment::score_alignment;
use crate::matching::config::{MatchingConfig, ScoreBlend};
use crate::matching::error::MatchError;
use crate::matching::relevance::{assess, JobTerms, RelevanceStrategy};
use crate::matching::report::{
    build_recommendation, round_score, DetailedAnalysis, ExperienceFit, ScoreReport, Verdict,
    NO_RELEVANT_EXPERIENCE,
};
use crate::matching::skills::score_skills;
use crate::models::{JobDescriptionRecord, ResumeRecord, SkillsWeightage};

pub struct MatchingEngine {
    config: MatchingConfig,
    strategy: Box<dyn RelevanceStrategy>,
}

impl MatchingEngine {
    /// Builds an engine using the strategy named in `config`.
    pub fn new(config: MatchingConfig) -> Result<Self, MatchError> {
        let strategy = config.strategy.build();
        Self::with_strategy(config, strategy)
    }

    /// Builds an engine with a caller-provided relevance strategy.
    pub fn with_strategy(
        config: MatchingConfig,
        strategy: Box<dyn RelevanceStrategy>,
    ) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { config, strategy })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Scores `resume` against `job` with the configured blend.
    pub fn calculate_ats_score(
        &self,
        job: &JobDescriptionRecord,
        resume: &ResumeRecord,
        weightage: &SkillsWeightage,
    ) -> Result<ScoreReport, MatchError> {
        self.calculate_ats_score_with_blend(job, resume, weightage, self.config.blend)
    }

    /// Same as [`calculate_ats_score`](Self::calculate_ats_score) with a per-call blend.
    pub fn calculate_ats_score_with_blend(
        &self,
        job: &JobDescriptionRecord,
        resume: &ResumeRecord,
        weightage: &SkillsWeightage,
        blend: ScoreBlend,
    ) -> Result<ScoreReport, MatchError> {
        if job.job_title.trim().is_empty() {
            return Err(MatchError::InvalidInput(
                "job_title must not be empty".to_string(),
            ));
        }
        blend.validate()?;

        let strategy = self.strategy.as_ref();
        let job_terms = JobTerms::from_record(job, strategy);
        let role_relevance = assess(
            &job_terms,
            &resume.experience,
            strategy,
            self.config.relevance_threshold,
        );
        let experience_fit = ExperienceFit::assess(job, resume);

        if !role_relevance.passed {
            debug!(
                candidate = %resume.full_name,
                job_title = %job.job_title,
                strength = role_relevance.strength,
                "Role-relevance gate rejected candidate"
            );
            return Ok(ScoreReport {
                overall_score: 0.0,
                verdict: Verdict::Rejected,
                candidate_name: resume.full_name.clone(),
                job_title: job.job_title.clone(),
                detailed_analysis: DetailedAnalysis {
                    rejection_reason: Some(NO_RELEVANT_EXPERIENCE.to_string()),
                    role_relevance,
                    skills: None,
                    alignment: None,
                    experience_fit,
                    blend,
                },
                recommendation: build_recommendation(0.0, None),
            });
        }

        let mut skills = score_skills(weightage, resume, self.config.experience_mention_credit);
        let mut alignment = score_alignment(job, &resume.experience, strategy);
        let overall_score = round_score(blend.combine(skills.subscore, alignment.subscore));
        skills.subscore = round_score(skills.subscore);
        alignment.subscore = round_score(alignment.subscore);

        debug!(
            candidate = %resume.full_name,
            job_title = %job.job_title,
            overall_score,
            skills = skills.subscore,
            alignment = alignment.subscore,
            "Scored candidate"
        );

        let recommendation = build_recommendation(overall_score, Some(&skills));
        Ok(ScoreReport {
            overall_score,
            verdict: Verdict::Evaluated,
            candidate_name: resume.full_name.clone(),
            job_title: job.job_title.clone(),
            detailed_analysis: DetailedAnalysis {
                rejection_reason: None,
                role_relevance,
                skills: Some(skills),
                alignment: Some(alignment),
                experience_fit,
                blend,
            },
            recommendation,
        })
    }

    /// Scores raw extraction dictionaries. Shape errors surface as
    /// `MatchError::InvalidInput`; sparse fields degrade to empty values.
    pub fn calculate_ats_score_json(
        &self,
        job: &Value,
        resume: &Value,
        weightage: &Value,
    ) -> Result<ScoreReport, MatchError> {
        let job = parse_job_description(job)?;
        let resume = parse_resume(resume)?;
        let weightage = parse_weightage(weightage)?;
        self.calculate_ats_score(&job, &resume, &weightage)
    }
}

pub fn parse_job_description(value: &Value) -> Result<JobDescriptionRecord, MatchError> {
    require_object(value, "job_description")?;
    JobDescriptionRecord::deserialize(value)
        .map_err(|e| MatchError::invalid_field("job_description", e))
}

pub fn parse_resume(value: &Value) -> Result<ResumeRecord, MatchError> {
    require_object(value, "resume")?;
    ResumeRecord::deserialize(value).map_err(|e| MatchError::invalid_field("resume", e))
}

pub fn parse_weightage(value: &Value) -> Result<SkillsWeightage, MatchError> {
    SkillsWeightage::deserialize(value).map_err(|e| MatchError::invalid_field("skills_weightage", e))
}

fn require_object(value: &Value, field: &str) -> Result<(), MatchError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(MatchError::InvalidInput(format!("{field} must be an object")))
    }
}
