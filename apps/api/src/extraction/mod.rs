//! Extraction: turns raw JD and resume text into the records the matching
//! engine scores.
//!
//! The engine never calls an LLM. Everything model-driven lives behind the
//! `Extractor` trait so handlers and tests can swap the backend.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::prompts::{
    EXTRACT_RESUME_PROMPT_TEMPLATE, REFINE_JD_PROMPT_TEMPLATE, STRUCTURE_JD_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::matching::{parse_job_description, parse_resume};
use crate::models::{JobDescriptionRecord, ResumeRecord};

#[async_trait]
pub trait Extractor: Send + Sync {
    async fn structure_job_description(&self, jd_text: &str)
        -> Result<JobDescriptionRecord, AppError>;

    async fn extract_resume(&self, resume_text: &str) -> Result<ResumeRecord, AppError>;

    /// Applies free-text feedback to a previously structured JD.
    async fn refine_job_description(
        &self,
        current: &Value,
        feedback: &str,
    ) -> Result<JobDescriptionRecord, AppError>;
}

/// Chat-completions backed extractor.
pub struct LlmExtractor {
    llm: LlmClient,
}

impl LlmExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Extractor for LlmExtractor {
    async fn structure_job_description(
        &self,
        jd_text: &str,
    ) -> Result<JobDescriptionRecord, AppError> {
        let prompt = STRUCTURE_JD_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
        let raw: Value = self.llm.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        let record = parse_job_description(&raw)?;
        info!(
            job_title = %record.job_title,
            primary_skills = record.primary_skills.len(),
            "Structured job description"
        );
        Ok(record)
    }

    async fn extract_resume(&self, resume_text: &str) -> Result<ResumeRecord, AppError> {
        let prompt = EXTRACT_RESUME_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let raw: Value = self.llm.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        let record = parse_resume(&raw)?;
        info!(
            entries = record.experience.len(),
            skills = record.skills.len(),
            "Extracted resume"
        );
        Ok(record)
    }

    async fn refine_job_description(
        &self,
        current: &Value,
        feedback: &str,
    ) -> Result<JobDescriptionRecord, AppError> {
        let prompt = render_refine_prompt(current, feedback)?;
        let raw: Value = self.llm.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        Ok(parse_job_description(&raw)?)
    }
}

fn render_refine_prompt(current: &Value, feedback: &str) -> Result<String, AppError> {
    if !current.is_object() {
        return Err(AppError::Validation(
            "current_structure must be an object".to_string(),
        ));
    }
    let current_json = serde_json::to_string_pretty(current)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize current_structure: {e}")))?;
    Ok(REFINE_JD_PROMPT_TEMPLATE
        .replace("{current_json}", &current_json)
        .replace("{feedback}", feedback))
}
