use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Structured job description as produced by the extraction service.
///
/// Only `job_title` is required; every other field degrades to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub job_title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(
        default,
        alias = "responsibilities",
        deserialize_with = "lenient::line_list"
    )]
    pub key_responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub experience_required: Option<String>,
    #[serde(default, deserialize_with = "lenient::line_list")]
    pub qualifications: Vec<String>,
    #[serde(default, deserialize_with = "lenient::comma_list")]
    pub primary_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::comma_list")]
    pub secondary_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub job_type: Option<String>,
}

impl JobDescriptionRecord {
    pub fn new(job_title: impl Into<String>) -> Self {
        Self {
            job_title: job_title.into(),
            ..Self::default()
        }
    }
}
