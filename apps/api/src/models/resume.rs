use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// One position in the candidate's work history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(
        default,
        alias = "title",
        alias = "position",
        deserialize_with = "lenient::string"
    )]
    pub role: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: String,
    /// Free-form ("3 years", "2019 - present"); never parsed for scoring.
    #[serde(default, deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}

impl ExperienceEntry {
    pub fn new(role: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Text the relevance and alignment stages read: role followed by description.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.role, self.description)
    }
}

/// Structured resume as produced by the extraction service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default, alias = "name", deserialize_with = "lenient::string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub current_role: Option<String>,
    #[serde(default, deserialize_with = "lenient::years")]
    pub total_experience: f64,
    #[serde(
        default,
        alias = "experience_timeline",
        deserialize_with = "lenient::null_as_default"
    )]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "lenient::comma_list")]
    pub skills: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_resume_defaults() {
        let resume: ResumeRecord = serde_json::from_str("{}").unwrap();
        assert!(resume.full_name.is_empty());
        assert_eq!(resume.total_experience, 0.0);
        assert!(resume.experience.is_empty());
        assert!(resume.skills.is_empty());
    }

    #[test]
    fn test_schema_drift_is_absorbed() {
        let resume: ResumeRecord = serde_json::from_str(
            r#"{
                "name": "Jane Smith",
                "total_experience": "4+ years",
                "experience_timeline": [
                    {"title": "Backend Engineer", "company": null, "duration": 2}
                ],
                "skills": "Rust, Go"
            }"#,
        )
        .unwrap();
        assert_eq!(resume.full_name, "Jane Smith");
        assert_eq!(resume.total_experience, 4.0);
        assert_eq!(resume.experience[0].role, "Backend Engineer");
        assert_eq!(resume.experience[0].duration, "2");
        assert!(resume.experience[0].company.is_empty());
        assert_eq!(resume.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_negative_experience_clamps_to_zero() {
        let resume: ResumeRecord =
            serde_json::from_str(r#"{"total_experience": -2}"#).unwrap();
        assert_eq!(resume.total_experience, 0.0);
    }

    #[test]
    fn test_experience_must_be_a_list_of_mappings() {
        assert!(serde_json::from_str::<ResumeRecord>(r#"{"experience": "5 years at Acme"}"#).is_err());
        assert!(serde_json::from_str::<ResumeRecord>(r#"{"experience": ["Acme"]}"#).is_err());
        assert!(serde_json::from_str::<ResumeRecord>(r#"{"experience": null}"#).is_ok());
    }
}
