//! Experience/responsibility alignment: how strongly the best experience
//! entry echoes the job's responsibilities, as opposed to the binary gate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::matching::relevance::RelevanceStrategy;
use crate::matching::tokenizer::agent_roots;
use crate::models::{ExperienceEntry, JobDescriptionRecord};

/// Where the responsibility keywords were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSource {
    KeyResponsibilities,
    Description,
    JobTitle,
}

/// `entry_index` is the entry that echoes the most responsibility keywords.
/// It can differ from the gate's `best_entry`, which is picked by relevance
/// strength against the title as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentBreakdown {
    pub subscore: f64,
    pub keyword_source: KeywordSource,
    pub entry_index: Option<usize>,
    pub entry_role: Option<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Responsibility keywords, falling back to the description and then the title
/// when the extraction produced no responsibilities.
fn responsibility_keywords(
    job: &JobDescriptionRecord,
    strategy: &dyn RelevanceStrategy,
) -> (BTreeSet<String>, KeywordSource) {
    let from_responsibilities: BTreeSet<String> = job
        .key_responsibilities
        .iter()
        .flat_map(|r| strategy.tokenize(r))
        .collect();
    if !from_responsibilities.is_empty() {
        return (from_responsibilities, KeywordSource::KeyResponsibilities);
    }

    let from_description = strategy.tokenize(&job.description);
    if !from_description.is_empty() {
        return (from_description, KeywordSource::Description);
    }

    (strategy.tokenize(&job.job_title), KeywordSource::JobTitle)
}

pub(crate) fn score_alignment(
    job: &JobDescriptionRecord,
    experience: &[ExperienceEntry],
    strategy: &dyn RelevanceStrategy,
) -> AlignmentBreakdown {
    let (keywords, keyword_source) = responsibility_keywords(job, strategy);

    let mut best: Option<(usize, Vec<String>)> = None;
    for (index, entry) in experience.iter().enumerate() {
        // A "Python Developer" entry covers "Develop ..." responsibilities.
        let tokens = agent_roots(&strategy.tokenize(&entry.searchable_text()));
        let echoed: Vec<String> = keywords
            .iter()
            .filter(|k| tokens.contains(*k))
            .cloned()
            .collect();
        if best.as_ref().map_or(true, |(_, m)| echoed.len() > m.len()) {
            best = Some((index, echoed));
        }
    }

    let (entry_index, matched_keywords) = match best {
        Some((index, matched)) => (Some(index), matched),
        None => (None, Vec::new()),
    };

    let subscore = if keywords.is_empty() {
        0.0
    } else {
        matched_keywords.len() as f64 / keywords.len() as f64 * 100.0
    };
    let missing_keywords = keywords
        .into_iter()
        .filter(|k| !matched_keywords.contains(k))
        .collect();

    AlignmentBreakdown {
        subscore,
        keyword_source,
        entry_index,
        entry_role: entry_index.map(|i| experience[i].role.clone()),
        matched_keywords,
        missing_keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::relevance::TokenOverlap;

    #[test]
    fn test_full_alignment() {
        let job = JobDescriptionRecord {
            key_responsibilities: vec!["Develop Python applications".to_string()],
            ..JobDescriptionRecord::new("Python Developer")
        };
        let experience = vec![ExperienceEntry::new(
            "Python Developer",
            "Developed Python applications for clients",
        )];
        let breakdown = score_alignment(&job, &experience, &TokenOverlap);
        assert_eq!(breakdown.subscore, 100.0);
        assert_eq!(breakdown.keyword_source, KeywordSource::KeyResponsibilities);
        assert!(breakdown.missing_keywords.is_empty());
    }

    #[test]
    fn test_strongest_entry_wins() {
        let job = JobDescriptionRecord {
            key_responsibilities: vec![
                "Design REST APIs".to_string(),
                "Operate Kubernetes clusters".to_string(),
            ],
            ..JobDescriptionRecord::new("Backend Engineer")
        };
        let experience = vec![
            ExperienceEntry::new("Support Engineer", "Answered tickets about REST APIs"),
            ExperienceEntry::new("Platform Engineer", "Designed REST APIs on Kubernetes clusters"),
        ];
        let breakdown = score_alignment(&job, &experience, &TokenOverlap);
        assert_eq!(breakdown.entry_index, Some(1));
        assert_eq!(breakdown.entry_role.as_deref(), Some("Platform Engineer"));
        assert!(breakdown.subscore > 50.0);
    }

    #[test]
    fn test_falls_back_to_description_then_title() {
        let mut job = JobDescriptionRecord::new("Data Engineer");
        job.description = "Own the Spark pipelines".to_string();
        let experience = vec![ExperienceEntry::new("Engineer", "Tuned Spark pipelines")];

        let breakdown = score_alignment(&job, &experience, &TokenOverlap);
        assert_eq!(breakdown.keyword_source, KeywordSource::Description);

        job.description.clear();
        let breakdown = score_alignment(&job, &experience, &TokenOverlap);
        assert_eq!(breakdown.keyword_source, KeywordSource::JobTitle);
        assert_eq!(breakdown.matched_keywords, vec!["engineer"]);
    }

    #[test]
    fn test_agent_noun_in_role_covers_verb_responsibility() {
        let job = JobDescriptionRecord {
            key_responsibilities: vec!["Develop Python applications".to_string()],
            ..JobDescriptionRecord::new("Python Developer")
        };
        let experience = vec![ExperienceEntry::new("Python Developer", "Built web apps")];
        let breakdown = score_alignment(&job, &experience, &TokenOverlap);
        assert_eq!(breakdown.matched_keywords, vec!["develop", "python"]);
        assert_eq!(breakdown.missing_keywords, vec!["application"]);
    }

    #[test]
    fn test_no_experience_scores_zero() {
        let job = JobDescriptionRecord::new("Python Developer");
        let breakdown = score_alignment(&job, &[], &TokenOverlap);
        assert_eq!(breakdown.subscore, 0.0);
        assert_eq!(breakdown.entry_index, None);
        assert_eq!(breakdown.missing_keywords.len(), 2);
    }
}
