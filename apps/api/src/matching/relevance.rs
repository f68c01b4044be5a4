//! Role-relevance gate: decides whether any experience entry is topically
//! related to the job before any weighted scoring runs.
//!
//! The similarity measure is a pluggable `RelevanceStrategy` so tokenization
//! and thresholds can be tested apart from aggregation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::matching::tokenizer::significant_tokens;
use crate::models::{ExperienceEntry, JobDescriptionRecord};

// ────────────────────────────────────────────────────────────────────────────
// Strategy trait
// ────────────────────────────────────────────────────────────────────────────

/// Lexical similarity between a target token set (job side) and a candidate
/// token set (experience side). Implementations must return a value in [0, 1].
pub trait RelevanceStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn tokenize(&self, text: &str) -> BTreeSet<String> {
        significant_tokens(text)
    }

    fn similarity(&self, target: &BTreeSet<String>, candidate: &BTreeSet<String>) -> f64;
}

/// Share of target tokens present in the candidate. Default strategy: a long
/// experience description is not penalised for mentioning other topics.
pub struct TokenOverlap;

impl RelevanceStrategy for TokenOverlap {
    fn name(&self) -> &'static str {
        "token_overlap"
    }

    fn similarity(&self, target: &BTreeSet<String>, candidate: &BTreeSet<String>) -> f64 {
        if target.is_empty() {
            return 0.0;
        }
        target.intersection(candidate).count() as f64 / target.len() as f64
    }
}

/// Intersection over union. Stricter than `TokenOverlap` for verbose entries.
pub struct Jaccard;

impl RelevanceStrategy for Jaccard {
    fn name(&self) -> &'static str {
        "jaccard"
    }

    fn similarity(&self, target: &BTreeSet<String>, candidate: &BTreeSet<String>) -> f64 {
        let union = target.union(candidate).count();
        if union == 0 {
            return 0.0;
        }
        target.intersection(candidate).count() as f64 / union as f64
    }
}

/// Strategy selector used by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    TokenOverlap,
    Jaccard,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn RelevanceStrategy> {
        match self {
            StrategyKind::TokenOverlap => Box::new(TokenOverlap),
            StrategyKind::Jaccard => Box::new(Jaccard),
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "token_overlap" | "overlap" => Ok(StrategyKind::TokenOverlap),
            "jaccard" => Ok(StrategyKind::Jaccard),
            other => Err(format!("unknown relevance strategy '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gate
// ────────────────────────────────────────────────────────────────────────────

/// Relevance of the strongest experience entry, reported in the score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRelevance {
    pub passed: bool,
    pub strength: f64,
    pub threshold: f64,
    pub strategy: String,
    pub best_entry: Option<usize>,
    pub best_role: Option<String>,
    pub best_company: Option<String>,
    pub shared_terms: Vec<String>,
}

/// Job-side token sets, built once per scoring call.
pub(crate) struct JobTerms {
    pub title: BTreeSet<String>,
    pub responsibilities: BTreeSet<String>,
}

impl JobTerms {
    pub fn from_record(job: &JobDescriptionRecord, strategy: &dyn RelevanceStrategy) -> Self {
        Self {
            title: strategy.tokenize(&job.job_title),
            responsibilities: job
                .key_responsibilities
                .iter()
                .flat_map(|r| strategy.tokenize(r))
                .collect(),
        }
    }
}

/// Responsibility terms an entry must share before the responsibilities count
/// as evidence. One shared word ("applications", "develop") is too generic.
const MIN_SHARED_RESPONSIBILITY_TERMS: usize = 2;

/// Strength of one entry and the job terms it shares.
fn entry_relevance(
    job: &JobTerms,
    entry: &ExperienceEntry,
    strategy: &dyn RelevanceStrategy,
) -> (f64, BTreeSet<String>) {
    let tokens = strategy.tokenize(&entry.searchable_text());
    let mut shared: BTreeSet<String> = job.title.intersection(&tokens).cloned().collect();
    let mut strength = strategy.similarity(&job.title, &tokens);

    let responsibility_shared: Vec<&String> =
        job.responsibilities.intersection(&tokens).collect();
    if responsibility_shared.len() >= MIN_SHARED_RESPONSIBILITY_TERMS {
        strength = strength.max(strategy.similarity(&job.responsibilities, &tokens));
        shared.extend(responsibility_shared.into_iter().cloned());
    }

    (strength.clamp(0.0, 1.0), shared)
}

/// Scores every entry against the title and the responsibilities, keeping the
/// strongest. Title terms count on their own; responsibility terms only when
/// at least two are shared. An entry clears the gate only when its strength
/// reaches `threshold` and it shares at least one counted term with the job.
pub(crate) fn assess(
    job: &JobTerms,
    experience: &[ExperienceEntry],
    strategy: &dyn RelevanceStrategy,
    threshold: f64,
) -> RoleRelevance {
    let mut best: Option<(usize, f64, Vec<String>)> = None;

    for (index, entry) in experience.iter().enumerate() {
        let (strength, shared) = entry_relevance(job, entry, strategy);

        // Strictly greater keeps the earliest entry on ties.
        if best.as_ref().map_or(true, |(_, s, _)| strength > *s) {
            best = Some((index, strength, shared.into_iter().collect()));
        }
    }

    let (best_entry, strength, shared_terms) = match best {
        Some((index, strength, shared)) => (Some(index), strength, shared),
        None => (None, 0.0, Vec::new()),
    };
    let passed = !shared_terms.is_empty() && strength >= threshold;
    let entry = best_entry.map(|i| &experience[i]);

    RoleRelevance {
        passed,
        strength,
        threshold,
        strategy: strategy.name().to_string(),
        best_entry,
        best_role: entry.map(|e| e.role.clone()),
        best_company: entry.map(|e| e.company.clone()).filter(|c| !c.is_empty()),
        shared_terms,
    }
}
