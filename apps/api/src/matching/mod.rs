// ATS matching: role-relevance gate, weighted skills, responsibility alignment.
// Pure and synchronous. Extraction output arrives as records or raw JSON.

pub mod alignment;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod relevance;
pub mod report;
pub mod skills;
pub mod tokenizer;

pub use config::{MatchingConfig, ScoreBlend};
pub use engine::{parse_job_description, parse_resume, parse_weightage, MatchingEngine};
pub use error::MatchError;
pub use relevance::StrategyKind;
pub use report::{ScoreReport, Verdict};
