pub mod history;
pub mod jd_library;
pub mod job_description;
pub mod lenient;
pub mod resume;
pub mod weightage;

pub use job_description::JobDescriptionRecord;
pub use resume::{ExperienceEntry, ResumeRecord};
pub use weightage::SkillsWeightage;
