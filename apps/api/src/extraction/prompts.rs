// Prompts for turning free text into the records the matching engine consumes.
// Key names are the ones the lenient record parsers accept.

/// Job description structuring prompt.
/// Replace: {jd_text}
pub const STRUCTURE_JD_PROMPT_TEMPLATE: &str = r#"Analyze this job description and extract it into a JSON object with these keys:

{
  "job_title": "exact title of the role",
  "company": "company name or null",
  "location": "location or null",
  "experience_required": "e.g. '3+ years' or null",
  "job_type": "full-time, part-time, contract, internship or null",
  "description": "two or three sentence summary of the role",
  "primary_skills": ["must-have skills"],
  "secondary_skills": ["nice-to-have skills"],
  "responsibilities": ["one responsibility per item"],
  "qualifications": ["one qualification per item"]
}

Use null or [] for anything the text does not state. Never invent a job title.

JD:
{jd_text}"#;

/// Resume extraction prompt.
/// Replace: {resume_text}
pub const EXTRACT_RESUME_PROMPT_TEMPLATE: &str = r#"Extract this resume into a JSON object with these keys:

{
  "name": "full name",
  "email": "email or null",
  "current_role": "most recent title or null",
  "total_experience": "total years of professional experience as a number",
  "skills": ["one skill per item"],
  "experience_timeline": [
    {
      "role": "job title",
      "company": "employer",
      "duration": "e.g. 'Jan 2020 - Mar 2023'",
      "description": "what the candidate did in this role"
    }
  ]
}

List experience_timeline most recent first. Use null or [] for anything missing.

Resume:
{resume_text}"#;

/// Job description refinement prompt.
/// Replace: {current_json}, {feedback}
pub const REFINE_JD_PROMPT_TEMPLATE: &str = r#"Modify this job description structure based on the user's feedback.
Keep every key that the feedback does not touch exactly as it is.

Current:
{current_json}

Feedback:
{feedback}

Return the full updated structure as one JSON object with the same keys."#;
