// Prompt constants for job-description skill extraction.

/// System prompt for skill extraction. JSON only.
pub const SKILL_EXTRACT_SYSTEM: &str = "You are an expert technical recruiter. \
    You read job descriptions and list the technical skills they require. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Skill extraction prompt template. Replace `{jd_text}` before sending.
pub const SKILL_EXTRACT_PROMPT_TEMPLATE: &str = r#"List the key technical skills, tools and technologies required by the job description below.

Rules:
- Categorize each skill as "Practice and Technologies" or "Tools and Platforms".
- Every skill object has exactly these fields:
  - "Domain": the broad area, e.g. Data Engineering, DevOps, Cloud Computing
  - "Category": "Practice and Technologies" or "Tools and Platforms"
  - "Sub-category": the skill name itself
  - "Skill_Description": one short sentence on what the skill entails

Return a JSON object with this EXACT schema:
{
  "Skills": [
    {
      "Domain": "Cloud Computing",
      "Category": "Practice and Technologies",
      "Sub-category": "Cloud Platforms",
      "Skill_Description": "Experience with cloud platforms like Azure and GCP."
    }
  ]
}

Return only the JSON object.

JOB DESCRIPTION:
{jd_text}"#;
