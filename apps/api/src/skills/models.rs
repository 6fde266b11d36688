use serde::{Deserialize, Serialize};

/// A skill required by a job description, in the shape the frontend and the
/// matching prompt both use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    #[serde(rename = "Domain", default)]
    pub domain: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Sub-category", default)]
    pub sub_category: String,
    #[serde(rename = "Skill_Description", default)]
    pub skill_description: String,
}

/// Fields every extracted skill object must carry.
pub const REQUIRED_SKILL_FIELDS: [&str; 4] = ["Domain", "Category", "Sub-category", "Skill_Description"];

/// Header fields scraped from the job description text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHeader {
    pub job_title: String,
    pub department: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractSkillsResponse {
    pub job_title: String,
    pub department: String,
    pub required_skills: Vec<RequiredSkill>,
}
