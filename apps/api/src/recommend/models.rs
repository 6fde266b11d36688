use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Bio + courses (legacy endpoint)
// ────────────────────────────────────────────────────────────────────────────

/// One skill row as the profile pages send it. Both the underscore and the
/// database's spaced column names are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Domain", default)]
    pub domain: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Sub_Category", alias = "Sub Category", default)]
    pub sub_category: String,
    #[serde(rename = "Skill_Rate", alias = "Skill Rate", default)]
    pub skill_rate: f64,
    #[serde(rename = "Interest_Rate", alias = "Interest Rate", default)]
    pub interest_rate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub title: String,
    pub platform: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseResponse {
    pub bio: String,
    pub courses: Vec<Course>,
}

// ────────────────────────────────────────────────────────────────────────────
// Mentors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorRequest {
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub employee_domains: Vec<String>,
    #[serde(default)]
    pub employee_skills: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mentor {
    pub name: String,
    pub title: String,
    pub domains: Vec<String>,
    pub skill_level: f64,
    pub compatibility: f64,
}

#[derive(Debug, Serialize)]
pub struct MentorResponse {
    pub mentors: Vec<Mentor>,
}

// ────────────────────────────────────────────────────────────────────────────
// Per-skill course cards
// ────────────────────────────────────────────────────────────────────────────

/// The skill row a course card is requested for, in database column naming.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillCourseRequest {
    #[serde(rename = "Sub Category", default)]
    pub sub_category: String,
    #[serde(rename = "Domain", default)]
    pub domain: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Skill Rate", default)]
    pub skill_rate: f64,
    #[serde(rename = "Interest Rate", default)]
    pub interest_rate: f64,
}

/// A course card. Deserialized from model output as well, where only
/// `title`, `provider` and `description` are mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecommendation {
    pub title: String,
    pub provider: String,
    pub description: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub match_score: f64,
}
