use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::employees::models::numeric;

/// Rating assumed for a matched skill the model reported without numbers.
pub const DEFAULT_RATING: f64 = 3.0;

/// One employee's match against the required skills, as produced by the matching model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub employee_id: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub matching_skills: Vec<MatchedSkill>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub missing_skills: Vec<String>,
}

/// A matched skill: either the detailed object the prompt asks for, or a bare name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchedSkill {
    Rated {
        #[serde(default)]
        skill: String,
        #[serde(default, deserialize_with = "lenient_number")]
        skill_rate: Option<f64>,
        #[serde(default, deserialize_with = "lenient_number")]
        interest_rate: Option<f64>,
    },
    Name(String),
}

impl MatchedSkill {
    pub fn name(&self) -> &str {
        match self {
            MatchedSkill::Rated { skill, .. } => skill,
            MatchedSkill::Name(name) => name,
        }
    }

    /// `(skill_rate, interest_rate)`, defaulting missing values to 3.
    pub fn ratings(&self) -> (f64, f64) {
        match self {
            MatchedSkill::Rated {
                skill_rate,
                interest_rate,
                ..
            } => (
                skill_rate.unwrap_or(DEFAULT_RATING),
                interest_rate.unwrap_or(DEFAULT_RATING),
            ),
            MatchedSkill::Name(_) => (DEFAULT_RATING, DEFAULT_RATING),
        }
    }
}

/// Accepts numbers and numeric strings ("4", "85.5"); anything else becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(numeric))
}

/// Accepts a list of strings, or of objects naming a skill; other entries are dropped.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Object(map) => ["skill", "Sub-category", "name"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str).map(String::from)),
            _ => None,
        })
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSkill {
    pub skill: String,
    pub rating: f64,
    pub match_confidence: f64,
    pub interest_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeMatch {
    pub name: String,
    pub id: String,
    pub matched_skills: Vec<FormattedSkill>,
    pub missing_skills: Vec<String>,
    pub overall_match: f64,
}

#[derive(Debug, Serialize)]
pub struct MatchEmployeesResponse {
    pub matches: Vec<EmployeeMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_result_deserializes() {
        let raw = json!({
            "employee_id": "EMP_1a2b3c4d",
            "match_score": 85.5,
            "matching_skills": [{"skill": "Azure", "skill_rate": 4, "interest_rate": 5}],
            "missing_skills": ["Kubernetes"]
        });
        let result: MatchResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.match_score, Some(85.5));
        assert_eq!(result.matching_skills[0].ratings(), (4.0, 5.0));
        assert_eq!(result.missing_skills, vec!["Kubernetes"]);
    }

    #[test]
    fn test_bare_string_skills_default_to_three() {
        let raw = json!({"employee_id": "E", "matching_skills": ["Spark"]});
        let result: MatchResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.matching_skills[0].name(), "Spark");
        assert_eq!(result.matching_skills[0].ratings(), (3.0, 3.0));
        assert_eq!(result.match_score, None);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let raw = json!({
            "employee_id": "E",
            "match_score": "72.5%",
            "matching_skills": [{"skill": "Go", "skill_rate": "2"}]
        });
        let result: MatchResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.match_score, Some(72.5));
        assert_eq!(result.matching_skills[0].ratings(), (2.0, 3.0));
    }

    #[test]
    fn test_rated_skill_without_name_keeps_result() {
        let raw = json!({
            "employee_id": "E",
            "match_score": 60,
            "matching_skills": [{"skill_rate": 4, "interest_rate": 2}, {"skill": "Go", "skill_rate": 3}]
        });
        let result: MatchResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.matching_skills.len(), 2);
        assert_eq!(result.matching_skills[0].name(), "");
        assert_eq!(result.matching_skills[0].ratings(), (4.0, 2.0));
    }

    #[test]
    fn test_missing_skill_objects_are_named() {
        let raw = json!({
            "employee_id": "E",
            "missing_skills": [{"skill": "Terraform"}, 7, "Helm"]
        });
        let result: MatchResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.missing_skills, vec!["Terraform", "Helm"]);
    }

    #[test]
    fn test_formatted_match_uses_camel_case() {
        let m = EmployeeMatch {
            name: "Asha".into(),
            id: "EMP_1".into(),
            matched_skills: vec![FormattedSkill {
                skill: "Azure".into(),
                rating: 4.0,
                match_confidence: 1.0,
                interest_rate: 5.0,
            }],
            missing_skills: vec![],
            overall_match: 80.0,
        };
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["overallMatch"], 80.0);
        assert_eq!(value["matchedSkills"][0]["matchConfidence"], 1.0);
        assert_eq!(value["matchedSkills"][0]["interestRate"], 5.0);
    }
}
