//! Query specs for the analytics assistant and their evaluation over
//! in-memory skill rows.
//!
//! A spec is normally produced by the intent classifier; `keyword_spec`
//! builds one from the raw question when classification is unavailable.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::assistant::charts::ChartKind;
use crate::employees::models::EmployeeSkillRow;

pub const DEFAULT_LIMIT: usize = 10;

/// Upskilling candidates are rated at most this...
const UPSKILL_MAX_SKILL: f64 = 3.0;
/// ...and at least this interested.
const UPSKILL_MIN_INTEREST: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    TopPerformers,
    UpskillingNeeds,
    #[default]
    #[serde(other)]
    General,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryFilters {
    pub domain: Option<String>,
    pub category: Option<String>,
    pub skill: Option<String>,
    #[serde(deserialize_with = "lenient_rating")]
    pub min_skill_rating: Option<f64>,
    #[serde(deserialize_with = "lenient_rating")]
    pub max_skill_rating: Option<f64>,
    #[serde(deserialize_with = "lenient_rating")]
    pub min_interest_rating: Option<f64>,
    pub access: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    #[serde(other)]
    Desc,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    pub category: QueryCategory,
    pub filters: QueryFilters,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    #[serde(deserialize_with = "lenient_limit")]
    pub limit: usize,
    pub visualization: bool,
    #[serde(deserialize_with = "lenient_chart")]
    pub chart_type: Option<ChartKind>,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            category: QueryCategory::General,
            filters: QueryFilters::default(),
            sort_by: None,
            sort_order: SortOrder::Desc,
            limit: DEFAULT_LIMIT,
            visualization: false,
            chart_type: None,
        }
    }
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_limit<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let limit = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(limit
        .and_then(|l| usize::try_from(l).ok())
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_LIMIT))
}

fn lenient_chart<'de, D>(deserializer: D) -> Result<Option<ChartKind>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => ChartKind::from_word(&s),
        _ => None,
    })
}

/// Spec for a question the classifier could not handle: "top"/"best"/"highest"
/// asks for top performers, anything else for the first records.
pub fn keyword_spec(message: &str) -> QuerySpec {
    let lowered = message.to_lowercase();
    let mut words = lowered.split(|c: char| !c.is_alphanumeric());
    let category = if words.any(|w| matches!(w, "top" | "best" | "highest")) {
        QueryCategory::TopPerformers
    } else {
        QueryCategory::General
    };
    QuerySpec {
        category,
        ..QuerySpec::default()
    }
}

impl QueryFilters {
    pub fn matches(&self, row: &EmployeeSkillRow) -> bool {
        contains(&row.domain, self.domain.as_deref())
            && contains(&row.category, self.category.as_deref())
            && self.matches_skill(row)
            && self.min_skill_rating.map_or(true, |min| row.skill_rate >= min)
            && self.max_skill_rating.map_or(true, |max| row.skill_rate <= max)
            && self.min_interest_rating.map_or(true, |min| row.interest_rate >= min)
            && self.matches_access(row)
    }

    fn matches_skill(&self, row: &EmployeeSkillRow) -> bool {
        match non_blank(self.skill.as_deref()) {
            None => true,
            Some(skill) => [&row.sub_category, &row.category, &row.domain]
                .iter()
                .any(|field| contains(field, Some(skill))),
        }
    }

    fn matches_access(&self, row: &EmployeeSkillRow) -> bool {
        match non_blank(self.access.as_deref()) {
            None => true,
            Some(access) => row
                .access
                .as_deref()
                .is_some_and(|a| a.trim().eq_ignore_ascii_case(access.trim())),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Case-insensitive substring test; a blank needle matches everything.
fn contains(haystack: &str, needle: Option<&str>) -> bool {
    match non_blank(needle) {
        None => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.trim().to_lowercase()),
    }
}

impl QuerySpec {
    /// Every row the spec selects, in result order, before the limit applies.
    pub fn select(&self, rows: &[EmployeeSkillRow]) -> Vec<EmployeeSkillRow> {
        let mut selected: Vec<EmployeeSkillRow> = rows
            .iter()
            .filter(|row| self.filters.matches(row))
            .cloned()
            .collect();

        match self.category {
            QueryCategory::TopPerformers => selected.sort_by(|a, b| {
                b.skill_rate
                    .total_cmp(&a.skill_rate)
                    .then(b.interest_rate.total_cmp(&a.interest_rate))
            }),
            QueryCategory::UpskillingNeeds => {
                selected.retain(|row| {
                    row.skill_rate <= UPSKILL_MAX_SKILL && row.interest_rate >= UPSKILL_MIN_INTEREST
                });
                selected.sort_by(|a, b| {
                    b.interest_rate
                        .total_cmp(&a.interest_rate)
                        .then(a.skill_rate.total_cmp(&b.skill_rate))
                });
            }
            QueryCategory::General => {
                if let Some(field) = non_blank(self.sort_by.as_deref()) {
                    selected.sort_by(|a, b| {
                        let ordering = compare_field(a, b, field);
                        match self.sort_order {
                            SortOrder::Asc => ordering,
                            SortOrder::Desc => ordering.reverse(),
                        }
                    });
                }
            }
        }

        selected
    }

    /// `select` truncated to the limit.
    pub fn apply(&self, rows: &[EmployeeSkillRow]) -> Vec<EmployeeSkillRow> {
        let mut selected = self.select(rows);
        selected.truncate(self.limit);
        selected
    }
}

enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
}

/// Column lookup by database name or snake_case alias. Unknown columns read
/// as empty text, so they leave the order unchanged.
fn field_value<'a>(row: &'a EmployeeSkillRow, field: &str) -> FieldValue<'a> {
    let key: String = field
        .trim()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c.to_ascii_lowercase() })
        .collect();
    match key.as_str() {
        "skill rate" | "skill rating" => FieldValue::Number(row.skill_rate),
        "interest rate" | "interest rating" => FieldValue::Number(row.interest_rate),
        "name" => FieldValue::Text(&row.name),
        "domain" => FieldValue::Text(&row.domain),
        "category" => FieldValue::Text(&row.category),
        "sub category" | "subcategory" | "skill" => FieldValue::Text(&row.sub_category),
        "access" => FieldValue::Text(row.access.as_deref().unwrap_or_default()),
        "email" => FieldValue::Text(row.email.as_deref().unwrap_or_default()),
        _ => FieldValue::Text(""),
    }
}

fn compare_field(a: &EmployeeSkillRow, b: &EmployeeSkillRow, field: &str) -> Ordering {
    match (field_value(a, field), field_value(b, field)) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(&y),
        (FieldValue::Text(x), FieldValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (x, y) => as_text(x).cmp(&as_text(y)),
    }
}

fn as_text(value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Text(t) => t.to_lowercase(),
    }
}

/// Rows the caller may see: admins see everything, everyone else only rows
/// carrying their own email.
pub fn scope_rows(rows: Vec<EmployeeSkillRow>, role: Option<&str>, email: Option<&str>) -> Vec<EmployeeSkillRow> {
    if role.is_some_and(|r| r.trim().eq_ignore_ascii_case("admin")) {
        return rows;
    }
    let Some(email) = non_blank(email) else {
        return Vec::new();
    };
    rows.into_iter()
        .filter(|row| {
            row.email
                .as_deref()
                .is_some_and(|e| e.trim().eq_ignore_ascii_case(email.trim()))
        })
        .collect()
}
