use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One employee × skill record as stored in the hosted database.
///
/// Raw rows are passed through untouched by `/api/fetch-employees`; every
/// other consumer goes through `from_value`, which rejects rows missing a
/// required column or a name. Ratings may be numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSkillRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub Category")]
    pub sub_category: String,
    #[serde(rename = "Skill Rate", deserialize_with = "rating")]
    pub skill_rate: f64,
    #[serde(rename = "Interest Rate", deserialize_with = "rating")]
    pub interest_rate: f64,
    #[serde(rename = "Access", default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EmployeeSkillRow {
    /// Converts a raw database row. `None` when a required column is absent,
    /// has the wrong type, or the name is blank.
    pub fn from_value(raw: &Value) -> Option<Self> {
        serde_json::from_value::<Self>(raw.clone())
            .ok()
            .filter(|row| !row.name.trim().is_empty())
    }

    /// Converts every valid row, silently dropping the rest.
    pub fn parse_all(raw: &[Value]) -> Vec<Self> {
        let rows: Vec<Self> = raw.iter().filter_map(Self::from_value).collect();
        if rows.len() < raw.len() {
            tracing::warn!(
                "Skipped {} employee rows with missing or invalid columns",
                raw.len() - rows.len()
            );
        }
        rows
    }
}

/// Reads a number or a numeric string ("4", "85.5", "90%").
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

fn rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    numeric(&value).ok_or_else(|| de::Error::custom(format!("expected a numeric rating, got {value}")))
}

/// Proficiency and interest for one sub-category, as shown to the matching model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillRatings {
    pub skill_rate: f64,
    pub interest_rate: f64,
}


#[cfg(test)]
mod tests {
    use super::fixtures::raw_row;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_reads_spaced_column_names() {
        let row = EmployeeSkillRow::from_value(&raw_row("Asha Rao", "Cloud", "Azure", 4.0, 5.0))
            .unwrap();
        assert_eq!(row.name, "Asha Rao");
        assert_eq!(row.sub_category, "Azure");
        assert_eq!(row.skill_rate, 4.0);
        assert_eq!(row.email.as_deref(), Some("asha.rao@example.com"));
    }

    #[test]
    fn test_integer_ratings_are_accepted() {
        let raw = json!({
            "Name": "A", "Domain": "D", "Category": "C", "Sub Category": "S",
            "Skill Rate": 3, "Interest Rate": 2
        });
        let row = EmployeeSkillRow::from_value(&raw).unwrap();
        assert_eq!(row.interest_rate, 2.0);
        assert!(row.access.is_none());
    }

    #[test]
    fn test_string_ratings_are_accepted() {
        let raw = json!({
            "Name": "A", "Domain": "D", "Category": "C", "Sub Category": "S",
            "Skill Rate": "4", "Interest Rate": " 3.5 "
        });
        let row = EmployeeSkillRow::from_value(&raw).unwrap();
        assert_eq!(row.skill_rate, 4.0);
        assert_eq!(row.interest_rate, 3.5);

        let raw = json!({
            "Name": "A", "Domain": "D", "Category": "C", "Sub Category": "S",
            "Skill Rate": "high", "Interest Rate": 3
        });
        assert!(EmployeeSkillRow::from_value(&raw).is_none());
    }

    #[test]
    fn test_blank_name_rows_are_skipped() {
        let raws = vec![raw_row("  ", "Cloud", "Azure", 4.0, 5.0), raw_row("B", "Data", "Spark", 2.0, 3.0)];
        let rows = EmployeeSkillRow::parse_all(&raws);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "B");
    }

    #[test]
    fn test_missing_required_column_is_invalid() {
        let raw = json!({"Name": "A", "Domain": "D", "Category": "C", "Skill Rate": 3, "Interest Rate": 2});
        assert!(EmployeeSkillRow::from_value(&raw).is_none());
    }

    #[test]
    fn test_parse_all_skips_invalid_rows() {
        let raws = vec![
            raw_row("A", "Cloud", "Azure", 4.0, 5.0),
            json!({"Name": "broken"}),
            raw_row("B", "Data", "Spark", 2.0, 3.0),
        ];
        let rows = EmployeeSkillRow::parse_all(&raws);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "B");
    }

    #[test]
    fn test_serializes_back_to_database_names() {
        let row = EmployeeSkillRow::from_value(&raw_row("A", "Cloud", "Azure", 4.0, 5.0)).unwrap();
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["Sub Category"], "Azure");
        assert_eq!(value["Skill Rate"], 4.0);
        assert!(value.get("id").is_none());
    }
}
