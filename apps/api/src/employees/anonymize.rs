//! Name → pseudonymous ID mapping used to keep real names out of LLM prompts.
//!
//! IDs are `EMP_` plus the first 8 hex digits of SHA-256(name), so the same
//! name always maps to the same ID. If that prefix already belongs to another
//! name, a short random suffix keeps the two employees apart. The reverse mapping only exists in this
//! process: one `Anonymizer` is created at startup, shared through
//! `AppState`, and forgotten on restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::employees::models::{EmployeeSkillRow, SkillRatings};

/// sub-category → ratings
pub type SubCategoryMap = BTreeMap<String, SkillRatings>;
/// domain → category → sub-category → ratings
pub type EmployeeProfile = BTreeMap<String, BTreeMap<String, SubCategoryMap>>;
/// employee ID → profile
pub type StructuredEmployees = BTreeMap<String, EmployeeProfile>;

#[derive(Debug, Default)]
pub struct Anonymizer {
    names_to_ids: Mutex<HashMap<String, String>>,
}

impl Anonymizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable ID for `name`, remembered for reverse lookup.
    /// Blank names get a throwaway random ID that is never remembered.
    pub fn id_for(&self, name: &str) -> String {
        if name.trim().is_empty() {
            tracing::warn!("Empty employee name; issuing an unmapped ID");
            let random = Uuid::new_v4().simple().to_string();
            return format!("EMP_UNKNOWN_{}", &random[..6]);
        }

        self.assign(name, hashed_id(name))
    }

    /// Remembers `candidate` for `name` unless another name already holds it.
    fn assign(&self, name: &str, candidate: String) -> String {
        let mut map = self.lock();
        if let Some(id) = map.get(name) {
            return id.clone();
        }

        let mut id = candidate.clone();
        while map.values().any(|taken| *taken == id) {
            let random = Uuid::new_v4().simple().to_string();
            id = format!("{candidate}_{}", &random[..4]);
        }
        if id != candidate {
            tracing::warn!("Employee ID collision on {candidate}; issued {id}");
        }
        map.insert(name.to_string(), id.clone());
        id
    }

    /// ID → real name for every mapping issued so far.
    pub fn reverse_mapping(&self) -> HashMap<String, String> {
        self.lock()
            .iter()
            .map(|(name, id)| (id.clone(), name.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Groups rows into `{employee_id: {domain: {category: {sub_category: ratings}}}}`.
    /// Registers every name on the way; a later row for the same sub-category wins.
    pub fn structure_rows(&self, rows: &[EmployeeSkillRow]) -> StructuredEmployees {
        let mut structured = StructuredEmployees::new();
        for row in rows {
            let employee_id = self.id_for(&row.name);
            structured
                .entry(employee_id)
                .or_default()
                .entry(row.domain.clone())
                .or_default()
                .entry(row.category.clone())
                .or_default()
                .insert(
                    row.sub_category.clone(),
                    SkillRatings {
                        skill_rate: row.skill_rate,
                        interest_rate: row.interest_rate,
                    },
                );
        }
        structured
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map; keep serving it.
        self.names_to_ids
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
impl Anonymizer {
    pub fn name_for(&self, id: &str) -> Option<String> {
        self.lock()
            .iter()
            .find(|(_, v)| v.as_str() == id)
            .map(|(k, _)| k.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

fn hashed_id(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    let hex = format!("{digest:x}");
    format!("EMP_{}", &hex[..8])
}
