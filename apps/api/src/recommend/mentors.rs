//! Mentor matching against a fixed in-house catalog.
//!
//! compatibility = 0.4 × |shared domains|
//!               + 0.6 × mean(mentor level − employee level) over the skills
//!                 where the mentor is strictly better.

use std::collections::{HashMap, HashSet};

use crate::recommend::models::Mentor;

const DOMAIN_WEIGHT: f64 = 0.4;
const SKILL_WEIGHT: f64 = 0.6;
const TOP_MENTORS: usize = 3;

pub struct CatalogMentor {
    pub name: &'static str,
    pub title: &'static str,
    pub domains: &'static [&'static str],
    pub skills: &'static [(&'static str, f64)],
}

pub static MENTORS: [CatalogMentor; 5] = [
    CatalogMentor {
        name: "Ravi Kumar",
        title: "Principal Engineer",
        domains: &["Engineering", "Data Science", "Cloud Architecture"],
        skills: &[
            ("Java", 4.8),
            ("Python", 4.5),
            ("AWS", 4.9),
            ("System Design", 4.8),
            ("Leadership", 4.7),
        ],
    },
    CatalogMentor {
        name: "Priya Singh",
        title: "Senior Data Scientist",
        domains: &["Data Science", "Machine Learning", "Statistics"],
        skills: &[
            ("Python", 4.7),
            ("ML", 4.9),
            ("Statistics", 4.8),
            ("Data Visualization", 4.6),
        ],
    },
    CatalogMentor {
        name: "Alex Johnson",
        title: "Engineering Manager",
        domains: &["Engineering", "Project Management", "Leadership"],
        skills: &[
            ("Java", 4.5),
            ("Leadership", 4.9),
            ("Project Management", 4.8),
            ("Mentoring", 4.7),
        ],
    },
    CatalogMentor {
        name: "Sarah Williams",
        title: "UX Design Lead",
        domains: &["Design", "UI/UX", "Product Development"],
        skills: &[
            ("UI Design", 4.9),
            ("User Research", 4.7),
            ("Figma", 4.8),
            ("Product Thinking", 4.6),
        ],
    },
    CatalogMentor {
        name: "Michael Chen",
        title: "Technical Architect",
        domains: &["Architecture", "Cloud", "Infrastructure"],
        skills: &[
            ("System Design", 4.9),
            ("AWS", 4.8),
            ("Cloud Architecture", 4.9),
            ("Microservices", 4.7),
        ],
    },
];

impl CatalogMentor {
    fn level_in(&self, skill: &str) -> Option<f64> {
        self.skills.iter().find(|(name, _)| *name == skill).map(|(_, level)| *level)
    }

    /// Mean of the mentor's own skill levels.
    pub fn skill_level(&self) -> f64 {
        if self.skills.is_empty() {
            return 0.0;
        }
        self.skills.iter().map(|(_, level)| level).sum::<f64>() / self.skills.len() as f64
    }

    pub fn compatibility(&self, employee_domains: &[String], employee_skills: &HashMap<String, f64>) -> f64 {
        let employee_domains: HashSet<&str> = employee_domains.iter().map(String::as_str).collect();
        let shared_domains = self
            .domains
            .iter()
            .filter(|d| employee_domains.contains(**d))
            .count();

        let deltas: Vec<f64> = employee_skills
            .iter()
            .filter_map(|(skill, employee_level)| {
                self.level_in(skill)
                    .filter(|mentor_level| mentor_level > employee_level)
                    .map(|mentor_level| mentor_level - employee_level)
            })
            .collect();
        let skill_score = if deltas.is_empty() {
            0.0
        } else {
            deltas.iter().sum::<f64>() / deltas.len() as f64
        };

        DOMAIN_WEIGHT * shared_domains as f64 + SKILL_WEIGHT * skill_score
    }
}

/// The three catalog mentors most compatible with the employee, best first.
pub fn recommend_mentors(employee_domains: &[String], employee_skills: &HashMap<String, f64>) -> Vec<Mentor> {
    let mut mentors: Vec<Mentor> = MENTORS
        .iter()
        .map(|m| Mentor {
            name: m.name.to_string(),
            title: m.title.to_string(),
            domains: m.domains.iter().map(|d| d.to_string()).collect(),
            skill_level: m.skill_level(),
            compatibility: m.compatibility(employee_domains, employee_skills),
        })
        .collect();

    // Stable sort keeps catalog order among ties.
    mentors.sort_by(|a, b| b.compatibility.total_cmp(&a.compatibility));
    mentors.truncate(TOP_MENTORS);
    mentors
}
