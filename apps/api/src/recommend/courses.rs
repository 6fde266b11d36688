//! Course recommendations.
//!
//! Two flavours:
//! - bio + course list for a whole profile: free-text model answer, parsed
//!   line by line, with a per-domain fallback table.
//! - exactly three course cards for one skill: JSON model answer, padded
//!   from a generated fallback catalog.

use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::prompts::render;
use crate::llm_client::{LlmBackend, LlmRequest};
use crate::recommend::models::{Course, CourseRecommendation, CourseResponse, SkillCourseRequest, SkillEntry};
use crate::recommend::prompts::{
    BIO_AND_COURSES_PROMPT_TEMPLATE, CAREER_ADVISOR_SYSTEM, SKILL_COURSES_PROMPT_TEMPLATE, SKILL_COURSES_SYSTEM,
};

/// Timeout for the bio + course list call.
const BIO_TIMEOUT: Duration = Duration::from_secs(10);
const COURSE_CARDS: usize = 3;

const PLATFORMS: [&str; 5] = ["Coursera", "Udemy", "LinkedIn Learning", "edX", "Pluralsight"];
const DEFAULT_PLATFORM: &str = "Online Learning Platform";
const NO_DESCRIPTION: &str = "Check course details for more information.";
const COURSES_HEADER: &str = "Course Recommendations:";

const DEFAULT_DOMAIN: &str = "Engineering";

/// (title, platform, description) per fallback domain.
type FallbackRow = (&'static str, &'static str, &'static str);

static FALLBACK_COURSES: [(&str, [FallbackRow; 3]); 4] = [
    (
        "Engineering",
        [
            ("Advanced Software Architecture", "Coursera", "Learn design patterns and architecture principles."),
            ("Full Stack Development", "Udemy", "Build complete web applications from front to back end."),
            ("Cloud Native Applications", "LinkedIn Learning", "Deploy applications using modern cloud practices."),
        ],
    ),
    (
        "Data Science",
        [
            ("Machine Learning Fundamentals", "Coursera", "From algorithms to implementation in Python."),
            ("Advanced Data Analysis", "edX", "Statistical methods for complex datasets."),
            ("Big Data Processing", "Udemy", "Work with Spark and distributed computing."),
        ],
    ),
    (
        "Design",
        [
            ("UX Research Methods", "Coursera", "Learn to conduct effective user research."),
            ("UI Design Principles", "Udemy", "Create beautiful and functional interfaces."),
            ("Design Systems at Scale", "LinkedIn Learning", "Build and maintain design systems for organizations."),
        ],
    ),
    (
        "Management",
        [
            ("Agile Leadership", "Coursera", "Lead teams using agile methodologies."),
            ("Project Management Professional", "Udemy", "Prepare for PMP certification."),
            ("Team Building Strategies", "LinkedIn Learning", "Create high-performing cohesive teams."),
        ],
    ),
];

// ────────────────────────────────────────────────────────────────────────────
// Bio + course list
// ────────────────────────────────────────────────────────────────────────────

/// Fallback courses for the first table domain contained in `domain`
/// (case-insensitive). Defaults to Engineering.
pub fn fallback_courses(domain: &str) -> Vec<Course> {
    let domain = domain.to_lowercase();
    let rows = FALLBACK_COURSES
        .iter()
        .find(|(key, _)| domain.contains(&key.to_lowercase()))
        .or_else(|| FALLBACK_COURSES.iter().find(|(key, _)| *key == DEFAULT_DOMAIN))
        .map(|(_, rows)| rows.as_slice())
        .unwrap_or_default();

    rows.iter()
        .map(|(title, platform, description)| Course {
            title: title.to_string(),
            platform: platform.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Templated bio and domain courses, built from the first skill.
pub fn offline_recommendations(employee_name: &str, skills: &[SkillEntry]) -> CourseResponse {
    let (domain, sub_category) = skills
        .first()
        .map(|s| (s.domain.as_str(), s.sub_category.as_str()))
        .unwrap_or((DEFAULT_DOMAIN, "General Skills"));

    CourseResponse {
        bio: format!(
            "{employee_name} shows potential for growth in {domain}, particularly in {sub_category}. \
             With targeted learning, they could develop expertise in this area."
        ),
        courses: fallback_courses(domain),
    }
}

pub fn build_bio_prompt(employee_name: &str, skills: &[SkillEntry]) -> String {
    let mut domains: Vec<&str> = Vec::new();
    for skill in skills {
        if !domains.contains(&skill.domain.as_str()) {
            domains.push(&skill.domain);
        }
    }

    let weak: Vec<String> = skills
        .iter()
        .filter(|s| s.skill_rate < 3.0)
        .map(|s| format!("{} (Rated {}/5)", s.sub_category, s.skill_rate))
        .collect();
    let high_interest: Vec<String> = skills
        .iter()
        .filter(|s| s.interest_rate > 3.0 && s.skill_rate < s.interest_rate)
        .map(|s| format!("{} (Interest {}/5)", s.sub_category, s.interest_rate))
        .collect();

    let or_none = |items: Vec<String>| {
        if items.is_empty() {
            "None".to_string()
        } else {
            items.join(", ")
        }
    };

    render(
        BIO_AND_COURSES_PROMPT_TEMPLATE,
        &[
            ("employee_name", employee_name),
            ("domains", &domains.join(", ")),
            ("weak_skills", &or_none(weak)),
            ("high_interest_skills", &or_none(high_interest)),
        ],
    )
}

/// Splits a free-text answer into the bio (first paragraph, `Bio:` label
/// removed) and the numbered courses listed under "Course Recommendations:".
pub fn parse_bio_and_courses(content: &str) -> (String, Vec<Course>) {
    let content = content.replace("\r\n", "\n");
    let (bio, rest) = content.split_once("\n\n").unwrap_or((content.as_str(), ""));
    let bio = bio.replace("Bio:", "").trim().to_string();

    let Some(listing) = rest.trim().split(COURSES_HEADER).nth(1) else {
        return (bio, Vec::new());
    };

    let courses = listing
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| line.chars().take(3).any(|c| c.is_ascii_digit()))
        .map(parse_course_line)
        .collect();

    (bio, courses)
}

fn parse_course_line(line: &str) -> Course {
    let (title, description) = match line.split_once(':') {
        Some((head, tail)) => {
            let head = head.trim();
            let title = head.split_once('.').map(|(_, t)| t.trim()).unwrap_or(head);
            (title.to_string(), tail.trim().to_string())
        }
        None => match earliest_platform(line) {
            Some(pos) => {
                let title = line[..pos].trim_start_matches(|c: char| !c.is_alphabetic()).trim();
                (title.to_string(), line[pos..].trim().to_string())
            }
            None => (line.trim().to_string(), NO_DESCRIPTION.to_string()),
        },
    };
    let title = title.trim_matches('*').trim().to_string();

    let lowered = description.to_lowercase();
    let platform = PLATFORMS
        .iter()
        .find(|p| lowered.contains(&p.to_lowercase()))
        .copied()
        .unwrap_or(DEFAULT_PLATFORM);

    Course {
        title,
        platform: platform.to_string(),
        description,
    }
}

/// Byte offset of the earliest platform name after the first character.
fn earliest_platform(line: &str) -> Option<usize> {
    let lowered = line.to_ascii_lowercase();
    PLATFORMS
        .iter()
        .filter_map(|p| lowered.find(&p.to_ascii_lowercase()))
        .filter(|pos| *pos > 0)
        .min()
}

/// Bio and course list for a profile. Never fails: a missing model, a failed
/// call, or an answer without parsable courses falls back to the tables.
pub async fn recommend_bio_and_courses(
    llm: Option<&dyn LlmBackend>,
    employee_name: &str,
    skills: &[SkillEntry],
) -> CourseResponse {
    let Some(llm) = llm else {
        info!("No LLM configured; using offline course recommendations");
        return offline_recommendations(employee_name, skills);
    };

    let prompt = build_bio_prompt(employee_name, skills);
    let request = LlmRequest::new(CAREER_ADVISOR_SYSTEM, &prompt)
        .temperature(0.7)
        .max_output_tokens(800)
        .timeout(BIO_TIMEOUT);

    match llm.generate(request).await {
        Ok(content) => {
            let (bio, mut courses) = parse_bio_and_courses(&content);
            if courses.is_empty() {
                warn!("Course parsing failed, using fallback courses");
                let domain = skills.first().map(|s| s.domain.as_str()).unwrap_or(DEFAULT_DOMAIN);
                courses = fallback_courses(domain);
            }
            CourseResponse { bio, courses }
        }
        Err(e) => {
            warn!("Error generating course recommendations: {e}");
            offline_recommendations(employee_name, skills)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-skill course cards
// ────────────────────────────────────────────────────────────────────────────

/// Beginner up to 2, Intermediate below 4, Advanced from 4.
pub fn level_for(skill_rate: f64) -> &'static str {
    if skill_rate <= 2.0 {
        "Beginner"
    } else if skill_rate < 4.0 {
        "Intermediate"
    } else {
        "Advanced"
    }
}

/// Three generated cards for the skill, pitched at its current level.
pub fn fallback_course_cards(skill: &SkillCourseRequest) -> Vec<CourseRecommendation> {
    let topic = match skill.sub_category.trim() {
        "" => "General Skills",
        topic => topic,
    };
    let level = level_for(skill.skill_rate);
    let headline = match level {
        "Beginner" => format!("{topic} Fundamentals"),
        "Intermediate" => format!("{topic} Deep Dive"),
        _ => format!("{topic} Masterclass"),
    };

    let card = |title: String, provider: &str, description: String, duration: &str, rating: f64, features: [&str; 3], score: f64| {
        CourseRecommendation {
            title,
            provider: provider.to_string(),
            description,
            level: level.to_string(),
            duration: duration.to_string(),
            rating,
            features: features.iter().map(|f| f.to_string()).collect(),
            match_score: score,
        }
    };

    vec![
        card(
            headline,
            "Coursera",
            format!("A structured {level} track covering the core concepts of {topic}."),
            "4 weeks",
            4.7,
            ["Video lectures", "Graded assignments", "Shareable certificate"],
            95.0,
        ),
        card(
            format!("Hands-on {topic} Projects"),
            "Udemy",
            format!("Build real projects that apply {topic} end to end."),
            "12 hours",
            4.6,
            ["Project-based", "Lifetime access", "Downloadable resources"],
            90.0,
        ),
        card(
            format!("{topic} in Practice"),
            "LinkedIn Learning",
            format!("Short lessons on using {topic} day to day."),
            "3 hours",
            4.5,
            ["Bite-sized modules", "Exercise files", "Certificate of completion"],
            85.0,
        ),
    ]
}

/// Exactly three course cards for one skill. Valid model cards come first,
/// padded from the fallback catalog; any failure yields the fallback catalog.
pub async fn recommend_course_cards(
    llm: Option<&dyn LlmBackend>,
    skill: &SkillCourseRequest,
) -> Vec<CourseRecommendation> {
    let fallback = fallback_course_cards(skill);
    let Some(llm) = llm else {
        return fallback;
    };

    let level = level_for(skill.skill_rate);
    let prompt = render(
        SKILL_COURSES_PROMPT_TEMPLATE,
        &[
            ("sub_category", &skill.sub_category),
            ("domain", &skill.domain),
            ("category", &skill.category),
            ("skill_rate", &skill.skill_rate.to_string()),
            ("interest_rate", &skill.interest_rate.to_string()),
            ("level", level),
        ],
    );

    let answer = match llm.generate_json(LlmRequest::new(SKILL_COURSES_SYSTEM, &prompt)).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Error generating course cards for '{}': {e}", skill.sub_category);
            return fallback;
        }
    };

    let mut cards = cards_from_answer(answer);
    for card in &mut cards {
        if card.level.is_empty() {
            card.level = level.to_string();
        }
    }
    if cards.is_empty() {
        warn!("No usable course cards in model answer; using fallback catalog");
        return fallback;
    }

    for candidate in fallback {
        if cards.len() >= COURSE_CARDS {
            break;
        }
        if !cards.iter().any(|c| c.title.eq_ignore_ascii_case(&candidate.title)) {
            cards.push(candidate);
        }
    }
    cards
}

fn cards_from_answer(answer: Value) -> Vec<CourseRecommendation> {
    let items = match answer {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("courses") {
            Some(Value::Array(items)) => items,
            _ => vec![Value::Object(map)],
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<CourseRecommendation>(item).ok())
        .filter(|card| !card.title.trim().is_empty())
        .take(COURSE_CARDS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedLlm;

    fn entry(domain: &str, sub: &str, skill: f64, interest: f64) -> SkillEntry {
        SkillEntry {
            id: None,
            name: "Asha Rao".into(),
            domain: domain.into(),
            category: "Practice and Technologies".into(),
            sub_category: sub.into(),
            skill_rate: skill,
            interest_rate: interest,
        }
    }

    fn skill_request(sub: &str, rate: f64) -> SkillCourseRequest {
        SkillCourseRequest {
            sub_category: sub.into(),
            domain: "Cloud".into(),
            category: "Tools and Platforms".into(),
            skill_rate: rate,
            interest_rate: 5.0,
        }
    }

    const ANSWER: &str = "Bio: Asha is a cloud engineer with strong Azure experience.\n\n\
Course Recommendations:\n\
1. Kubernetes for Developers: A Udemy course on deploying containers.\n\
2) Data Pipelines with Spark on Coursera\n\
3. Something Vague\n\
Enjoy learning!";

    #[test]
    fn test_parse_bio_strips_label() {
        let (bio, _) = parse_bio_and_courses(ANSWER);
        assert_eq!(bio, "Asha is a cloud engineer with strong Azure experience.");
    }

    #[test]
    fn test_parse_numbered_courses() {
        let (_, courses) = parse_bio_and_courses(ANSWER);
        assert_eq!(courses.len(), 3);

        assert_eq!(courses[0].title, "Kubernetes for Developers");
        assert_eq!(courses[0].platform, "Udemy");
        assert_eq!(courses[0].description, "A Udemy course on deploying containers.");

        assert_eq!(courses[1].title, "Data Pipelines with Spark on");
        assert_eq!(courses[1].platform, "Coursera");
        assert_eq!(courses[1].description, "Coursera");

        assert_eq!(courses[2].title, "3. Something Vague");
        assert_eq!(courses[2].platform, DEFAULT_PLATFORM);
        assert_eq!(courses[2].description, NO_DESCRIPTION);
    }

    #[test]
    fn test_parse_without_header_yields_no_courses() {
        let (bio, courses) = parse_bio_and_courses("Just a bio.\n\n1. Some course: on Udemy");
        assert_eq!(bio, "Just a bio.");
        assert!(courses.is_empty());
    }

    #[test]
    fn test_fallback_domain_matching() {
        assert_eq!(fallback_courses("Applied Data Science")[0].title, "Machine Learning Fundamentals");
        assert_eq!(fallback_courses("PRODUCT DESIGN")[0].title, "UX Research Methods");
        assert_eq!(fallback_courses("Finance")[0].title, "Advanced Software Architecture");
    }

    #[test]
    fn test_prompt_lists_weak_and_high_interest_skills() {
        let skills = vec![
            entry("Cloud", "Azure", 2.0, 5.0),
            entry("Cloud", "GCP", 4.0, 4.0),
            entry("Data", "Spark", 3.0, 4.5),
        ];
        let prompt = build_bio_prompt("Asha Rao", &skills);
        assert!(prompt.contains("Domains: Cloud, Data"));
        assert!(prompt.contains("Weak skills: Azure (Rated 2/5)"));
        assert!(prompt.contains("High interest areas: Azure (Interest 5/5), Spark (Interest 4.5/5)"));
    }

    #[test]
    fn test_prompt_reports_none() {
        let prompt = build_bio_prompt("Asha Rao", &[entry("Cloud", "GCP", 4.0, 2.0)]);
        assert!(prompt.contains("Weak skills: None"));
        assert!(prompt.contains("High interest areas: None"));
    }

    #[tokio::test]
    async fn test_bio_without_llm_is_templated() {
        let response = recommend_bio_and_courses(None, "Asha Rao", &[entry("Design", "Figma", 2.0, 4.0)]).await;
        assert!(response.bio.starts_with("Asha Rao shows potential for growth in Design, particularly in Figma."));
        assert_eq!(response.courses[0].title, "UX Research Methods");
    }

    #[tokio::test]
    async fn test_unparsable_courses_fall_back_to_domain_table() {
        let llm = ScriptedLlm::replying(&["A fine engineer.\n\nNo list today."]);
        let response = recommend_bio_and_courses(Some(&llm), "Asha", &[entry("Management", "Agile", 2.0, 4.0)]).await;
        assert_eq!(response.bio, "A fine engineer.");
        assert_eq!(response.courses[0].title, "Agile Leadership");
    }

    #[tokio::test]
    async fn test_failed_llm_uses_offline_response() {
        let llm = ScriptedLlm::failing(429);
        let response = recommend_bio_and_courses(Some(&llm), "Asha", &[entry("Cloud", "Azure", 2.0, 4.0)]).await;
        assert!(response.bio.contains("particularly in Azure"));
        assert_eq!(response.courses.len(), 3);
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(level_for(1.0), "Beginner");
        assert_eq!(level_for(2.0), "Beginner");
        assert_eq!(level_for(3.0), "Intermediate");
        assert_eq!(level_for(4.0), "Advanced");
        assert_eq!(level_for(5.0), "Advanced");
    }

    #[test]
    fn test_fallback_cards_follow_level() {
        let cards = fallback_course_cards(&skill_request("Azure", 4.0));
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].title, "Azure Masterclass");
        assert!(cards.iter().all(|c| c.level == "Advanced"));

        let cards = fallback_course_cards(&skill_request("  ", 1.0));
        assert_eq!(cards[0].title, "General Skills Fundamentals");
    }

    #[tokio::test]
    async fn test_partial_answer_is_padded_to_three() {
        let answer = r#"[{"title": "Azure Administrator", "provider": "Microsoft Learn", "description": "AZ-104 prep", "matchScore": 97},
                        {"provider": "Udemy", "description": "missing title"}]"#;
        let llm = ScriptedLlm::replying(&[answer]);
        let cards = recommend_course_cards(Some(&llm), &skill_request("Azure", 3.0)).await;

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].title, "Azure Administrator");
        assert_eq!(cards[0].level, "Intermediate");
        assert_eq!(cards[1].title, "Azure Deep Dive");
        assert_eq!(cards[2].title, "Hands-on Azure Projects");
    }

    #[tokio::test]
    async fn test_long_answer_is_truncated_to_three() {
        let card = r#"{"title": "T", "provider": "P", "description": "D"}"#;
        let answer = format!("[{card}, {card}, {card}, {card}]");
        let llm = ScriptedLlm::replying(&[&answer]);
        assert_eq!(recommend_course_cards(Some(&llm), &skill_request("Go", 3.0)).await.len(), 3);
    }

    #[tokio::test]
    async fn test_garbage_answer_uses_fallback_cards() {
        let llm = ScriptedLlm::replying(&["no courses for you"]);
        let cards = recommend_course_cards(Some(&llm), &skill_request("Spark", 2.0)).await;
        assert_eq!(cards, fallback_course_cards(&skill_request("Spark", 2.0)));
    }
}
