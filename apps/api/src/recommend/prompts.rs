// Prompt constants for learning recommendations.

pub const CAREER_ADVISOR_SYSTEM: &str =
    "You are a talent development advisor that specializes in career growth and upskilling.";

/// Bio + course list prompt. Replace: {employee_name}, {domains}, {weak_skills}, {high_interest_skills}.
pub const BIO_AND_COURSES_PROMPT_TEMPLATE: &str = r#"Generate a professional bio and course recommendations for {employee_name}.

Employee Skills Information:
- Domains: {domains}
- Weak skills: {weak_skills}
- High interest areas: {high_interest_skills}

Provide:
1. A brief professional bio highlighting the employee's strengths (2-3 sentences)
2. 3-5 specific course recommendations from platforms like Coursera, Udemy, LinkedIn Learning, or edX to address their skill gaps and interests
3. For each course, include: title, platform, and a brief (1 sentence) explanation of its benefit

Separate the bio from the courses with a blank line.
Format the courses as a structured list with "Course Recommendations:" as a header, and number each course."#;

/// System prompt for per-skill course cards. JSON array only.
pub const SKILL_COURSES_SYSTEM: &str = "You are a learning and development advisor. \
    You MUST respond with a valid JSON array only. \
    Do NOT include any text outside the JSON array.";

/// Per-skill course cards prompt.
/// Replace: {sub_category}, {domain}, {category}, {skill_rate}, {interest_rate}, {level}.
pub const SKILL_COURSES_PROMPT_TEMPLATE: &str = r#"Recommend exactly 3 online courses for an employee who wants to improve in "{sub_category}"
(domain: {domain}, category: {category}).

Current proficiency: {skill_rate}/5. Interest: {interest_rate}/5.
Target the {level} level.

Return a JSON ARRAY of 3 objects with this schema:
[
  {
    "title": "string",
    "provider": "string (e.g. Coursera, Udemy, Pluralsight, edX, LinkedIn Learning)",
    "description": "one or two sentences",
    "level": "Beginner | Intermediate | Advanced",
    "duration": "string (e.g. 6 weeks)",
    "rating": 4.6,
    "features": ["string", "string", "string"],
    "matchScore": 92
  }
]

Return only the JSON array."#;
