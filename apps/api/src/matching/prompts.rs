// Prompt constants for employee ↔ job matching.

/// System prompt for matching. JSON array only.
pub const MATCH_SYSTEM: &str = "You are an internal-mobility analyst who matches employees \
    to job requirements from their self-rated skills. \
    You MUST respond with a valid JSON array only. \
    Do NOT include any text outside the JSON array.";

/// Matching prompt template. Replace: {required_skills_json}, {employees_json}.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Match each employee below against the required skills of a job description.

REQUIRED SKILLS (from the job description):
{required_skills_json}

EMPLOYEE DATA, structured as
{ employee_id: { domain: { category: { sub_category: { skill_rate, interest_rate } } } } }:
{employees_json}

MATCHING RULES:
- A required skill is matched when an employee's sub-category is the same skill or conceptually very close to it.
- "Sub-category" is the skill name and "Skill_Description" only explains it; treat them as the same skill.
- When a required skill describes a broad experience (e.g. "Experience with cloud platforms like Azure and GCP"),
  count it as matched if the employee has the individual technologies it mentions.
- An employee who knows a broad platform or ecosystem (Azure, GCP, AWS, Kubernetes, Docker, GitHub, Linux)
  is assumed familiar with its core services and common tooling; do not list those as missing.
  Only list highly specialised features as missing when there is no evidence for them.

SCORING (0-100 per employee):
match_score = (0.6 * average skill_rate of matched skills
             + 0.3 * average interest_rate of matched skills
             + 0.1 * coverage) / (3 + 1.5 + 0.1) * 100
coverage = number of matched required skills / total required skills

Return a JSON ARRAY with one object per employee:
[
  {
    "employee_id": "EMP_1a2b3c4d",
    "match_score": 85.5,
    "matching_skills": [
      {"skill": "Azure", "skill_rate": 4, "interest_rate": 5}
    ],
    "missing_skills": ["Terraform"]
  }
]

HARD RULES:
1. Use the employee_id values exactly as given.
2. Every matched skill carries its skill_rate and interest_rate from the data.
3. Do not list a grouped or descriptive requirement as missing when its individual technologies matched.
4. Return only the JSON array."#;
