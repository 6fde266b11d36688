// Prompt constants for the analytics assistant.

/// System prompt for intent classification. JSON object only.
pub const INTENT_SYSTEM: &str = "You translate questions about an employee skills database \
    into query specifications. \
    You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object.";

/// Intent prompt template. Replace: {message}.
pub const INTENT_PROMPT_TEMPLATE: &str = r#"The skills table has one row per employee and skill with the columns
Name, Domain, Category, Sub Category, Skill Rate (1-5), Interest Rate (1-5), Access, Email.

QUESTION:
{message}

Return a JSON object with this schema (omit what the question does not need):
{
  "category": "top_performers | upskilling_needs | general",
  "filters": {
    "domain": "substring of Domain",
    "category": "substring of Category",
    "skill": "substring of the skill (Sub Category)",
    "min_skill_rating": 1-5,
    "max_skill_rating": 1-5,
    "min_interest_rating": 1-5,
    "access": "exact Access value"
  },
  "sort_by": "column name",
  "sort_order": "asc | desc",
  "limit": 10,
  "visualization": true | false,
  "chart_type": "bar | pie | radar | heatmap"
}

RULES:
- "top_performers": questions about the best, strongest or most skilled people.
- "upskilling_needs": questions about who should be trained, skill gaps, or growth potential.
- "general": everything else.
- Set "visualization" to true only when the question asks for a chart, graph or breakdown.
- Return only the JSON object."#;

pub const ANSWER_SYSTEM: &str = "You are an HR analytics assistant. \
    Answer questions about employee skills concisely and accurately, using only the records provided. \
    Use plain prose; at most one short list.";

/// Answer prompt template. Replace: {message}, {match_count}, {records_json}.
pub const ANSWER_PROMPT_TEMPLATE: &str = r#"QUESTION:
{message}

MATCHING RECORDS ({match_count} in total, the first ones shown):
{records_json}

Answer the question in 2-5 sentences based on these records. Mention names and ratings where helpful.
If there are no records, say that nothing matched and suggest a broader question."#;
