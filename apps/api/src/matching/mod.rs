// Employee ↔ job matching. Profiles go to the LLM under anonymized IDs only;
// real names are restored after scoring.

pub mod handlers;
pub mod matcher;
pub mod models;
pub mod prompts;
