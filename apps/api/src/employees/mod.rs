// Employee skill records: database access, row typing, and the anonymization
// map that keeps real names out of LLM prompts.

pub mod anonymize;
pub mod handlers;
pub mod models;
pub mod store;
