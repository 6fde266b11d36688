// Job-description intake: PDF text extraction, header scraping, and
// LLM-backed skill extraction. All LLM calls go through llm_client.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod pdf;
pub mod prompts;
