// Analytics assistant: question → query plan → filtered rows, charts and a
// written answer. Rows are scoped to the caller before anything else runs.

pub mod answer;
pub mod charts;
pub mod handlers;
pub mod intent;
pub mod prompts;
pub mod query;
