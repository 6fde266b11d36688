// Growth recommendations: course suggestions (free-text and card form) and
// mentor matching against the in-house catalog.

pub mod courses;
pub mod handlers;
pub mod mentors;
pub mod models;
pub mod prompts;
