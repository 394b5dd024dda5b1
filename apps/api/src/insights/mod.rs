// Insight generation: job spec + CV -> prompt -> model completion.
// Saving a generated insight is a separate, explicit step (see applications::response_store).

pub mod generator;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod types;
