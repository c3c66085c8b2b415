// Application generation: one job description + resume + cover letter in,
// one zip of tailored documents out.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod composer;
pub mod handlers;
pub mod metadata;
pub mod prompts;
