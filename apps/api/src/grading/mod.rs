// Grading endpoint: validate the entry, pick the score schema for its category,
// build the instruction prompt, ask the provider, parse its JSON answer.
// All provider calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod request;
pub mod schema;
