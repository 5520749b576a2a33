// Project generation: profile → prompt → LLM HTML → PDF → artifact store → profile commit.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod workflow;
