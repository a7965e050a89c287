// Prompt fragments shared by every caller of the LLM client.
// Feature-specific prompts live next to the feature (see analysis/prompts.rs).

/// System prompt that pins the model to a bare JSON reply.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
