// Shared prompt fragments. Feature modules keep their own templates in a
// prompts.rs next to the code that fills them.

/// Default system framing for free-text completions.
pub const ASSISTANT_SYSTEM: &str = "You are a helpful assistant.";
