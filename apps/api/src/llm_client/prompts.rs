// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every document prompt. The delimiter must match
/// `render::RATIONALE_DELIMITER` exactly or the rationale leaks into the body.
pub const RATIONALE_INSTRUCTION: &str = "\
    At the very end of your response, strictly separated by the delimiter \"[[THINKING_PROCESS]]\", \
    provide a detailed explanation of your thinking process.";

/// Common honesty instruction for research-style prompts.
pub const FACTUAL_INSTRUCTION: &str = "\
    Include ONLY factual info. If you do not know something, state \"Not available\". \
    Do NOT hallucinate.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RATIONALE_DELIMITER;

    #[test]
    fn test_rationale_instruction_names_the_render_delimiter() {
        assert!(RATIONALE_INSTRUCTION.contains(RATIONALE_DELIMITER));
    }
}
