use crate::errors::TrustResult;

/// One message in an LLM exchange.
#[derive(Debug, Clone)]
pub struct LlmMessage {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
}

/// Completion returned by a provider.
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
}

/// The opaque contract for question-generation and response-interpretation
/// services living OUTSIDE the core. The core never calls this itself;
/// consumers read trust states, talk to a provider, and write results back
/// through the verification/claim APIs.
pub trait LlmProvider: Send + Sync {
    fn complete(&self, system_prompt: &str, messages: &[LlmMessage]) -> TrustResult<Completion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedProvider;

    impl LlmProvider for CannedProvider {
        fn complete(&self, _system_prompt: &str, _messages: &[LlmMessage]) -> TrustResult<Completion> {
            Ok(Completion {
                content: "ok".to_string(),
            })
        }
    }

    #[test]
    fn providers_are_usable_as_trait_objects() {
        let provider: Box<dyn LlmProvider> = Box::new(CannedProvider);
        let completion = provider
            .complete(
                "interpret the response",
                &[LlmMessage {
                    role: "user".to_string(),
                    content: "what is ownership?".to_string(),
                }],
            )
            .unwrap();
        assert_eq!(completion.content, "ok");
    }
}
