use async_trait::async_trait;
use std::fmt::Debug;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for text-completion providers (Gemini, etc.)
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a completion request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Send a request and return only the generated text
    async fn complete(&self, model: &str, request: LlmRequest) -> Result<String, DomainError> {
        let response = self.chat(model, request).await?;
        Ok(response.content().to_string())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::llm::Message;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider that always answers with the same text or error
    #[derive(Debug)]
    pub struct MockLlmProvider {
        name: &'static str,
        response: Option<String>,
        error: Option<String>,
    }

    impl MockLlmProvider {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                response: None,
                error: None,
            }
        }

        pub fn with_response(mut self, response: impl Into<String>) -> Self {
            self.response = Some(response.into());
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn chat(&self, model: &str, _request: LlmRequest) -> Result<LlmResponse, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            self.response
                .clone()
                .map(|text| LlmResponse::new(model, Message::assistant(text)))
                .ok_or_else(|| DomainError::provider(self.name, "No mock response configured"))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }

    /// Provider that replays a queue of outputs and records every request
    #[derive(Debug, Default)]
    pub struct ScriptedLlmProvider {
        outputs: Mutex<VecDeque<Result<String, String>>>,
        requests: Mutex<Vec<LlmRequest>>,
    }

    impl ScriptedLlmProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn then_reply(self, text: impl Into<String>) -> Self {
            self.outputs.lock().unwrap().push_back(Ok(text.into()));
            self
        }

        pub fn then_fail(self, error: impl Into<String>) -> Self {
            self.outputs.lock().unwrap().push_back(Err(error.into()));
            self
        }

        pub fn requests(&self) -> Vec<LlmRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedLlmProvider {
        async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
            self.requests.lock().unwrap().push(request);

            match self.outputs.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(LlmResponse::new(model, Message::assistant(text))),
                Some(Err(error)) => Err(DomainError::provider("scripted", error)),
                None => Err(DomainError::provider("scripted", "Script exhausted")),
            }
        }

        fn provider_name(&self) -> &'static str {
            "scripted"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_complete_returns_text() {
            let provider = MockLlmProvider::new("mock").with_response("pong");
            let request = LlmRequest::builder().user("ping").build();

            let text = provider.complete("any-model", request).await.unwrap();

            assert_eq!(text, "pong");
        }

        #[tokio::test]
        async fn test_scripted_provider_replays_in_order() {
            let provider = ScriptedLlmProvider::new()
                .then_reply("first")
                .then_fail("boom")
                .then_reply("third");

            let req = || LlmRequest::builder().user("q").build();

            assert_eq!(provider.complete("m", req()).await.unwrap(), "first");
            assert!(provider.complete("m", req()).await.is_err());
            assert_eq!(provider.complete("m", req()).await.unwrap(), "third");
            assert!(provider.complete("m", req()).await.is_err());
            assert_eq!(provider.call_count(), 4);
        }
    }
}
