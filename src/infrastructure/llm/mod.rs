//! LLM provider implementations

mod factory;
mod gemini;
mod http_client;

pub use factory::{LlmProviderFactory, LlmProviderKind};
pub use gemini::{GeminiProvider, DEFAULT_GEMINI_BASE_URL};
pub use http_client::{HttpClient, HttpClientTrait};

#[cfg(test)]
pub use http_client::mock::{MockHttpClient, RecordedRequest};
