//! Offline embedding provider based on feature hashing
//!
//! Each lowercase word is hashed into one of `dimensions` buckets with a
//! signed weight, and the result is L2-normalized. Texts sharing vocabulary
//! land close together under cosine similarity. No network access is needed,
//! so this provider backs local development and tests.

use async_trait::async_trait;

use crate::domain::embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Debug, Clone)]
pub struct HashingEmbeddingProvider {
    dimensions: usize,
    model: String,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Result<Self, DomainError> {
        if dimensions == 0 {
            return Err(DomainError::configuration(
                "Hashing embedding dimensions must be greater than 0",
            ));
        }

        Ok(Self {
            dimensions,
            model: format!("feature-hashing-{}", dimensions),
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = fnv1a(token.to_lowercase().as_bytes());
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }

        vector
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let data = request
            .inputs()
            .iter()
            .map(|text| Embedding::new(self.embed_text(text)))
            .collect();

        Ok(EmbeddingResponse::new(&self.model, data))
    }

    fn provider_name(&self) -> &'static str {
        "hashing"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::cosine_similarity;

    #[tokio::test]
    async fn test_vectors_are_normalized() {
        let provider = HashingEmbeddingProvider::new(64).unwrap();

        let vector = provider.embed_query("Annual leave policy").await.unwrap();
        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();

        assert_eq!(vector.len(), 64);
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_shared_vocabulary_scores_higher() {
        let provider = HashingEmbeddingProvider::new(256).unwrap();

        let query = provider.embed_query("annual leave days").await.unwrap();
        let related = provider
            .embed_query("Employees receive 20 annual leave days per year")
            .await
            .unwrap();
        let unrelated = provider
            .embed_query("The VPN client must be updated monthly")
            .await
            .unwrap();

        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }

    #[tokio::test]
    async fn test_case_insensitive_and_deterministic() {
        let provider = HashingEmbeddingProvider::new(32).unwrap();

        let a = provider.embed_query("Leave Policy").await.unwrap();
        let b = provider.embed_query("leave policy").await.unwrap();

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let provider = HashingEmbeddingProvider::new(8).unwrap();

        let vector = provider.embed_query("  ").await.unwrap();

        assert!(vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(HashingEmbeddingProvider::new(0).is_err());
    }
}
