//! Tiktoken (OpenAI BPE) 기반 인코더 로더
//!
//! tiktoken-rs 크레이트를 사용합니다. `tiktoken` feature가 꺼져 있으면
//! 로더는 항상 `Unavailable`을 반환합니다 (근사치 폴백은 호출자 몫).

use super::traits::{Encoder, EncoderLoader};
use super::types::{EncodingScheme, TokenizerError};
use async_trait::async_trait;
use std::sync::Arc;

/// tiktoken 인코더 로더
#[derive(Debug, Clone, Copy, Default)]
pub struct TiktokenLoader;

impl TiktokenLoader {
    pub fn new() -> Self {
        Self
    }

    /// 빌드에 BPE 엔진이 포함되어 있는지
    pub fn is_available() -> bool {
        cfg!(feature = "tiktoken")
    }
}

#[async_trait]
impl EncoderLoader for TiktokenLoader {
    #[cfg(feature = "tiktoken")]
    async fn load(&self, scheme: EncodingScheme) -> Result<Arc<dyn Encoder>, TokenizerError> {
        // BPE 테이블 구성은 CPU 작업이므로 blocking 풀에서 실행
        let bpe = tokio::task::spawn_blocking(move || match scheme {
            EncodingScheme::Cl100kBase => tiktoken_rs::cl100k_base(),
            EncodingScheme::O200kBase => tiktoken_rs::o200k_base(),
        })
        .await
        .map_err(|e| TokenizerError::unavailable(scheme, format!("loader task failed: {}", e)))?
        .map_err(|e| TokenizerError::unavailable(scheme, e.to_string()))?;

        Ok(Arc::new(TiktokenEncoder { scheme, bpe }))
    }

    #[cfg(not(feature = "tiktoken"))]
    async fn load(&self, scheme: EncodingScheme) -> Result<Arc<dyn Encoder>, TokenizerError> {
        Err(TokenizerError::unavailable(
            scheme,
            "built without the `tiktoken` feature",
        ))
    }
}

/// tiktoken CoreBPE 핸들
#[cfg(feature = "tiktoken")]
pub(crate) struct TiktokenEncoder {
    scheme: EncodingScheme,
    bpe: tiktoken_rs::CoreBPE,
}

#[cfg(feature = "tiktoken")]
impl Encoder for TiktokenEncoder {
    fn scheme(&self) -> EncodingScheme {
        self.scheme
    }

    fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe
            .encode_with_special_tokens(text)
            .into_iter()
            .map(|t| t as u32)
            .collect()
    }
}
