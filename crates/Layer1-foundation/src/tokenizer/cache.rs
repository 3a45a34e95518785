//! Encoder Cache - 스킴별 인코더 메모이제이션
//!
//! 스킴당 한 번 생성, 이후 읽기 전용으로 재사용합니다.
//! 동시에 같은 스킴을 로드하면 둘 다 생성될 수 있지만 먼저 삽입된 핸들만
//! 남고 나머지는 버려집니다. 실패한 로드는 캐시에 남지 않습니다.

use super::traits::{Encoder, EncoderLoader};
use super::types::{EncodingScheme, TokenizerError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// 인코더 캐시
#[derive(Default)]
pub struct EncoderCache {
    encoders: RwLock<HashMap<EncodingScheme, Arc<dyn Encoder>>>,
    /// 로드 타임아웃 (None이면 제한 없음)
    load_timeout: Option<Duration>,
}

impl EncoderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout
    }

    /// 캐시에서 가져오거나 로더로 생성
    pub async fn get_or_load(
        &self,
        scheme: EncodingScheme,
        loader: &dyn EncoderLoader,
    ) -> Result<Arc<dyn Encoder>, TokenizerError> {
        if let Some(encoder) = self.get(scheme) {
            tracing::trace!(%scheme, "encoder cache hit");
            return Ok(encoder);
        }

        tracing::debug!(%scheme, "encoder cache miss, loading");

        // 락 밖에서 로드 (await 중 락 보유 금지)
        let loaded = match self.load_timeout {
            Some(timeout) => tokio::time::timeout(timeout, loader.load(scheme))
                .await
                .map_err(|_| {
                    TokenizerError::unavailable(
                        scheme,
                        format!("load timed out after {}ms", timeout.as_millis()),
                    )
                })
                .and_then(|r| r),
            None => loader.load(scheme).await,
        };

        let encoder = match loaded {
            Ok(encoder) => encoder,
            Err(e) => {
                tracing::warn!(%scheme, error = %e, "failed to load encoder");
                return Err(e);
            }
        };

        let mut encoders = self.encoders.write();
        let cached = encoders.entry(scheme).or_insert_with(|| {
            tracing::info!(%scheme, "encoder loaded");
            encoder
        });
        Ok(Arc::clone(cached))
    }

    /// 캐시된 인코더 (로드하지 않음)
    pub fn get(&self, scheme: EncodingScheme) -> Option<Arc<dyn Encoder>> {
        self.encoders.read().get(&scheme).map(Arc::clone)
    }

    pub fn contains(&self, scheme: EncodingScheme) -> bool {
        self.encoders.read().contains_key(&scheme)
    }

    pub fn len(&self) -> usize {
        self.encoders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.read().is_empty()
    }

    /// 캐시 비우기 (테스트 격리용)
    pub fn clear(&self) {
        self.encoders.write().clear();
    }
}

impl std::fmt::Debug for EncoderCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schemes: Vec<EncodingScheme> = self.encoders.read().keys().copied().collect();
        f.debug_struct("EncoderCache")
            .field("schemes", &schemes)
            .field("load_timeout", &self.load_timeout)
            .finish()
    }
}
