//! Token/Cost Estimator
//!
//! - `estimate_tokens_approx`: 토크나이저 없는 빠른 근사치 (4 chars ≈ 1 token)
//! - `TokenEstimator::count_tokens`: 모델 스킴의 인코더로 정확한 토큰 수
//! - `TokenEstimator::calculate_cost`: 가격표 기반 선형 비용 계산

use super::cache::EncoderCache;
use super::tiktoken::TiktokenLoader;
use super::traits::EncoderLoader;
use super::types::{CalculationReport, CostEstimate, TokenCount};
use crate::registry::ModelRegistry;
use crate::Result;
use std::sync::Arc;

/// 근사 토큰 수 = ceil(문자 수 / 4)
///
/// 전체 인코딩이 끝나기 전 UI 미리보기 용도. 빈 문자열은 0.
#[inline]
pub fn estimate_tokens_approx(text: &str) -> usize {
    count_characters(text).div_ceil(4)
}

/// 문자 수 (정규화 없음)
#[inline]
pub fn count_characters(text: &str) -> usize {
    text.chars().count()
}

/// 공백 구분 단어 수 (연속 공백, 앞뒤 공백은 빈 단어를 만들지 않음)
#[inline]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 토큰/비용 추정기
///
/// 레지스트리, 인코더 캐시, 로더를 주입받습니다. 캐시를 여러 추정기가
/// 공유하면 스킴별 인코더도 공유됩니다.
#[derive(Clone)]
pub struct TokenEstimator {
    registry: Arc<ModelRegistry>,
    cache: Arc<EncoderCache>,
    loader: Arc<dyn EncoderLoader>,
}

impl TokenEstimator {
    pub fn new(
        registry: Arc<ModelRegistry>,
        cache: Arc<EncoderCache>,
        loader: Arc<dyn EncoderLoader>,
    ) -> Self {
        Self {
            registry,
            cache,
            loader,
        }
    }

    /// 기본 레지스트리 + tiktoken 로더
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(ModelRegistry::with_defaults()),
            Arc::new(EncoderCache::new()),
            Arc::new(TiktokenLoader::new()),
        )
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &EncoderCache {
        &self.cache
    }

    /// 정확한 토큰 수 계산
    ///
    /// 인코더 로드 실패 시 `Error::Tokenizer(Unavailable)`. 근사치로의 폴백은
    /// 하지 않습니다.
    pub async fn count_tokens(&self, text: &str, model_id: &str) -> Result<TokenCount> {
        let scheme = self.registry.get_encoding_scheme(model_id);
        let encoder = self.cache.get_or_load(scheme, self.loader.as_ref()).await?;

        let tokens = encoder.count(text);
        tracing::debug!(model = model_id, %scheme, tokens, "counted tokens");

        Ok(TokenCount {
            tokens,
            characters: count_characters(text),
            words: count_words(text),
            model: model_id.to_string(),
        })
    }

    /// 비용 계산 (I/O 없음)
    ///
    /// 입력/출력 토큰 각각에 대해 선형. 가격표에 없는 모델은 0원이고
    /// `known_model == false`.
    pub fn calculate_cost(
        &self,
        input_tokens: u64,
        output_tokens: u64,
        model_id: &str,
    ) -> CostEstimate {
        let lookup = self.registry.lookup_pricing(model_id);
        let input_cost = lookup.pricing.input_cost(input_tokens);
        let output_cost = lookup.pricing.output_cost(output_tokens);

        CostEstimate {
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
            model: model_id.to_string(),
            known_model: lookup.known,
        }
    }

    /// 계산기 흐름: 토큰 수 → 비용 → 합계
    pub async fn calculate(
        &self,
        text: &str,
        output_tokens: u64,
        model_id: &str,
    ) -> Result<CalculationReport> {
        let count = self.count_tokens(text, model_id).await?;
        let input_tokens = count.tokens as u64;
        let cost = self.calculate_cost(input_tokens, output_tokens, model_id);

        Ok(CalculationReport::new(count, output_tokens, cost))
    }
}

impl std::fmt::Debug for TokenEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEstimator")
            .field("models", &self.registry.list_models().len())
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_approx() {
        assert_eq!(estimate_tokens_approx(""), 0);
        assert_eq!(estimate_tokens_approx("a"), 1);
        assert_eq!(estimate_tokens_approx("abcd"), 1);
        assert_eq!(estimate_tokens_approx("abcde"), 2);
        assert_eq!(estimate_tokens_approx("hello world"), 3);
        assert_eq!(estimate_tokens_approx(&"a".repeat(100)), 25);
    }

    #[test]
    fn test_estimate_approx_monotonic() {
        let mut last = 0;
        for len in 0..64 {
            let n = estimate_tokens_approx(&"x".repeat(len));
            assert!(n >= last);
            last = n;
        }
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
        assert_eq!(count_words("one two three"), 3);
        assert_eq!(count_words("  one\t\ttwo\nthree  "), 3);
    }

    #[test]
    fn test_count_characters() {
        assert_eq!(count_characters("hello world"), 11);
        assert_eq!(count_characters("안녕하세요"), 5);
    }

    #[test]
    fn test_calculate_cost_scenarios() {
        let estimator = TokenEstimator::with_defaults();

        let cost = estimator.calculate_cost(1_000_000, 0, "claude-4-6-opus");
        assert!((cost.input_cost - 5.0).abs() < 1e-9);
        assert_eq!(cost.output_cost, 0.0);
        assert!((cost.total_cost - 5.0).abs() < 1e-9);
        assert!(cost.known_model);

        let cost = estimator.calculate_cost(500_000, 200_000, "gpt-4o");
        assert!((cost.input_cost - 1.25).abs() < 1e-9);
        assert!((cost.output_cost - 2.0).abs() < 1e-9);
        assert!((cost.total_cost - 3.25).abs() < 1e-9);
        assert_eq!(cost.model, "gpt-4o");
    }

    #[test]
    fn test_calculate_cost_zero_tokens() {
        let estimator = TokenEstimator::with_defaults();
        for model in estimator.registry().list_models() {
            let cost = estimator.calculate_cost(0, 0, &model.id);
            assert_eq!(cost.input_cost, 0.0);
            assert_eq!(cost.output_cost, 0.0);
            assert_eq!(cost.total_cost, 0.0);
        }
    }

    #[test]
    fn test_calculate_cost_unknown_model() {
        let estimator = TokenEstimator::with_defaults();
        let cost = estimator.calculate_cost(1_000_000, 1_000_000, "gpt-9");
        assert_eq!(cost.total_cost, 0.0);
        assert!(!cost.known_model);
        assert_eq!(cost.model, "gpt-9");
    }
}
