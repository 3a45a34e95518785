//! TokenEstimator 통합 테스트 - 스텁 인코더 사용 (BPE 테이블 불필요)
//!
//! `cargo test -p tokenmeter-foundation --test estimator_test`

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokenmeter_foundation::{
    Encoder, EncoderCache, EncoderLoader, EncodingScheme, ModelRegistry, TokenEstimator,
    TokenizerError,
};

/// ceil(len / 4)개의 ID를 돌려주는 인코더
struct QuarterEncoder(EncodingScheme);

impl Encoder for QuarterEncoder {
    fn scheme(&self) -> EncodingScheme {
        self.0
    }

    fn encode(&self, text: &str) -> Vec<u32> {
        vec![0; text.chars().count().div_ceil(4)]
    }
}

#[derive(Default)]
struct StubLoader {
    loads: AtomicUsize,
}

#[async_trait]
impl EncoderLoader for StubLoader {
    async fn load(&self, scheme: EncodingScheme) -> Result<Arc<dyn Encoder>, TokenizerError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(Arc::new(QuarterEncoder(scheme)))
    }
}

struct FailingLoader;

#[async_trait]
impl EncoderLoader for FailingLoader {
    async fn load(&self, scheme: EncodingScheme) -> Result<Arc<dyn Encoder>, TokenizerError> {
        Err(TokenizerError::unavailable(scheme, "module failed to initialize"))
    }
}

fn estimator_with(loader: Arc<dyn EncoderLoader>) -> (TokenEstimator, Arc<EncoderCache>) {
    let cache = Arc::new(EncoderCache::new());
    let estimator = TokenEstimator::new(
        Arc::new(ModelRegistry::with_defaults()),
        Arc::clone(&cache),
        loader,
    );
    (estimator, cache)
}

#[tokio::test]
async fn test_count_tokens_with_stub_encoder() {
    let (estimator, _) = estimator_with(Arc::new(StubLoader::default()));

    let result = estimator.count_tokens("abcdefgh", "gpt-4o").await.unwrap();
    assert_eq!(result.tokens, 2);
    assert_eq!(result.characters, 8);
    assert_eq!(result.words, 1);
    assert_eq!(result.model, "gpt-4o");

    let result = estimator
        .count_tokens("hello world test", "claude-4-6-sonnet")
        .await
        .unwrap();
    assert_eq!(result.tokens, 4);
    assert_eq!(result.words, 3);
}

#[tokio::test]
async fn test_count_tokens_text_statistics() {
    let (estimator, _) = estimator_with(Arc::new(StubLoader::default()));

    let text = "hello world";
    let result = estimator.count_tokens(text, "gpt-4o").await.unwrap();
    assert_eq!(result.characters, text.len());

    let result = estimator.count_tokens("one two three", "claude-4-6-opus").await.unwrap();
    assert_eq!(result.words, 3);

    let result = estimator.count_tokens("", "gpt-4o").await.unwrap();
    assert_eq!(result.tokens, 0);
    assert_eq!(result.characters, 0);
    assert_eq!(result.words, 0);
}

#[tokio::test]
async fn test_encoder_shared_per_scheme() {
    let loader = Arc::new(StubLoader::default());
    let (estimator, cache) = estimator_with(loader.clone());

    // o200k_base
    estimator.count_tokens("a", "gpt-4o").await.unwrap();
    estimator.count_tokens("b", "gpt-5").await.unwrap();
    // cl100k_base
    estimator.count_tokens("c", "gpt-4").await.unwrap();
    estimator.count_tokens("d", "gemini-2.5-pro").await.unwrap();

    assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
    assert!(cache.contains(EncodingScheme::O200kBase));
    assert!(cache.contains(EncodingScheme::Cl100kBase));

    cache.clear();
    estimator.count_tokens("e", "gpt-4o").await.unwrap();
    assert_eq!(loader.loads.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_unknown_model_uses_default_scheme() {
    let loader = Arc::new(StubLoader::default());
    let (estimator, cache) = estimator_with(loader);

    let result = estimator.count_tokens("abcd", "not-a-model").await.unwrap();
    assert_eq!(result.tokens, 1);
    assert_eq!(result.model, "not-a-model");
    assert!(cache.contains(EncodingScheme::Cl100kBase));
    assert!(!cache.contains(EncodingScheme::O200kBase));
}

#[tokio::test]
async fn test_tokenizer_unavailable() {
    let (estimator, cache) = estimator_with(Arc::new(FailingLoader));

    let err = estimator.count_tokens("hello", "gpt-4o").await.unwrap_err();
    assert!(err.is_tokenizer_unavailable());
    assert!(cache.is_empty(), "failed load must not populate the cache");

    // 비용 계산은 토크나이저와 무관
    let cost = estimator.calculate_cost(1_000, 0, "gpt-4o");
    assert!(cost.total_cost > 0.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_counts_share_one_encoder() {
    let loader = Arc::new(StubLoader::default());
    let (estimator, cache) = estimator_with(loader.clone());

    let mut handles = Vec::new();
    for i in 0..16 {
        let estimator = estimator.clone();
        handles.push(tokio::spawn(async move {
            estimator
                .count_tokens(&"x".repeat(i * 4), "gpt-4o")
                .await
                .map(|c| (i, c.tokens))
        }));
    }

    for handle in handles {
        let (i, tokens) = handle.await.unwrap().unwrap();
        assert_eq!(tokens, i);
    }

    // 동시 로드는 중복될 수 있지만 캐시에는 하나만 남음
    assert!(loader.loads.load(Ordering::SeqCst) >= 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_calculate_report() {
    let (estimator, _) = estimator_with(Arc::new(StubLoader::default()));

    let text = "x".repeat(4_000_000);
    let report = estimator.calculate(&text, 200_000, "gpt-4o").await.unwrap();

    assert_eq!(report.count.tokens, 1_000_000);
    assert_eq!(report.output_tokens, 200_000);
    assert_eq!(report.total_tokens, 1_200_000);
    assert!((report.cost.input_cost - 2.5).abs() < 1e-9);
    assert!((report.cost.output_cost - 2.0).abs() < 1e-9);
    assert!((report.cost.total_cost - 4.5).abs() < 1e-9);
    assert!(report.cost.known_model);
}

#[tokio::test]
async fn test_calculate_with_max_output_tokens() {
    let (estimator, _) = estimator_with(Arc::new(StubLoader::default()));

    let report = estimator.calculate("abc", u64::MAX, "gpt-4o").await.unwrap();
    assert_eq!(report.count.tokens, 1);
    assert_eq!(report.output_tokens, u64::MAX);
    assert_eq!(report.total_tokens, u64::MAX);
    assert!(report.cost.output_cost.is_finite());
    assert!(report.cost.total_cost > 0.0);
}

#[test]
fn test_cost_is_linear_and_additive() {
    let (estimator, _) = estimator_with(Arc::new(StubLoader::default()));
    let registry = ModelRegistry::with_defaults();

    let samples: [(u64, u64); 5] = [
        (0, 0),
        (1, 0),
        (0, 1),
        (123_456, 7_890),
        (3_000_000, 1_500_000),
    ];

    for model in registry.list_models() {
        let pricing = registry.get_pricing(&model.id);
        for (input, output) in samples {
            let cost = estimator.calculate_cost(input, output, &model.id);
            let expected = input as f64 / 1e6 * pricing.input_per_1m
                + output as f64 / 1e6 * pricing.output_per_1m;
            assert!((cost.total_cost - expected).abs() < 1e-9);
            assert!((cost.total_cost - (cost.input_cost + cost.output_cost)).abs() < 1e-12);
        }
    }
}

#[test]
fn test_cost_reference_models() {
    let (estimator, _) = estimator_with(Arc::new(StubLoader::default()));

    let cost = estimator.calculate_cost(0, 1_000_000, "claude-4-6-opus");
    assert_eq!(cost.input_cost, 0.0);
    assert!((cost.output_cost - 25.0).abs() < 1e-9);

    let cost = estimator.calculate_cost(1_000_000, 1_000_000, "gpt-4o-mini");
    assert!((cost.total_cost - 0.75).abs() < 1e-9);

    let cost = estimator.calculate_cost(1_000_000, 1_000_000, "deepseek-r1");
    assert!((cost.total_cost - 2.74).abs() < 1e-9);

    let cost = estimator.calculate_cost(1_000_000, 1_000_000, "gemini-2.5-flash");
    assert!((cost.total_cost - 0.50).abs() < 1e-9);

    let cost = estimator.calculate_cost(1_000, 0, "gpt-4");
    assert!((cost.input_cost - 0.03).abs() < 1e-9);
}
