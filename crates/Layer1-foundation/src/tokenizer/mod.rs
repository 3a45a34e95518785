//! Tokenizer Module - 모델별 토큰 수 / 비용 계산
//!
//! 모델 ID → 인코딩 스킴 → 캐시된 인코더 → 토큰 수 → 비용.
//!
//! ## 인코딩 스킴
//!
//! | Scheme | 모델 | 라이브러리 |
//! |--------|------|-----------|
//! | o200k_base | GPT-5, GPT-4o, GPT-4 Turbo | tiktoken-rs |
//! | cl100k_base | GPT-4, GPT-3.5, Claude, Gemini, DeepSeek (근사) | tiktoken-rs |
//!
//! ## 사용법
//!
//! ```ignore
//! use tokenmeter_foundation::tokenizer::TokenEstimator;
//!
//! let estimator = TokenEstimator::with_defaults();
//!
//! // 정확한 토큰 수 (인코더는 스킴별로 한 번만 로드)
//! let count = estimator.count_tokens("Hello, world!", "gpt-4o").await?;
//!
//! // 비용 (입력 토큰 + 예상 출력 토큰)
//! let cost = estimator.calculate_cost(count.tokens as u64, 150, "gpt-4o");
//! println!("${:.4}", cost.total_cost);
//! ```

mod cache;
mod estimator;
mod tiktoken;
mod traits;
mod types;

pub use cache::EncoderCache;
pub use estimator::{count_characters, count_words, estimate_tokens_approx, TokenEstimator};
pub use tiktoken::TiktokenLoader;
pub use traits::{Encoder, EncoderLoader};
pub use types::{CalculationReport, CostEstimate, EncodingScheme, TokenCount, TokenizerError};
