//! # tokenmeter-foundation
//!
//! Foundation layer for TokenMeter:
//! - Registry: 모델 카탈로그, 가격표, 인코딩 스킴
//! - Tokenizer: 인코더 캐시, 토큰 수 / 비용 계산
//! - Library: 종목별 프롬프트 모음 (메모리 전용)
//! - Config: 계산기 설정 (글로벌 + 프로젝트 JSON)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  TokenEstimator                                      │
//! │   count_tokens(text, model)   calculate_cost(i, o, m)│
//! │        │                              │              │
//! │        ▼                              ▼              │
//! │  ModelRegistry ── encoding ──┐   ModelRegistry       │
//! │                              ▼     (pricing)         │
//! │                  EncoderCache ── EncoderLoader       │
//! │                                   (tiktoken-rs)      │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod library;
pub mod registry;
pub mod storage;
pub mod tokenizer;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{CalculatorConfig, CONFIG_FILE, DEFAULT_MODEL};

// ============================================================================
// Registry (레지스트리)
// ============================================================================
pub use registry::{
    model_registry, ModelInfo, ModelPricing, ModelRegistry, PricingLookup, Provider,
};

// ============================================================================
// Tokenizer (토큰 / 비용)
// ============================================================================
pub use tokenizer::{
    count_characters, count_words, estimate_tokens_approx, CalculationReport, CostEstimate,
    Encoder, EncoderCache, EncoderLoader, EncodingScheme, TiktokenLoader, TokenCount,
    TokenEstimator, TokenizerError,
};

// ============================================================================
// Library (프롬프트)
// ============================================================================
pub use library::{Collection, Prompt, PromptLibrary};

// ============================================================================
// Storage
// ============================================================================
pub use storage::JsonStore;
