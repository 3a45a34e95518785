//! Model Registry - LLM 모델 카탈로그 / 가격 / 인코딩 스킴
//!
//! 지원 모델의 단일 출처입니다.
//! - 카탈로그: `{id, 표시 이름, provider}` (순서 = 표시 순서)
//! - 가격표: 1M 토큰당 입력/출력 USD
//! - 인코딩 맵: 모델 → BPE 스킴
//!
//! 세 테이블은 분리되어 있어 어긋날 수 있습니다. 가격이 없는 모델은 0원,
//! 인코딩이 없는 모델은 `cl100k_base`로 폴백합니다.

use crate::tokenizer::EncodingScheme;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// 전역 모델 레지스트리
static MODEL_REGISTRY: OnceLock<ModelRegistry> = OnceLock::new();

/// 모델 레지스트리 접근 (기본 데이터)
pub fn registry() -> &'static ModelRegistry {
    MODEL_REGISTRY.get_or_init(ModelRegistry::with_defaults)
}

/// 모델 제공자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "OpenAI")]
    OpenAi,
    Anthropic,
    Google,
    DeepSeek,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Self::OpenAi,
        Self::Anthropic,
        Self::Google,
        Self::DeepSeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Google => "Google",
            Self::DeepSeek => "DeepSeek",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 모델 가격 정보 (USD per 1M tokens)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelPricing {
    /// 입력 토큰 가격 (1M 토큰당 USD)
    #[serde(rename = "input")]
    pub input_per_1m: f64,
    /// 출력 토큰 가격 (1M 토큰당 USD)
    #[serde(rename = "output")]
    pub output_per_1m: f64,
}

impl ModelPricing {
    /// 알 수 없는 모델용 0원 가격
    pub const ZERO: ModelPricing = ModelPricing {
        input_per_1m: 0.0,
        output_per_1m: 0.0,
    };

    pub const fn new(input: f64, output: f64) -> Self {
        Self {
            input_per_1m: input,
            output_per_1m: output,
        }
    }

    pub fn input_cost(&self, tokens: u64) -> f64 {
        (tokens as f64 / 1_000_000.0) * self.input_per_1m
    }

    pub fn output_cost(&self, tokens: u64) -> f64 {
        (tokens as f64 / 1_000_000.0) * self.output_per_1m
    }
}

/// 가격 조회 결과
///
/// `known == false`면 가격표에 없어서 0원으로 폴백한 것입니다.
/// 모델 ID 오타가 조용히 0원이 되는 것을 호출자가 구분할 수 있게 합니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingLookup {
    pub pricing: ModelPricing,
    pub known: bool,
}

/// 카탈로그 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// 모델 ID
    #[serde(rename = "value")]
    pub id: String,
    /// 표시 이름
    #[serde(rename = "label")]
    pub display_name: String,
    pub provider: Provider,
}

impl ModelInfo {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, provider: Provider) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            provider,
        }
    }
}

/// 모델 레지스트리
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    /// 표시 순서대로의 카탈로그
    models: Vec<ModelInfo>,
    pricing: HashMap<String, ModelPricing>,
    encodings: HashMap<String, EncodingScheme>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 데이터가 등록된 레지스트리
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    /// 모델 등록 (가격 + 인코딩 포함)
    ///
    /// 이미 있는 ID면 카탈로그 항목을 교체하고 위치는 유지합니다.
    pub fn register(&mut self, model: ModelInfo, pricing: ModelPricing, scheme: EncodingScheme) {
        self.pricing.insert(model.id.clone(), pricing);
        self.encodings.insert(model.id.clone(), scheme);

        match self.models.iter_mut().find(|m| m.id == model.id) {
            Some(existing) => *existing = model,
            None => self.models.push(model),
        }
    }

    /// 가격만 설정 (카탈로그에 없는 ID도 허용)
    pub fn set_pricing(&mut self, model_id: impl Into<String>, pricing: ModelPricing) {
        self.pricing.insert(model_id.into(), pricing);
    }

    /// 인코딩 스킴만 설정
    pub fn set_encoding(&mut self, model_id: impl Into<String>, scheme: EncodingScheme) {
        self.encodings.insert(model_id.into(), scheme);
    }

    /// 전체 카탈로그 (표시 순서)
    pub fn list_models(&self) -> &[ModelInfo] {
        &self.models
    }

    /// 모델 조회
    pub fn get(&self, model_id: &str) -> Option<&ModelInfo> {
        self.models.iter().find(|m| m.id == model_id)
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.get(model_id).is_some()
    }

    /// 가격 조회 (없으면 0원)
    pub fn get_pricing(&self, model_id: &str) -> ModelPricing {
        self.lookup_pricing(model_id).pricing
    }

    /// 가격 조회 + 폴백 여부
    pub fn lookup_pricing(&self, model_id: &str) -> PricingLookup {
        match self.pricing.get(model_id) {
            Some(pricing) => PricingLookup {
                pricing: *pricing,
                known: true,
            },
            None => {
                tracing::debug!(model = model_id, "no pricing entry, using zero price");
                PricingLookup {
                    pricing: ModelPricing::ZERO,
                    known: false,
                }
            }
        }
    }

    /// 인코딩 스킴 조회 (없으면 cl100k_base)
    pub fn get_encoding_scheme(&self, model_id: &str) -> EncodingScheme {
        self.encodings.get(model_id).copied().unwrap_or_else(|| {
            tracing::debug!(model = model_id, "no encoding entry, using default scheme");
            EncodingScheme::default()
        })
    }

    /// Provider별 그룹 (첫 등장 순서 유지)
    pub fn by_provider(&self) -> Vec<(Provider, Vec<&ModelInfo>)> {
        let mut groups: Vec<(Provider, Vec<&ModelInfo>)> = Vec::new();

        for model in &self.models {
            match groups.iter_mut().find(|(p, _)| *p == model.provider) {
                Some((_, models)) => models.push(model),
                None => groups.push((model.provider, vec![model])),
            }
        }

        groups
    }

    /// 기본 모델 등록
    pub fn register_defaults(&mut self) {
        use EncodingScheme::{Cl100kBase, O200kBase};
        use Provider::*;

        let defaults: [(&str, &str, Provider, f64, f64, EncodingScheme); 15] = [
            // OpenAI
            ("gpt-5", "GPT-5", OpenAi, 1.25, 10.00, O200kBase),
            ("gpt-5-mini", "GPT-5 Mini", OpenAi, 0.25, 2.00, O200kBase),
            ("gpt-5-nano", "GPT-5 Nano", OpenAi, 0.05, 0.40, O200kBase),
            ("gpt-4o", "GPT-4o", OpenAi, 2.50, 10.00, O200kBase),
            ("gpt-4o-mini", "GPT-4o Mini", OpenAi, 0.15, 0.60, O200kBase),
            ("gpt-4-turbo", "GPT-4 Turbo", OpenAi, 10.00, 30.00, O200kBase),
            ("gpt-4", "GPT-4", OpenAi, 30.00, 60.00, Cl100kBase),
            ("gpt-3.5-turbo", "GPT-3.5 Turbo", OpenAi, 0.50, 1.50, Cl100kBase),
            // Anthropic (전용 토크나이저가 없어서 cl100k로 근사)
            ("claude-4-6-opus", "Claude 4.6 Opus", Anthropic, 5.00, 25.00, Cl100kBase),
            ("claude-4-6-sonnet", "Claude 4.6 Sonnet", Anthropic, 3.00, 15.00, Cl100kBase),
            // DeepSeek
            ("deepseek-r1", "DeepSeek R1", DeepSeek, 0.55, 2.19, Cl100kBase),
            // Google
            ("gemini-3-pro", "Gemini 3 Pro", Google, 2.00, 12.00, Cl100kBase),
            ("gemini-2.5-pro", "Gemini 2.5 Pro", Google, 1.25, 10.00, Cl100kBase),
            ("gemini-2.5-flash", "Gemini 2.5 Flash", Google, 0.10, 0.40, Cl100kBase),
            ("gemini-2.0-flash", "Gemini 2.0 Flash", Google, 0.10, 0.40, Cl100kBase),
        ];

        for (id, label, provider, input, output, scheme) in defaults {
            self.register(
                ModelInfo::new(id, label, provider),
                ModelPricing::new(input, output),
                scheme,
            );
        }
    }
}
