//! Calculator Config - 계산기 설정
//!
//! 글로벌(`<config_dir>/tokenmeter/config.json`)과 프로젝트
//! (`./.tokenmeter/config.json`) 설정을 병합합니다. 프로젝트가 우선입니다.

use crate::registry::{ModelPricing, ModelRegistry};
use crate::storage::JsonStore;
use crate::tokenizer::EncodingScheme;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// 설정 파일명
pub const CONFIG_FILE: &str = "config.json";

/// 기본 모델
pub const DEFAULT_MODEL: &str = "claude-4-6-sonnet";

/// 계산기 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorConfig {
    /// 기본 모델 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// 기본 예상 출력 토큰
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_output_tokens: Option<u64>,

    /// 인코더 로드 타임아웃 (밀리초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_timeout_ms: Option<u64>,

    /// 모델별 가격 오버라이드 (USD per 1M tokens)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pricing: BTreeMap<String, ModelPricing>,

    /// 모델별 인코딩 스킴 오버라이드 ("cl100k_base" | "o200k_base")
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub encodings: BTreeMap<String, String>,
}

impl CalculatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드 (프로젝트 우선)
    pub fn load() -> Result<Self> {
        let layers = JsonStore::global()
            .into_iter()
            .chain(std::iter::once(JsonStore::current_project()?));
        Self::load_layers(layers)
    }

    /// 계층 순서대로 병합 (뒤쪽이 우선, 파일이 없는 계층은 건너뜀)
    pub fn load_layers(layers: impl IntoIterator<Item = JsonStore>) -> Result<Self> {
        let mut config = Self::new();
        for store in layers {
            if let Some(layer) = store.load_optional::<Self>(CONFIG_FILE)? {
                config.merge(layer);
            }
        }
        Ok(config)
    }

    // ========================================================================
    // Merge / Apply
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: CalculatorConfig) {
        if other.default_model.is_some() {
            self.default_model = other.default_model;
        }
        if other.default_output_tokens.is_some() {
            self.default_output_tokens = other.default_output_tokens;
        }
        if other.load_timeout_ms.is_some() {
            self.load_timeout_ms = other.load_timeout_ms;
        }
        self.pricing.extend(other.pricing);
        self.encodings.extend(other.encodings);
    }

    /// 레지스트리에 오버라이드 적용
    pub fn apply(&self, registry: &mut ModelRegistry) -> Result<()> {
        for (model_id, pricing) in &self.pricing {
            if pricing.input_per_1m < 0.0 || pricing.output_per_1m < 0.0 {
                return Err(Error::Config(format!(
                    "Negative pricing for {}",
                    model_id
                )));
            }
            registry.set_pricing(model_id.clone(), *pricing);
        }

        for (model_id, name) in &self.encodings {
            let scheme: EncodingScheme = name
                .parse()
                .map_err(|e| Error::Config(format!("{} (model {})", e, model_id)))?;
            registry.set_encoding(model_id.clone(), scheme);
        }

        tracing::debug!(
            pricing = self.pricing.len(),
            encodings = self.encodings.len(),
            "applied registry overrides"
        );
        Ok(())
    }

    pub fn model(&self) -> &str {
        self.default_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn output_tokens(&self) -> u64 {
        self.default_output_tokens.unwrap_or(0)
    }

    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn default_output_tokens(mut self, tokens: u64) -> Self {
        self.default_output_tokens = Some(tokens);
        self
    }

    pub fn load_timeout_ms(mut self, ms: u64) -> Self {
        self.load_timeout_ms = Some(ms);
        self
    }

    pub fn pricing_override(mut self, model: impl Into<String>, input: f64, output: f64) -> Self {
        self.pricing.insert(model.into(), ModelPricing::new(input, output));
        self
    }

    pub fn encoding_override(mut self, model: impl Into<String>, scheme: impl Into<String>) -> Self {
        self.encodings.insert(model.into(), scheme.into());
        self
    }
}
