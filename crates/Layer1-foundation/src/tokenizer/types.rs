//! Tokenizer 타입 정의

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 서브워드 인코딩 스킴 (BPE 테이블)
///
/// 여러 모델이 하나의 스킴을 공유할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingScheme {
    /// cl100k_base - GPT-4, GPT-3.5 (기본값)
    #[serde(rename = "cl100k_base")]
    Cl100kBase,
    /// o200k_base - GPT-4o, GPT-5
    #[serde(rename = "o200k_base")]
    O200kBase,
}

impl Default for EncodingScheme {
    fn default() -> Self {
        Self::Cl100kBase
    }
}

impl EncodingScheme {
    pub const ALL: [EncodingScheme; 2] = [Self::Cl100kBase, Self::O200kBase];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cl100kBase => "cl100k_base",
            Self::O200kBase => "o200k_base",
        }
    }
}

impl fmt::Display for EncodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingScheme {
    type Err = TokenizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s.trim())
            .ok_or_else(|| TokenizerError::UnknownScheme(s.to_string()))
    }
}

/// 토큰 수 결과 (정밀 경로)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    /// 인코더가 반환한 토큰 ID 개수
    pub tokens: usize,
    /// 문자 수 (정규화 없음)
    pub characters: usize,
    /// 공백으로 구분된 단어 수
    pub words: usize,
    /// 요청한 모델 ID
    pub model: String,
}

/// 비용 추정 결과 (USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub input_cost: f64,
    pub output_cost: f64,
    /// input_cost + output_cost
    pub total_cost: f64,
    pub model: String,
    /// false면 가격표에 없는 모델 (0원 폴백)
    pub known_model: bool,
}

/// 계산기 결과 (입력 토큰 + 예상 출력 토큰 + 비용)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationReport {
    pub count: TokenCount,
    pub output_tokens: u64,
    /// count.tokens + output_tokens
    pub total_tokens: u64,
    pub cost: CostEstimate,
}

impl CalculationReport {
    /// 합계는 u64 범위에서 포화 (오버플로 없음)
    pub fn new(count: TokenCount, output_tokens: u64, cost: CostEstimate) -> Self {
        Self {
            total_tokens: (count.tokens as u64).saturating_add(output_tokens),
            output_tokens,
            count,
            cost,
        }
    }
}

/// 토크나이저 에러
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizerError {
    /// 토크나이저 로드/초기화 실패 (타임아웃 포함)
    #[error("Tokenizer unavailable for {scheme}: {reason}")]
    Unavailable {
        scheme: EncodingScheme,
        reason: String,
    },
    /// 알 수 없는 인코딩 스킴 이름
    #[error("Unknown encoding scheme: {0}")]
    UnknownScheme(String),
}

impl TokenizerError {
    pub fn unavailable(scheme: EncodingScheme, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            scheme,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_parse() {
        assert_eq!(
            "o200k_base".parse::<EncodingScheme>().unwrap(),
            EncodingScheme::O200kBase
        );
        assert_eq!(
            " cl100k_base ".parse::<EncodingScheme>().unwrap(),
            EncodingScheme::Cl100kBase
        );
        assert_eq!(
            "p50k_base".parse::<EncodingScheme>(),
            Err(TokenizerError::UnknownScheme("p50k_base".to_string()))
        );
    }

    #[test]
    fn test_scheme_serde_names() {
        let json = serde_json::to_string(&EncodingScheme::O200kBase).unwrap();
        assert_eq!(json, "\"o200k_base\"");

        let scheme: EncodingScheme = serde_json::from_str("\"cl100k_base\"").unwrap();
        assert_eq!(scheme, EncodingScheme::Cl100kBase);
        assert_eq!(EncodingScheme::default(), EncodingScheme::Cl100kBase);
    }

    #[test]
    fn test_cost_estimate_json_shape() {
        let estimate = CostEstimate {
            input_cost: 1.25,
            output_cost: 2.0,
            total_cost: 3.25,
            model: "gpt-4o".to_string(),
            known_model: true,
        };
        let value = serde_json::to_value(&estimate).unwrap();
        assert_eq!(value["totalCost"], 3.25);
        assert_eq!(value["knownModel"], true);
    }

    #[test]
    fn test_report_total_saturates() {
        let count = TokenCount {
            tokens: 3,
            characters: 12,
            words: 1,
            model: "gpt-4o".to_string(),
        };
        let cost = CostEstimate {
            input_cost: 0.0,
            output_cost: 0.0,
            total_cost: 0.0,
            model: "gpt-4o".to_string(),
            known_model: true,
        };

        let report = CalculationReport::new(count.clone(), 150, cost.clone());
        assert_eq!(report.total_tokens, 153);

        let report = CalculationReport::new(count, u64::MAX, cost);
        assert_eq!(report.output_tokens, u64::MAX);
        assert_eq!(report.total_tokens, u64::MAX);
    }
}
