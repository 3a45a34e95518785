//! Error types for TokenMeter
//!
//! 모든 에러를 중앙에서 관리

use crate::tokenizer::TokenizerError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// TokenMeter 에러 타입
///
/// 알 수 없는 모델은 에러가 아닙니다. 가격/인코딩 조회는 0원 / 기본 스킴으로
/// 폴백하고, 결과의 `known` 플래그로만 구분됩니다.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 토크나이저 관련
    // ========================================================================
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 토크나이저를 사용할 수 없어서 실패했는지 확인
    ///
    /// 호출자(UI/CLI)가 근사치 추정으로 전환할지 결정할 때 사용합니다.
    pub fn is_tokenizer_unavailable(&self) -> bool {
        matches!(self, Error::Tokenizer(TokenizerError::Unavailable { .. }))
    }

    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::InvalidInput(_) | Error::Config(_)
        )
    }
}
