//! Tokenizer Trait 정의
//!
//! 외부 BPE 엔진과의 경계. 코어는 "스킴 이름 → 인코더 핸들",
//! "핸들 + 문자열 → 토큰 ID 시퀀스" 두 가지 계약에만 의존합니다.

use super::types::{EncodingScheme, TokenizerError};
use async_trait::async_trait;
use std::sync::Arc;

/// 인코더 핸들
///
/// 하나의 인코딩 스킴에 묶인 불변 리소스입니다. 생성 후에는 변경되지 않으며
/// 여러 요청에서 공유됩니다.
pub trait Encoder: Send + Sync {
    /// 이 핸들의 인코딩 스킴
    fn scheme(&self) -> EncodingScheme;

    /// 텍스트를 토큰 ID 시퀀스로 인코딩
    fn encode(&self, text: &str) -> Vec<u32>;

    /// 토큰 수만 필요할 때
    fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

/// 인코더 로더 (비동기 팩토리)
///
/// BPE 테이블 로드는 느리고 실패할 수 있으므로 중단 지점과 실패 타입을
/// 인터페이스에 드러냅니다.
#[async_trait]
pub trait EncoderLoader: Send + Sync {
    /// 스킴에 대한 인코더 생성
    async fn load(&self, scheme: EncodingScheme) -> Result<Arc<dyn Encoder>, TokenizerError>;
}
