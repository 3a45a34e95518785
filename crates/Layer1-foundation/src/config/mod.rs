//! Config - 설정 관리
//!
//! - `calculator.rs` - 기본 모델, 출력 토큰, 로드 타임아웃, 가격/인코딩 오버라이드

mod calculator;

pub use calculator::{CalculatorConfig, CONFIG_FILE, DEFAULT_MODEL};
