//! Registry - 모델 메타데이터 등록/조회
//!
//! - `model/` - 모델 카탈로그, 가격표, 인코딩 스킴

pub mod model;

// Model
pub use model::{
    registry as model_registry, ModelInfo, ModelPricing, ModelRegistry, PricingLookup, Provider,
};
