//! Storage module for TokenMeter
//!
//! - `json`: 설정 계층 위치와 JSON 읽기

mod json;

// JSON Storage (범용)
pub use json::{JsonStore, APP_DIR};
