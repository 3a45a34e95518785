//! JSON 설정 파일 위치 / 읽기
//!
//! 글로벌(`<config_dir>/tokenmeter/`)과 프로젝트(`./.tokenmeter/`) 두 계층.
//! 읽기 전용이며 파일이 없으면 해당 계층을 건너뜁니다.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 설정 디렉토리 이름
pub const APP_DIR: &str = "tokenmeter";

/// 설정 계층 하나 (디렉토리)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// 글로벌 계층 (config_dir이 없는 환경이면 None)
    pub fn global() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(APP_DIR)))
    }

    pub fn project(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(format!(".{}", APP_DIR)))
    }

    pub fn current_project() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::Config(format!("cannot resolve current directory: {}", e)))?;
        Ok(Self::project(cwd))
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    /// 파일을 읽어서 파싱 (없으면 None)
    ///
    /// 읽기/파싱 실패는 `Error::Config`이며 파일 경로와 줄:열을 담습니다.
    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Config(format!("{}: {}", path.display(), e))),
        };

        tracing::debug!(path = %path.display(), "loading config layer");
        serde_json::from_str(&content).map(Some).map_err(|e| {
            Error::Config(format!(
                "{}:{}:{}: {}",
                path.display(),
                e.line(),
                e.column(),
                e
            ))
        })
    }
}
