//! Prompt Library - 종목별 프롬프트 모음 (메모리 전용)
//!
//! 생성/수정/삭제/조회만 지원하며 프로세스 종료 시 사라집니다.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 프롬프트 모음
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Nba,
    Ncaa,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Self::Nba, Self::Ncaa];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nba => "nba",
            Self::Ncaa => "ncaa",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Nba => "NBA Prompts",
            Self::Ncaa => "NCAA Prompts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nba" => Ok(Self::Nba),
            "ncaa" => Ok(Self::Ncaa),
            other => Err(Error::NotFound(format!("collection '{}'", other))),
        }
    }
}

/// 프롬프트 레코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

/// 프롬프트 라이브러리
#[derive(Debug, Clone, Default)]
pub struct PromptLibrary {
    prompts: HashMap<Collection, Vec<Prompt>>,
}

impl PromptLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 분석가 프롬프트가 들어 있는 라이브러리
    pub fn with_defaults() -> Self {
        let mut library = Self::new();
        library.insert(Collection::Nba, "nba-analyst", "NBA Betting Analyst", NBA_ANALYST);
        library.insert(
            Collection::Ncaa,
            "ncaa-analyst",
            "NCAA men's basketball Betting Analyst",
            NCAA_ANALYST,
        );
        library
    }

    fn insert(&mut self, collection: Collection, id: &str, title: &str, content: &str) {
        self.prompts.entry(collection).or_default().push(Prompt {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            updated_at: Utc::now(),
        });
    }

    /// 모음의 프롬프트 목록 (생성 순서)
    pub fn list(&self, collection: Collection) -> &[Prompt] {
        self.prompts
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get(&self, collection: Collection, id: &str) -> Result<&Prompt> {
        self.list(collection)
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("prompt '{}' in {}", id, collection)))
    }

    /// 새 프롬프트 생성, ID 반환
    pub fn create(
        &mut self,
        collection: Collection,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<String> {
        let (title, content) = validate(title.into(), content.into())?;
        let id = uuid::Uuid::new_v4().to_string();

        self.prompts.entry(collection).or_default().push(Prompt {
            id: id.clone(),
            title,
            content,
            updated_at: Utc::now(),
        });

        tracing::debug!(%collection, id = %id, "prompt created");
        Ok(id)
    }

    /// 제목/내용 수정
    pub fn update(
        &mut self,
        collection: Collection,
        id: &str,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<&Prompt> {
        let (title, content) = validate(title.into(), content.into())?;

        let prompt = self
            .prompts
            .get_mut(&collection)
            .and_then(|prompts| prompts.iter_mut().find(|p| p.id == id))
            .ok_or_else(|| Error::NotFound(format!("prompt '{}' in {}", id, collection)))?;

        prompt.title = title;
        prompt.content = content;
        prompt.updated_at = Utc::now();
        Ok(prompt)
    }

    /// 삭제된 프롬프트 반환
    pub fn delete(&mut self, collection: Collection, id: &str) -> Result<Prompt> {
        let prompts = self.prompts.entry(collection).or_default();
        let index = prompts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("prompt '{}' in {}", id, collection)))?;

        tracing::debug!(%collection, id, "prompt deleted");
        Ok(prompts.remove(index))
    }

    /// "collection/id" 형식 참조로 조회
    pub fn resolve(&self, reference: &str) -> Result<&Prompt> {
        let (collection, id) = reference.split_once('/').ok_or_else(|| {
            Error::InvalidInput(format!(
                "prompt reference must be <collection>/<id>, got '{}'",
                reference
            ))
        })?;
        self.get(collection.parse()?, id)
    }
}

/// 공백뿐인 제목/내용 거부
fn validate(title: String, content: String) -> Result<(String, String)> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("prompt title is empty".to_string()));
    }
    if content.trim().is_empty() {
        return Err(Error::InvalidInput("prompt content is empty".to_string()));
    }
    Ok((title, content))
}

const NBA_ANALYST: &str = "\
CONTEXT:
The user is an informed sports bettor who understands market efficiency, closing line value (CLV), and advanced basketball metrics. They want disciplined, data-driven insights on NBA spreads, moneylines, totals and player props.

ROLE:
You are a Senior Quantitative Sports Betting Analyst. Prioritize risk mitigation, value identification and bankroll discipline over narratives.

ACTION:
For any NBA games requested, create:
1. Two conservative single bets
2. Two conservative three-leg or four-leg prop parlay bets

OUTPUT FORMAT:
Brief overview, bullet-point explanation per bet, and a summary table with Bet Type, Selection, Market, Rationale, Risk Level, Confidence (1-5) and EV %.

CONSTRAINTS:
Do not guarantee outcomes. State assumptions when key information is missing.

TONE:
Professional, analytical, calm and disciplined.";

const NCAA_ANALYST: &str = "\
CONTEXT:
The user is an informed sports bettor who follows KenPom, BartTorvik and Haslametrics and targets NCAA Men's Basketball spreads, moneylines and totals.

ROLE:
You are a Senior Quantitative Sports Betting Analyst focused on efficiency margins, tempo and strength of schedule.

ACTION:
For any NCAA games requested, create two conservative single bets and one conservative parlay, each with a short rationale.

DECISION-MAKING RULES:
Use 3-year ATS trends, head-to-head data and home/away splits. Avoid trap games, revenge narratives and small-sample hot streaks.

OUTPUT FORMAT:
Brief overview, bet explanations, and a summary table with Risk Level, Confidence (1-5) and EV %.

TONE:
Professional, analytical, calm and disciplined.";
