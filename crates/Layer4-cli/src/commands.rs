//! Subcommand handlers

use crate::render;
use anyhow::{bail, Context};
use std::path::PathBuf;
use tokenmeter_foundation::{
    count_characters, count_words, estimate_tokens_approx, CalculationReport, CalculatorConfig,
    Collection, PromptLibrary, TokenCount, TokenEstimator,
};

/// 입력 텍스트 소스 (하나만 지정)
#[derive(clap::Args, Debug, Default)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Text to analyze ("-" reads stdin)
    pub text: Option<String>,

    /// Read text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Use a library prompt, as <collection>/<id> (e.g. nba/nba-analyst)
    #[arg(short, long)]
    pub prompt: Option<String>,
}

pub struct App {
    estimator: TokenEstimator,
    config: CalculatorConfig,
    library: PromptLibrary,
}

impl App {
    pub fn new(estimator: TokenEstimator, config: CalculatorConfig) -> Self {
        Self {
            estimator,
            config,
            library: PromptLibrary::with_defaults(),
        }
    }

    pub fn models(&self) -> anyhow::Result<()> {
        print!("{}", render::model_list(self.estimator.registry()));
        Ok(())
    }

    pub fn pricing(&self, json: bool) -> anyhow::Result<()> {
        let registry = self.estimator.registry();
        if json {
            println!("{}", serde_json::to_string_pretty(&render::pricing_rows(registry))?);
        } else {
            print!("{}", render::pricing_table(registry));
        }
        Ok(())
    }

    pub async fn count(
        &self,
        input: &InputArgs,
        model: &str,
        approx: bool,
        json: bool,
    ) -> anyhow::Result<()> {
        let text = self.read_input(input)?;
        let count = self.token_count(&text, model, approx).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&count)?);
        } else {
            print!("{}", render::token_count(&count, approx));
        }
        Ok(())
    }

    pub fn cost(&self, input: u64, output: u64, model: &str, json: bool) -> anyhow::Result<()> {
        let cost = self.estimator.calculate_cost(input, output, model);

        if json {
            println!("{}", serde_json::to_string_pretty(&cost)?);
        } else {
            print!("{}", render::cost(&cost));
        }
        Ok(())
    }

    pub async fn calc(
        &self,
        input: &InputArgs,
        output: Option<u64>,
        model: &str,
        approx: bool,
        json: bool,
    ) -> anyhow::Result<()> {
        let text = self.read_input(input)?;
        if text.trim().is_empty() {
            bail!("input text is empty");
        }

        let output_tokens = output.unwrap_or_else(|| self.config.output_tokens());
        let report = if approx {
            let count = self.token_count(&text, model, true).await?;
            let cost = self
                .estimator
                .calculate_cost(count.tokens as u64, output_tokens, model);
            CalculationReport::new(count, output_tokens, cost)
        } else {
            self.estimator
                .calculate(&text, output_tokens, model)
                .await
                .map_err(with_hint)?
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render::report(&report, approx));
        }
        Ok(())
    }

    pub fn prompts(&self, collection: Option<&str>) -> anyhow::Result<()> {
        let collections = match collection {
            Some(name) => vec![name.parse::<Collection>()?],
            None => Collection::ALL.to_vec(),
        };

        for collection in collections {
            print!(
                "{}",
                render::prompt_list(collection, self.library.list(collection))
            );
        }
        Ok(())
    }

    /// 정밀 경로 또는 근사치
    async fn token_count(&self, text: &str, model: &str, approx: bool) -> anyhow::Result<TokenCount> {
        if approx {
            return Ok(TokenCount {
                tokens: estimate_tokens_approx(text),
                characters: count_characters(text),
                words: count_words(text),
                model: model.to_string(),
            });
        }

        self.estimator
            .count_tokens(text, model)
            .await
            .map_err(with_hint)
    }

    fn read_input(&self, input: &InputArgs) -> anyhow::Result<String> {
        if let Some(path) = &input.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }

        if let Some(reference) = &input.prompt {
            return Ok(self.library.resolve(reference)?.content.clone());
        }

        match input.text.as_deref() {
            Some("-") => std::io::read_to_string(std::io::stdin()).context("failed to read stdin"),
            Some(text) => Ok(text.to_string()),
            None => bail!("no input given"),
        }
    }
}

/// 토크나이저 로드 실패 시 근사치 옵션 안내
fn with_hint(e: tokenmeter_foundation::Error) -> anyhow::Error {
    if e.is_tokenizer_unavailable() {
        anyhow::Error::new(e).context("tokenizer unavailable; rerun with --approx for an estimate")
    } else {
        e.into()
    }
}
