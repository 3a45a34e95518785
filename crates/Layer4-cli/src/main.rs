//! TokenMeter CLI - Main entry point

mod commands;
mod render;

use clap::{Parser, Subcommand};
use commands::{App, InputArgs};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokenmeter_foundation::{
    CalculatorConfig, EncoderCache, ModelRegistry, TiktokenLoader, TokenEstimator,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// TokenMeter - token counts and API cost estimates for LLM prompts
#[derive(Parser, Debug)]
#[command(name = "tokenmeter")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Model to use (defaults to the configured model)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Timeout for loading a tokenizer, in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List supported models in display order
    Models,
    /// Show the pricing table grouped by provider
    Pricing {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count tokens, words and characters
    Count {
        #[command(flatten)]
        input: InputArgs,

        /// Use the fast ceil(chars / 4) estimate instead of the tokenizer
        #[arg(long)]
        approx: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Estimate cost from token counts
    Cost {
        /// Input (prompt) tokens
        #[arg(short, long)]
        input: u64,

        /// Output (completion) tokens
        #[arg(short, long, default_value_t = 0)]
        output: u64,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count input tokens and estimate the cost of a request
    Calc {
        #[command(flatten)]
        input: InputArgs,

        /// Expected output tokens (defaults to the configured value)
        #[arg(short, long)]
        output: Option<u64>,

        /// Use the fast ceil(chars / 4) estimate instead of the tokenizer
        #[arg(long)]
        approx: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List prompts in the library
    Prompts {
        /// Collection to list (nba, ncaa); all when omitted
        collection: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

/// 설정/입력 오류는 한 줄, 그 외는 원인 체인까지 출력
fn report_error(e: &anyhow::Error) -> ExitCode {
    let user_facing = e
        .chain()
        .filter_map(|cause| cause.downcast_ref::<tokenmeter_foundation::Error>())
        .any(|cause| cause.is_user_facing());

    if user_facing {
        eprintln!("error: {}", e);
        ExitCode::from(2)
    } else {
        eprintln!("error: {:#}", e);
        ExitCode::FAILURE
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = CalculatorConfig::load()?;

    let mut registry = ModelRegistry::with_defaults();
    config.apply(&mut registry)?;

    let mut cache = EncoderCache::new();
    if let Some(timeout) = args
        .timeout_ms
        .map(Duration::from_millis)
        .or_else(|| config.load_timeout())
    {
        cache = cache.with_load_timeout(timeout);
    }

    tracing::debug!(
        timeout_ms = ?cache.load_timeout().map(|t| t.as_millis()),
        "encoder cache ready"
    );

    let estimator = TokenEstimator::new(
        Arc::new(registry),
        Arc::new(cache),
        Arc::new(TiktokenLoader::new()),
    );
    tracing::debug!(?estimator, "estimator ready");

    let model = args
        .model
        .unwrap_or_else(|| config.model().to_string());
    let app = App::new(estimator, config);

    match args.command {
        Command::Models => app.models(),
        Command::Pricing { json } => app.pricing(json),
        Command::Count {
            input,
            approx,
            json,
        } => app.count(&input, &model, approx, json).await,
        Command::Cost {
            input,
            output,
            json,
        } => app.cost(input, output, &model, json),
        Command::Calc {
            input,
            output,
            approx,
            json,
        } => app.calc(&input, output, &model, approx, json).await,
        Command::Prompts { collection } => app.prompts(collection.as_deref()),
    }
}
