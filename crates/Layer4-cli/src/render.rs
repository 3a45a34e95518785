//! Text rendering for terminal output

use serde::Serialize;
use std::fmt::Write;
use tokenmeter_foundation::{
    estimate_tokens_approx, CalculationReport, Collection, CostEstimate, ModelRegistry, Prompt,
    Provider, TokenCount,
};

/// 가격표 한 줄 (JSON 출력용)
#[derive(Debug, Serialize)]
pub struct PricingRow<'a> {
    pub provider: Provider,
    pub value: &'a str,
    pub label: &'a str,
    pub input: f64,
    pub output: f64,
}

pub fn pricing_rows(registry: &ModelRegistry) -> Vec<PricingRow<'_>> {
    registry
        .by_provider()
        .into_iter()
        .flat_map(|(_, models)| models)
        .map(|model| {
            let pricing = registry.get_pricing(&model.id);
            PricingRow {
                provider: model.provider,
                value: &model.id,
                label: &model.display_name,
                input: pricing.input_per_1m,
                output: pricing.output_per_1m,
            }
        })
        .collect()
}

pub fn model_list(registry: &ModelRegistry) -> String {
    let mut out = String::new();
    for model in registry.list_models() {
        let _ = writeln!(
            out,
            "{:<20} {:<20} {}",
            model.id, model.display_name, model.provider
        );
    }
    out
}

/// Provider별 가격표
pub fn pricing_table(registry: &ModelRegistry) -> String {
    let mut out = String::new();
    for (provider, models) in registry.by_provider() {
        let _ = writeln!(out, "{}", provider);
        let _ = writeln!(out, "  {:<20} {:>12} {:>12}", "Model", "Input ($/M)", "Output ($/M)");
        for model in models {
            let pricing = registry.get_pricing(&model.id);
            let _ = writeln!(
                out,
                "  {:<20} {:>12} {:>12}",
                model.display_name,
                format!("${:.2}", pricing.input_per_1m),
                format!("${:.2}", pricing.output_per_1m),
            );
        }
        out.push('\n');
    }
    out
}

pub fn token_count(count: &TokenCount, approx: bool) -> String {
    let mut out = String::new();
    let label = if approx { "Tokens (approx)" } else { "Tokens" };
    let _ = writeln!(out, "Model:      {}", count.model);
    let _ = writeln!(out, "{:<11} {}", format!("{}:", label), group_digits(count.tokens as u64));
    let _ = writeln!(out, "Words:      {}", group_digits(count.words as u64));
    let _ = writeln!(out, "Characters: {}", group_digits(count.characters as u64));
    out
}

pub fn cost(cost: &CostEstimate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Model:  {}", cost.model);
    let _ = writeln!(out, "Input:  {}", format_usd(cost.input_cost));
    let _ = writeln!(out, "Output: {}", format_usd(cost.output_cost));
    let _ = writeln!(out, "Total:  {}", format_usd(cost.total_cost));
    if !cost.known_model {
        let _ = writeln!(
            out,
            "warning: no pricing for model '{}', cost shown as $0",
            cost.model
        );
    }
    out
}

/// 계산기 결과 (입력 토큰 / 비용 / 합계)
pub fn report(report: &CalculationReport, approx: bool) -> String {
    let mut out = token_count(&report.count, approx);
    out.push('\n');
    let _ = writeln!(
        out,
        "Estimated cost: {}  (Input: {} | Output: {})",
        format_usd(report.cost.total_cost),
        format_usd(report.cost.input_cost),
        format_usd(report.cost.output_cost),
    );

    let breakdown = if report.output_tokens > 0 {
        format!(
            "Input: {} + Output: {}",
            report.count.tokens, report.output_tokens
        )
    } else {
        "Input only".to_string()
    };
    let _ = writeln!(
        out,
        "Total tokens:   {}  ({})",
        group_digits(report.total_tokens),
        breakdown
    );

    if !report.cost.known_model {
        let _ = writeln!(
            out,
            "warning: no pricing for model '{}', cost shown as $0",
            report.cost.model
        );
    }
    out
}

pub fn prompt_list(collection: Collection, prompts: &[Prompt]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", collection.title(), collection);
    if prompts.is_empty() {
        let _ = writeln!(out, "  (empty)");
    }
    for prompt in prompts {
        let _ = writeln!(
            out,
            "  {}/{:<16} {:<40} ~{} tokens",
            collection,
            prompt.id,
            prompt.title,
            group_digits(estimate_tokens_approx(&prompt.content) as u64)
        );
    }
    out
}

pub fn format_usd(amount: f64) -> String {
    format!("${:.4}", amount)
}

/// 1234567 -> "1,234,567"
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
