//! Cost estimate - token usage priced per model

use scout_foundation::TokenUsage;
use std::collections::HashMap;
use std::fmt;

/// Model price (USD per 1M tokens)
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPricing {
    pub model_id: String,
    pub input_price: f64,
    pub output_price: f64,
}

impl ModelPricing {
    pub fn new(model_id: &str, input: f64, output: f64) -> Self {
        Self {
            model_id: model_id.to_string(),
            input_price: input,
            output_price: output,
        }
    }

    pub fn calculate(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        let input_cost = (input_tokens as f64 / 1_000_000.0) * self.input_price;
        let output_cost = (output_tokens as f64 / 1_000_000.0) * self.output_price;
        input_cost + output_cost
    }
}

/// Known model prices, keyed by exact model id
pub fn default_pricing() -> HashMap<String, ModelPricing> {
    [
        ModelPricing::new("o4-mini", 2.00, 8.00),
        ModelPricing::new("gpt-4.1", 1.10, 4.40),
        ModelPricing::new("o3", 10.00, 40.00),
        ModelPricing::new("gpt-4o", 5.00, 20.00),
    ]
    .into_iter()
    .map(|p| (p.model_id.clone(), p))
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostEstimate {
    Usd(f64),
    UnknownModel,
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostEstimate::Usd(cost) => write!(f, "${:.4}", cost),
            CostEstimate::UnknownModel => f.write_str("Unknown model"),
        }
    }
}

pub fn estimate_cost(usage: &TokenUsage, model: &str) -> CostEstimate {
    match default_pricing().get(model) {
        Some(pricing) => {
            CostEstimate::Usd(pricing.calculate(usage.input_tokens, usage.output_tokens))
        }
        None => CostEstimate::UnknownModel,
    }
}
