use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;
use crate::request::PredictionResult;
use crate::risk::RiskTier;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Advice {
    pub severity: Severity,
    pub message: String,
}

pub fn advice_for(tier: RiskTier) -> Advice {
    let (severity, message) = match tier {
        RiskTier::High => (
            Severity::Error,
            "High Risk: Consider consulting a health expert and reviewing your lifestyle.",
        ),
        RiskTier::Medium => (
            Severity::Warning,
            "Medium Risk: Moderate risk. Consider lifestyle adjustments.",
        ),
        RiskTier::Low => (
            Severity::Success,
            "Low Risk: You're at low medical insurance risk. Keep it up!",
        ),
    };
    Advice {
        severity,
        message: message.to_string(),
    }
}

/// Format an amount with thousands separators, e.g. `$12,345.68`
pub fn format_cost(amount: f64, display: &DisplayConfig) -> String {
    let fixed = format!("{:.*}", display.decimals, amount.abs());
    let (whole, frac) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac {
        Some(f) => format!("{sign}{}{grouped}.{f}", display.currency_symbol),
        None => format!("{sign}{}{grouped}", display.currency_symbol),
    }
}

/// Display-ready summary of a prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionReport {
    pub estimated_cost: f64,
    pub formatted_cost: String,
    pub risk_tier: RiskTier,
    pub risk_level: String,
    pub advice: Advice,
}

impl PredictionReport {
    pub fn new(result: &PredictionResult, display: &DisplayConfig) -> Self {
        Self {
            estimated_cost: result.estimated_cost,
            formatted_cost: format_cost(result.estimated_cost, display),
            risk_tier: result.risk_tier,
            risk_level: result.risk_tier.label().to_string(),
            advice: advice_for(result.risk_tier),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
