use serde::{Deserialize, Serialize};

/// Weight tables and normalization caps injected into the scoring engine.
///
/// Both models read from here so a jurisdiction can swap tables without
/// touching the algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub score_weights: ScoreWeights,
    pub logistic_weights: LogisticWeights,
    /// Months of history at which the score-model factor saturates. The
    /// logistic model reads the raw month count and ignores this cap.
    pub history_saturation_months: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            score_weights: ScoreWeights::default(),
            logistic_weights: LogisticWeights::default(),
            history_saturation_months: 60,
        }
    }
}

/// Factor weights for the weighted-sum credit score model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub payment_history: f64,
    pub credit_utilization: f64,
    pub credit_history_length: f64,
    pub credit_mix: f64,
    pub new_inquiries: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            payment_history: 0.35,
            credit_utilization: 0.30,
            credit_history_length: 0.15,
            credit_mix: 0.10,
            new_inquiries: 0.10,
        }
    }
}

/// Coefficients for the logistic default-probability model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticWeights {
    pub intercept: f64,
    pub payment_history: f64,
    pub credit_utilization: f64,
    pub credit_history_length: f64,
    pub credit_mix: f64,
    pub new_inquiries: f64,
}

impl Default for LogisticWeights {
    fn default() -> Self {
        Self {
            intercept: -4.0,
            payment_history: 5.0,
            credit_utilization: -3.0,
            credit_history_length: 2.0,
            credit_mix: 1.0,
            new_inquiries: -2.0,
        }
    }
}
