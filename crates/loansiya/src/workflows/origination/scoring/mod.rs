mod config;
mod metrics;
mod risk;

pub use config::{LogisticWeights, ScoreWeights, ScoringConfig};
pub use metrics::{derive_metrics, MetricError};
pub use risk::{Recommendation, RiskCategory};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ClientId, DerivedMetrics};

/// Lower bound of the published score range.
const SCORE_FLOOR: f64 = 300.0;
/// Width of the published score range (300-850).
const SCORE_SPAN: f64 = 550.0;

/// Stateless engine combining the weighted score model and the logistic
/// default-probability model over one set of derived metrics.
pub struct ScoringEngine {
    config: ScoringConfig,
}

/// Unexpected arithmetic failure inside either model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring produced a non-finite intermediate value")]
    NonFinite,
}

/// Raw output of one engine run, before classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub credit_score: u16,
    pub default_probability: f64,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, metrics: &DerivedMetrics) -> Result<ScoreBreakdown, ScoringError> {
        Ok(ScoreBreakdown {
            credit_score: self.credit_score(metrics)?,
            default_probability: self.default_probability(metrics)?,
        })
    }

    /// Weighted linear combination of five factors, each normalized and
    /// clamped to [0, 1], mapped onto [300, 850]. Clamping keeps overdrawn
    /// utilization (>100%) from pushing the composite outside the range.
    fn credit_score(&self, metrics: &DerivedMetrics) -> Result<u16, ScoringError> {
        let weights = &self.config.score_weights;
        let saturation = f64::from(self.config.history_saturation_months);

        let payment = unit_factor(metrics.payment_history / 100.0)?;
        let utilization = unit_factor(1.0 - metrics.credit_utilization / 100.0)?;
        let history = unit_factor(f64::from(metrics.credit_history_length) / saturation)?;
        let mix = unit_factor(f64::from(metrics.credit_mix) / 100.0)?;
        let inquiries = unit_factor(1.0 - f64::from(metrics.new_inquiries) / 100.0)?;

        let weighted_sum = weights.payment_history * payment
            + weights.credit_utilization * utilization
            + weights.credit_history_length * history
            + weights.credit_mix * mix
            + weights.new_inquiries * inquiries;

        let score = SCORE_FLOOR + weighted_sum * SCORE_SPAN;
        if !score.is_finite() {
            return Err(ScoringError::NonFinite);
        }
        Ok(score.round() as u16)
    }

    /// Logistic model `1 / (1 + e^-z)`, rounded to 4 decimals. History length
    /// enters uncapped here; only the score model saturates it.
    fn default_probability(&self, metrics: &DerivedMetrics) -> Result<f64, ScoringError> {
        let weights = &self.config.logistic_weights;
        let z = weights.intercept
            + weights.payment_history * (metrics.payment_history / 100.0)
            + weights.credit_utilization * (metrics.credit_utilization / 100.0)
            + weights.credit_history_length * (f64::from(metrics.credit_history_length) / 100.0)
            + weights.credit_mix * (f64::from(metrics.credit_mix) / 100.0)
            + weights.new_inquiries * (f64::from(metrics.new_inquiries) / 100.0);
        if !z.is_finite() {
            return Err(ScoringError::NonFinite);
        }
        Ok(round4(1.0 / (1.0 + (-z).exp())))
    }
}

fn unit_factor(value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value.clamp(0.0, 1.0))
    } else {
        Err(ScoringError::NonFinite)
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Persisted outcome of one scoring pass. Overwritten by later passes; the
/// store keeps no history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub timestamp: DateTime<Utc>,
    pub cid: ClientId,
    /// The metrics the models consumed, embedded for audit.
    pub input: DerivedMetrics,
    pub credit_score: u16,
    pub default_probability: f64,
    pub risk_category: RiskCategory,
    pub recommendation: Recommendation,
}
