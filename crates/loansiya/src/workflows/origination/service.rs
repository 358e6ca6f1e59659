use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use super::domain::{ClientId, ClientRecord, DerivedMetrics};
use super::eligibility::{EligibilityGuard, EligibilityViolation};
use super::policy::{LoanPolicyAdvisor, LoanPolicyOutcome, LoanRequest, PolicyConfig, PolicyError};
use super::repository::{ClientStore, StoreError};
use super::scoring::{
    derive_metrics, MetricError, RiskCategory, ScoreResult, ScoringConfig, ScoringEngine,
    ScoringError,
};

/// Facade composing the metric deriver, scoring engine, policy advisor, and
/// eligibility gate over a client store.
pub struct OriginationService<S> {
    store: Arc<S>,
    engine: ScoringEngine,
    advisor: LoanPolicyAdvisor,
    guard: EligibilityGuard,
}

impl<S> OriginationService<S>
where
    S: ClientStore + 'static,
{
    pub fn new(store: Arc<S>, scoring: ScoringConfig, policy: PolicyConfig) -> Self {
        Self {
            store,
            engine: ScoringEngine::new(scoring),
            advisor: LoanPolicyAdvisor::new(policy),
            guard: EligibilityGuard,
        }
    }

    /// Derive fresh metrics from the client's raw history and persist them.
    pub fn process_metrics(
        &self,
        cid: &ClientId,
        as_of: NaiveDate,
    ) -> Result<DerivedMetrics, OriginationError> {
        let raw = self.store.raw_history(cid)?.ok_or(StoreError::NotFound)?;
        let metrics = derive_metrics(cid, &raw, as_of)?;
        self.store.save_metrics(&metrics)?;
        Ok(metrics)
    }

    /// Run a full scoring pass and persist the result.
    ///
    /// Metrics are re-derived from the raw history inside the pass; the
    /// models never consume a previously cached set, since history length
    /// shifts with the evaluation date.
    pub fn score_client(
        &self,
        cid: &ClientId,
        as_of: NaiveDate,
        timestamp: DateTime<Utc>,
    ) -> Result<ScoreResult, OriginationError> {
        let metrics = self.process_metrics(cid, as_of)?;
        let breakdown = self.engine.score(&metrics)?;
        let risk_category = RiskCategory::classify(breakdown.credit_score);
        let recommendation = risk_category.recommendation();

        let result = ScoreResult {
            timestamp,
            cid: cid.clone(),
            input: metrics,
            credit_score: breakdown.credit_score,
            default_probability: breakdown.default_probability,
            risk_category,
            recommendation,
        };
        self.store.save_score(&result)?;
        Ok(result)
    }

    /// Quote loan terms from the stored score, gated on eligibility.
    ///
    /// Fails with `NotFound` when the client is unknown or has never been
    /// scored, and with an eligibility violation when an active balance
    /// remains outstanding.
    pub fn recommend_loan(
        &self,
        cid: &ClientId,
        request: &LoanRequest,
    ) -> Result<LoanPolicyOutcome, OriginationError> {
        let record = self.store.client(cid)?.ok_or(StoreError::NotFound)?;
        self.guard.check(&record)?;

        let score = self.store.score(cid)?.ok_or(StoreError::NotFound)?;
        Ok(self.advisor.quote(score.credit_score, request)?)
    }

    /// Fetch one client record for the request layer.
    pub fn client(&self, cid: &ClientId) -> Result<ClientRecord, OriginationError> {
        Ok(self.store.client(cid)?.ok_or(StoreError::NotFound)?)
    }

    /// Fetch every client record for the request layer.
    pub fn clients(&self) -> Result<Vec<ClientRecord>, OriginationError> {
        Ok(self.store.clients()?)
    }
}

/// Error raised by the origination service. Value-level only; nothing is
/// retried internally.
#[derive(Debug, thiserror::Error)]
pub enum OriginationError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Eligibility(#[from] EligibilityViolation),
}
