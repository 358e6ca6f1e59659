//! Loan-origination workflow: metric derivation, credit scoring, risk
//! classification, and the loan policy applied to a scored client's request.
//!
//! Every computation in this module is a pure, synchronous function over
//! in-memory values; the only suspension points live in the store trait and
//! the HTTP layer around it.

pub mod domain;
pub(crate) mod eligibility;
pub mod policy;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ClientId, ClientLoans, ClientRecord, CreditAccount, DerivedMetrics, LoanBalance, LoanFigure,
    LoanRecord, PaymentPeriod, RawFinancialHistory, UtilizationData,
};
pub use eligibility::{EligibilityGuard, EligibilityViolation};
pub use policy::{
    AmountTier, AmountWindow, LoanPolicyAdvisor, LoanPolicyOutcome, LoanPurpose, LoanRequest,
    PolicyConfig, PolicyError, RepaymentMethod,
};
pub use repository::{ClientStore, StoreError};
pub use router::origination_router;
pub use scoring::{
    derive_metrics, LogisticWeights, MetricError, Recommendation, RiskCategory, ScoreBreakdown,
    ScoreResult, ScoreWeights, ScoringConfig, ScoringEngine, ScoringError,
};
pub use service::{OriginationError, OriginationService};
