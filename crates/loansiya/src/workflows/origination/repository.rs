use super::domain::{ClientId, ClientRecord, DerivedMetrics, RawFinancialHistory};
use super::scoring::ScoreResult;

/// Storage abstraction over the per-client blob store so the service can be
/// exercised without a live bucket.
///
/// Writes are last-write-wins; the store keeps no version history. Concurrent
/// scoring passes for one client can therefore race here, and callers must
/// not assume at-most-once persistence.
pub trait ClientStore: Send + Sync {
    fn clients(&self) -> Result<Vec<ClientRecord>, StoreError>;
    fn client(&self, cid: &ClientId) -> Result<Option<ClientRecord>, StoreError>;
    fn raw_history(&self, cid: &ClientId) -> Result<Option<RawFinancialHistory>, StoreError>;
    fn save_metrics(&self, metrics: &DerivedMetrics) -> Result<(), StoreError>;
    fn metrics(&self, cid: &ClientId) -> Result<Option<DerivedMetrics>, StoreError>;
    fn save_score(&self, result: &ScoreResult) -> Result<(), StoreError>;
    fn score(&self, cid: &ClientId) -> Result<Option<ScoreResult>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
