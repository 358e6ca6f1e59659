use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::origination::domain::{
    ClientId, ClientLoans, ClientRecord, CreditAccount, DerivedMetrics, LoanBalance, LoanFigure,
    LoanRecord, PaymentPeriod, RawFinancialHistory, UtilizationData,
};
use crate::workflows::origination::policy::PolicyConfig;
use crate::workflows::origination::repository::{ClientStore, StoreError};
use crate::workflows::origination::scoring::{ScoreResult, ScoringConfig};
use crate::workflows::origination::service::OriginationService;

/// Fixed evaluation date used across the suites so history length and the
/// inquiry window are deterministic.
pub(super) fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

pub(super) fn evaluation_timestamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 8, 30, 0).single().expect("valid timestamp")
}

pub(super) fn cid() -> ClientId {
    ClientId::from("001")
}

fn credit_accounts(count: usize) -> Vec<CreditAccount> {
    (0..count)
        .map(|index| CreditAccount {
            account_type: format!("revolving-{index}"),
            opened: None,
        })
        .collect()
}

fn loan_record(date: NaiveDate) -> LoanRecord {
    LoanRecord {
        date_applied: date,
        amount: 10_000.0,
        status: "Completed".to_string(),
        purpose: "Personal".to_string(),
        due_date: None,
        paid: true,
    }
}

/// Three months of 9-on-time/1-late payments, 30% utilization, 24 months of
/// history relative to [`evaluation_date`], 4 accounts, and one loan
/// application inside the trailing year.
pub(super) fn raw_history() -> RawFinancialHistory {
    RawFinancialHistory {
        payment_history_log: vec![
            PaymentPeriod {
                on_time_payments: 9,
                late_payments: 1,
            };
            3
        ],
        utilization_data: UtilizationData {
            total_used: 3_000.0,
            total_credit_limit: 10_000.0,
        },
        // 720 days before 2025-01-01, exactly 24 thirty-day months.
        credit_history_start_date: NaiveDate::from_ymd_opt(2023, 1, 12).expect("valid date"),
        credit_accounts: credit_accounts(4),
        loan_history: Some(vec![
            loan_record(NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")),
            loan_record(NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date")),
        ]),
    }
}

/// The metrics [`raw_history`] derives to at [`evaluation_date`].
pub(super) fn derived_metrics() -> DerivedMetrics {
    DerivedMetrics {
        cid: cid(),
        payment_history: 90.0,
        credit_utilization: 30.0,
        credit_history_length: 24,
        credit_mix: 40,
        new_inquiries: 1,
    }
}

pub(super) fn client_record(cid: ClientId) -> ClientRecord {
    ClientRecord {
        cid,
        name: "Maria Santos".to_string(),
        email: Some("maria.santos@example.com".to_string()),
        number: Some("+63 912 555 0101".to_string()),
        address: Some("Quezon City".to_string()),
        loans: Some(ClientLoans {
            approved: Some(LoanFigure {
                amount: 20_000.0,
                status: "Completed".to_string(),
            }),
            pending: None,
            loan_history: None,
        }),
        loan_balance: None,
    }
}

pub(super) fn indebted_client_record(cid: ClientId) -> ClientRecord {
    ClientRecord {
        loan_balance: Some(LoanBalance {
            amount: 15_000.0,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 1),
        }),
        ..client_record(cid)
    }
}

/// In-memory store mirroring the blob layout of the real bucket.
#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    clients: Arc<Mutex<HashMap<ClientId, ClientRecord>>>,
    histories: Arc<Mutex<HashMap<ClientId, RawFinancialHistory>>>,
    metrics: Arc<Mutex<HashMap<ClientId, DerivedMetrics>>>,
    scores: Arc<Mutex<HashMap<ClientId, ScoreResult>>>,
}

impl MemoryStore {
    pub(super) fn with_client(self, record: ClientRecord) -> Self {
        self.clients
            .lock()
            .expect("client mutex poisoned")
            .insert(record.cid.clone(), record);
        self
    }

    pub(super) fn with_history(self, cid: ClientId, raw: RawFinancialHistory) -> Self {
        self.histories
            .lock()
            .expect("history mutex poisoned")
            .insert(cid, raw);
        self
    }
}

impl ClientStore for MemoryStore {
    fn clients(&self) -> Result<Vec<ClientRecord>, StoreError> {
        let guard = self.clients.lock().expect("client mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn client(&self, cid: &ClientId) -> Result<Option<ClientRecord>, StoreError> {
        let guard = self.clients.lock().expect("client mutex poisoned");
        Ok(guard.get(cid).cloned())
    }

    fn raw_history(&self, cid: &ClientId) -> Result<Option<RawFinancialHistory>, StoreError> {
        let guard = self.histories.lock().expect("history mutex poisoned");
        Ok(guard.get(cid).cloned())
    }

    fn save_metrics(&self, metrics: &DerivedMetrics) -> Result<(), StoreError> {
        let mut guard = self.metrics.lock().expect("metrics mutex poisoned");
        guard.insert(metrics.cid.clone(), metrics.clone());
        Ok(())
    }

    fn metrics(&self, cid: &ClientId) -> Result<Option<DerivedMetrics>, StoreError> {
        let guard = self.metrics.lock().expect("metrics mutex poisoned");
        Ok(guard.get(cid).cloned())
    }

    fn save_score(&self, result: &ScoreResult) -> Result<(), StoreError> {
        let mut guard = self.scores.lock().expect("score mutex poisoned");
        guard.insert(result.cid.clone(), result.clone());
        Ok(())
    }

    fn score(&self, cid: &ClientId) -> Result<Option<ScoreResult>, StoreError> {
        let guard = self.scores.lock().expect("score mutex poisoned");
        Ok(guard.get(cid).cloned())
    }
}

/// Store whose every operation fails, for exercising 500 paths.
#[derive(Default, Clone)]
pub(super) struct UnavailableStore;

impl ClientStore for UnavailableStore {
    fn clients(&self) -> Result<Vec<ClientRecord>, StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }

    fn client(&self, _cid: &ClientId) -> Result<Option<ClientRecord>, StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }

    fn raw_history(&self, _cid: &ClientId) -> Result<Option<RawFinancialHistory>, StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }

    fn save_metrics(&self, _metrics: &DerivedMetrics) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }

    fn metrics(&self, _cid: &ClientId) -> Result<Option<DerivedMetrics>, StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }

    fn save_score(&self, _result: &ScoreResult) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }

    fn score(&self, _cid: &ClientId) -> Result<Option<ScoreResult>, StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<OriginationService<MemoryStore>>, MemoryStore) {
    let store = MemoryStore::default()
        .with_client(client_record(cid()))
        .with_history(cid(), raw_history());
    let service = Arc::new(OriginationService::new(
        Arc::new(store.clone()),
        ScoringConfig::default(),
        PolicyConfig::default(),
    ));
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("body is json")
}
