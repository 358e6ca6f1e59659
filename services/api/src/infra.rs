use chrono::NaiveDate;
use loansiya::workflows::origination::{
    ClientId, ClientLoans, ClientRecord, ClientStore, CreditAccount, DerivedMetrics, LoanBalance,
    LoanFigure, LoanRecord, PaymentPeriod, RawFinancialHistory, ScoreResult, StoreError,
    UtilizationData,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the per-client blob store.
#[derive(Default, Clone)]
pub(crate) struct InMemoryClientStore {
    clients: Arc<Mutex<HashMap<ClientId, ClientRecord>>>,
    histories: Arc<Mutex<HashMap<ClientId, RawFinancialHistory>>>,
    metrics: Arc<Mutex<HashMap<ClientId, DerivedMetrics>>>,
    scores: Arc<Mutex<HashMap<ClientId, ScoreResult>>>,
}

impl InMemoryClientStore {
    pub(crate) fn insert_client(&self, record: ClientRecord) {
        let mut guard = self.clients.lock().expect("client mutex poisoned");
        guard.insert(record.cid.clone(), record);
    }

    pub(crate) fn insert_history(&self, cid: ClientId, raw: RawFinancialHistory) {
        let mut guard = self.histories.lock().expect("history mutex poisoned");
        guard.insert(cid, raw);
    }
}

impl ClientStore for InMemoryClientStore {
    fn clients(&self) -> Result<Vec<ClientRecord>, StoreError> {
        let guard = self.clients.lock().expect("client mutex poisoned");
        let mut records: Vec<ClientRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.cid.0.cmp(&b.cid.0));
        Ok(records)
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

/// Seed two demo clients with histories offset from `reference` so the
/// derived metrics stay stable no matter when the process runs.
pub(crate) fn seeded_store(reference: NaiveDate) -> InMemoryClientStore {
    let store = InMemoryClientStore::default();

    let steady = ClientId::from("001");
    store.insert_client(ClientRecord {
        cid: steady.clone(),
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
    });
    store.insert_history(
        steady,
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
            credit_history_start_date: reference - chrono::Duration::days(720),
            credit_accounts: (0..4)
                .map(|index| CreditAccount {
                    account_type: format!("revolving-{index}"),
                    opened: None,
                })
                .collect(),
            loan_history: Some(vec![
                LoanRecord {
                    date_applied: reference - chrono::Duration::days(90),
                    amount: 10_000.0,
                    status: "Completed".to_string(),
                    purpose: "Personal".to_string(),
                    due_date: None,
                    paid: true,
                },
                LoanRecord {
                    date_applied: reference - chrono::Duration::days(500),
                    amount: 8_000.0,
                    status: "Completed".to_string(),
                    purpose: "Business".to_string(),
                    due_date: None,
                    paid: true,
                },
            ]),
        },
    );

    let indebted = ClientId::from("002");
    store.insert_client(ClientRecord {
        cid: indebted.clone(),
        name: "Jose Reyes".to_string(),
        email: Some("jose.reyes@example.com".to_string()),
        number: None,
        address: Some("Cebu City".to_string()),
        loans: Some(ClientLoans {
            approved: Some(LoanFigure {
                amount: 35_000.0,
                status: "Active".to_string(),
            }),
            pending: None,
            loan_history: None,
        }),
        loan_balance: Some(LoanBalance {
            amount: 15_000.0,
            due_date: Some(reference + chrono::Duration::days(60)),
        }),
    });
    store.insert_history(
        indebted,
        RawFinancialHistory {
            payment_history_log: vec![
                PaymentPeriod {
                    on_time_payments: 6,
                    late_payments: 4,
                };
                5
            ],
            utilization_data: UtilizationData {
                total_used: 8_200.0,
                total_credit_limit: 10_000.0,
            },
            credit_history_start_date: reference - chrono::Duration::days(300),
            credit_accounts: vec![CreditAccount {
                account_type: "revolving-0".to_string(),
                opened: None,
            }],
            loan_history: Some(vec![LoanRecord {
                date_applied: reference - chrono::Duration::days(30),
                amount: 35_000.0,
                status: "Active".to_string(),
                purpose: "Business".to_string(),
                due_date: Some(reference + chrono::Duration::days(60)),
                paid: false,
            }]),
        },
    );

    store
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
