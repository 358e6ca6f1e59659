use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Client identifier, the primary key for every per-client record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One month of repayment behavior in a client's payment log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPeriod {
    pub on_time_payments: u32,
    pub late_payments: u32,
}

/// Aggregate balance and limit across all of a client's credit lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationData {
    pub total_used: f64,
    pub total_credit_limit: f64,
}

/// Open credit account. Only the count participates in scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditAccount {
    pub account_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened: Option<NaiveDate>,
}

/// A past loan application as recorded by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub date_applied: NaiveDate,
    pub amount: f64,
    pub status: String,
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub paid: bool,
}

/// Raw per-client financial history as persisted by the record store.
///
/// Immutable for the duration of a scoring pass; the service re-fetches it on
/// every pass rather than caching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinancialHistory {
    pub payment_history_log: Vec<PaymentPeriod>,
    pub utilization_data: UtilizationData,
    pub credit_history_start_date: NaiveDate,
    pub credit_accounts: Vec<CreditAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_history: Option<Vec<LoanRecord>>,
}

/// The five normalized metrics derived from a raw history snapshot.
///
/// Field names are the wire contract; existing callers consume them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub cid: ClientId,
    /// Share of payments made on time, 0-100.
    pub payment_history: f64,
    /// Used credit over total limit, 0-100 but deliberately unclamped above
    /// 100 for overdrawn lines.
    pub credit_utilization: f64,
    /// Whole months since the credit history began.
    pub credit_history_length: u32,
    /// Saturating account-diversity score, 0-100.
    pub credit_mix: u32,
    /// Loan applications inside the trailing inquiry window.
    pub new_inquiries: u32,
}

/// Amount and status of a single loan slot on the client record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanFigure {
    pub amount: f64,
    pub status: String,
}

/// Loan activity summary embedded in a client record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientLoans {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<LoanFigure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<LoanFigure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_history: Option<Vec<LoanRecord>>,
}

/// Outstanding balance on an active loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanBalance {
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Client profile owned by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub cid: ClientId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loans: Option<ClientLoans>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_balance: Option<LoanBalance>,
}

impl ClientRecord {
    /// Outstanding balance, zero when the client has no active loan.
    pub fn outstanding_balance(&self) -> f64 {
        self.loan_balance
            .as_ref()
            .map_or(0.0, |balance| balance.amount)
    }
}
