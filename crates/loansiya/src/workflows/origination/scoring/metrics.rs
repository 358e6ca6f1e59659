use chrono::NaiveDate;

use super::super::domain::{ClientId, DerivedMetrics, RawFinancialHistory};

/// Trailing window for counting loan applications as new inquiries. The edge
/// is inclusive: an application exactly this many days old still counts.
const INQUIRY_WINDOW_DAYS: i64 = 365;

/// Days per month used when converting history age to whole months.
const DAYS_PER_MONTH: i64 = 30;

/// Failure modes of metric derivation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("payment history log is empty or records no payments")]
    EmptyPaymentLog,
    #[error("total credit limit must be a positive finite number (found {0})")]
    InvalidCreditLimit(f64),
    #[error("metric computation produced a non-finite value")]
    NonFinite,
}

/// Derive the five scoring metrics from a raw history snapshot.
///
/// Pure function of its inputs: the evaluation date is a parameter, never the
/// wall clock, so the same snapshot always yields the same metrics. Callers
/// that want "today" pass it in.
pub fn derive_metrics(
    cid: &ClientId,
    raw: &RawFinancialHistory,
    as_of: NaiveDate,
) -> Result<DerivedMetrics, MetricError> {
    let on_time: u64 = raw
        .payment_history_log
        .iter()
        .map(|period| u64::from(period.on_time_payments))
        .sum();
    let total: u64 = raw
        .payment_history_log
        .iter()
        .map(|period| u64::from(period.on_time_payments) + u64::from(period.late_payments))
        .sum();
    // A zero-payment log would divide by zero; reject instead of letting NaN
    // reach the weighted sum.
    if total == 0 {
        return Err(MetricError::EmptyPaymentLog);
    }
    let payment_history = on_time as f64 / total as f64 * 100.0;

    let limit = raw.utilization_data.total_credit_limit;
    if !limit.is_finite() || limit <= 0.0 {
        return Err(MetricError::InvalidCreditLimit(limit));
    }
    // Unclamped: utilization above 100% marks an overdrawn line and must
    // reach both models as-is.
    let credit_utilization = raw.utilization_data.total_used / limit * 100.0;
    if !credit_utilization.is_finite() {
        return Err(MetricError::NonFinite);
    }

    let elapsed_days = (as_of - raw.credit_history_start_date).num_days();
    let credit_history_length = u32::try_from(elapsed_days / DAYS_PER_MONTH).unwrap_or(0);

    let credit_mix = (raw.credit_accounts.len() as u32).saturating_mul(10).min(100);

    let window_start = as_of - chrono::Duration::days(INQUIRY_WINDOW_DAYS);
    let new_inquiries = raw.loan_history.as_deref().map_or(0, |entries| {
        entries
            .iter()
            .filter(|entry| entry.date_applied >= window_start && entry.date_applied <= as_of)
            .count() as u32
    });

    Ok(DerivedMetrics {
        cid: cid.clone(),
        payment_history,
        credit_utilization,
        credit_history_length,
        credit_mix,
        new_inquiries,
    })
}
