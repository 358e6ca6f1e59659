use super::domain::ClientRecord;

/// Gate applied before a new loan recommendation is produced: a client with
/// an outstanding balance cannot open another application.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityGuard;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EligibilityViolation {
    #[error("client still has an active loan balance of {amount:.2}")]
    ActiveLoanBalance { amount: f64 },
}

impl EligibilityGuard {
    pub fn check(&self, record: &ClientRecord) -> Result<(), EligibilityViolation> {
        let amount = record.outstanding_balance();
        if amount > 0.0 {
            return Err(EligibilityViolation::ActiveLoanBalance { amount });
        }
        Ok(())
    }
}
