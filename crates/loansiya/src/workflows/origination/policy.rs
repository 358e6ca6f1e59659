use serde::{Deserialize, Serialize};

/// How the borrower repays, controlling both the rate shape and the period
/// count of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentMethod {
    Monthly,
    Weekly,
    Daily,
}

impl RepaymentMethod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Weekly => "Weekly",
            Self::Daily => "Daily",
        }
    }
}

/// Declared purpose of the loan; each purpose carries its own amount window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanPurpose {
    Personal,
    Business,
}

/// Caller-supplied request evaluated against the policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub requested_amount: f64,
    pub term_months: u32,
    pub repayment_method: RepaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<LoanPurpose>,
}

/// Quote produced for the agreement step. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPolicyOutcome {
    pub recommended_amount: f64,
    pub interest_rate: f64,
    pub borrower_request: f64,
    /// Amount due per repayment period, after interest.
    pub amount_due: f64,
}

/// Malformed or out-of-policy request input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("loan amount must be a positive finite number (found {0})")]
    InvalidAmount(f64),
    #[error("requested amount {requested} exceeds the recommended ceiling {recommended}")]
    RequestExceedsRecommendation { requested: f64, recommended: f64 },
    #[error("loan term must be between {min} and {max} months (found {found})")]
    TermOutOfRange { min: u32, max: u32, found: u32 },
    #[error("{purpose:?} loans must stay between {min} and {max} (requested {requested})")]
    AmountOutsidePurposeRange {
        purpose: LoanPurpose,
        min: f64,
        max: f64,
        requested: f64,
    },
}

/// One rung of the amount ladder: scores at or above `min_score` qualify for
/// `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountTier {
    pub min_score: u16,
    pub amount: f64,
}

/// Inclusive amount window for a loan purpose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountWindow {
    pub min: f64,
    pub max: f64,
}

impl AmountWindow {
    fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

/// Policy dials injected into the advisor.
///
/// The amount ladder is a coarser, independent policy from the risk
/// classifier's bands; the two are deliberately not unified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub annual_rate_percent: f64,
    /// Ladder ordered highest band first.
    pub amount_tiers: Vec<AmountTier>,
    /// Ceiling for scores below every tier.
    pub base_amount: f64,
    pub min_term_months: u32,
    pub max_term_months: u32,
    pub personal_window: AmountWindow,
    pub business_window: AmountWindow,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            annual_rate_percent: 28.0,
            amount_tiers: vec![
                AmountTier {
                    min_score: 740,
                    amount: 100_000.0,
                },
                AmountTier {
                    min_score: 670,
                    amount: 75_000.0,
                },
            ],
            base_amount: 50_000.0,
            min_term_months: 3,
            max_term_months: 12,
            personal_window: AmountWindow {
                min: 2_000.0,
                max: 20_000.0,
            },
            business_window: AmountWindow {
                min: 5_000.0,
                max: 150_000.0,
            },
        }
    }
}

/// Applies the configured lending policy to a scored client's request.
pub struct LoanPolicyAdvisor {
    config: PolicyConfig,
}

impl LoanPolicyAdvisor {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Maximum loan ceiling for a credit score, from the tier ladder.
    pub fn recommend_amount(&self, credit_score: u16) -> f64 {
        self.config
            .amount_tiers
            .iter()
            .find(|tier| credit_score >= tier.min_score)
            .map_or(self.config.base_amount, |tier| tier.amount)
    }

    /// Cap the borrower's request at the recommended ceiling.
    pub fn cap_request(&self, requested: f64, recommended: f64) -> Result<f64, PolicyError> {
        let requested = validated_amount(requested)?;
        Ok(requested.min(recommended))
    }

    /// Final check before an agreement is drawn up. A request above the
    /// ceiling at this point means the caller bypassed the cap.
    pub fn approve_request(&self, requested: f64, recommended: f64) -> Result<f64, PolicyError> {
        let requested = validated_amount(requested)?;
        if requested > recommended {
            return Err(PolicyError::RequestExceedsRecommendation {
                requested,
                recommended,
            });
        }
        Ok(requested)
    }

    /// Rate for one repayment period, as a percentage rounded to 2 decimals.
    ///
    /// Monthly is a flat per-period slice of the annual rate regardless of
    /// term; every other method scales the annual rate by the term. The jump
    /// at the Monthly boundary is part of the published tariff.
    pub fn interest_rate(&self, method: RepaymentMethod, term_months: u32) -> f64 {
        let annual = self.config.annual_rate_percent;
        let rate = match method {
            RepaymentMethod::Monthly => annual / 12.0,
            RepaymentMethod::Weekly | RepaymentMethod::Daily => {
                annual * f64::from(term_months) / 12.0
            }
        };
        round2(rate)
    }

    /// Number of repayment periods over the term.
    pub fn periods(method: RepaymentMethod, term_months: u32) -> u32 {
        match method {
            RepaymentMethod::Monthly => term_months,
            RepaymentMethod::Weekly => term_months * 4,
            RepaymentMethod::Daily => term_months * 30,
        }
    }

    /// Per-period amount due: principal plus interest spread evenly over the
    /// schedule, rounded to 2 decimals.
    pub fn amount_due(
        &self,
        principal: f64,
        rate_percent: f64,
        method: RepaymentMethod,
        term_months: u32,
    ) -> Result<f64, PolicyError> {
        let principal = validated_amount(principal)?;
        let periods = Self::periods(method, term_months);
        if periods == 0 {
            return Err(PolicyError::TermOutOfRange {
                min: self.config.min_term_months,
                max: self.config.max_term_months,
                found: term_months,
            });
        }
        let total = principal * (1.0 + rate_percent / 100.0);
        Ok(round2(total / f64::from(periods)))
    }

    /// Reject requests outside the term bounds or the purpose window before
    /// any amounts are computed.
    pub fn validate_request(&self, request: &LoanRequest) -> Result<(), PolicyError> {
        let requested = validated_amount(request.requested_amount)?;

        if request.term_months < self.config.min_term_months
            || request.term_months > self.config.max_term_months
        {
            return Err(PolicyError::TermOutOfRange {
                min: self.config.min_term_months,
                max: self.config.max_term_months,
                found: request.term_months,
            });
        }

        if let Some(purpose) = request.purpose {
            let window = match purpose {
                LoanPurpose::Personal => self.config.personal_window,
                LoanPurpose::Business => self.config.business_window,
            };
            if !window.contains(requested) {
                return Err(PolicyError::AmountOutsidePurposeRange {
                    purpose,
                    min: window.min,
                    max: window.max,
                    requested,
                });
            }
        }

        Ok(())
    }

    /// Full policy pass: validate, derive the ceiling, cap the request, and
    /// price the schedule.
    pub fn quote(
        &self,
        credit_score: u16,
        request: &LoanRequest,
    ) -> Result<LoanPolicyOutcome, PolicyError> {
        self.validate_request(request)?;

        let recommended = self.recommend_amount(credit_score);
        let borrower_request = self.cap_request(request.requested_amount, recommended)?;
        let interest_rate = self.interest_rate(request.repayment_method, request.term_months);
        let amount_due = self.amount_due(
            borrower_request,
            interest_rate,
            request.repayment_method,
            request.term_months,
        )?;

        Ok(LoanPolicyOutcome {
            recommended_amount: recommended,
            interest_rate,
            borrower_request,
            amount_due,
        })
    }
}

fn validated_amount(amount: f64) -> Result<f64, PolicyError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PolicyError::InvalidAmount(amount));
    }
    Ok(amount)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
