use serde::{Deserialize, Serialize};

/// Five-tier risk label derived solely from the credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Exceptional,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl RiskCategory {
    /// Threshold ladder, highest band first. The bands partition the whole
    /// score range with no gaps.
    pub fn classify(credit_score: u16) -> Self {
        match credit_score {
            score if score >= 800 => Self::Exceptional,
            score if score >= 740 => Self::VeryGood,
            score if score >= 670 => Self::Good,
            score if score >= 580 => Self::Fair,
            _ => Self::Poor,
        }
    }

    /// Coarse adjudication hint for the loan officer.
    pub fn recommendation(self) -> Recommendation {
        match self {
            Self::Poor => Recommendation::ReviewOrDecline,
            Self::Fair => Recommendation::Review,
            Self::Exceptional | Self::VeryGood | Self::Good => Recommendation::Approve,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Exceptional => "Exceptional",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

/// Adjudication hint attached to every score result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "APPROVE")]
    Approve,
    #[serde(rename = "REVIEW")]
    Review,
    #[serde(rename = "REVIEW OR DECLINE")]
    ReviewOrDecline,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approve => "APPROVE",
            Self::Review => "REVIEW",
            Self::ReviewOrDecline => "REVIEW OR DECLINE",
        }
    }
}
