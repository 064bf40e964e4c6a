use serde::Serialize;
use thiserror::Error;

/// How many times per year accrued interest is capitalized into the balance.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CompoundingFrequency {
    Annual,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    pub fn from_times_per_year(times: u32) -> Result<Self, ValidationError> {
        match times {
            1 => Ok(CompoundingFrequency::Annual),
            4 => Ok(CompoundingFrequency::Quarterly),
            12 => Ok(CompoundingFrequency::Monthly),
            other => Err(ValidationError::InvalidFrequency(other)),
        }
    }

    pub fn times_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annual => 1,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }

    /// Exact divisor of 12; the month counter is checked against this to find
    /// capitalization boundaries.
    pub fn months_per_period(self) -> u32 {
        12 / self.times_per_year()
    }
}

#[derive(Debug, Clone)]
pub struct Inputs {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    pub years: u32,
    pub annual_rate_percent: f64,
    pub frequency: CompoundingFrequency,
}

/// Snapshot taken at each 12-month boundary. `total == invested + interest`
/// holds for every point the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyPoint {
    pub year: u32,
    pub invested: f64,
    pub interest: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_value: f64,
    pub total_invested: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub series: Vec<YearlyPoint>,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must be >= 0")]
    Negative { field: &'static str },
    #[error("compounding frequency must be 1, 4, or 12 times per year, got {0}")]
    InvalidFrequency(u32),
}
