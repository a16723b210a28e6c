use super::money::Balance;
use serde::{Deserialize, Serialize};

/// Outcome of a repayment calculation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CalculationResult {
    /// Months simulated until the aggregate debt reached zero.
    pub months: u32,
    /// Sum of the (possibly corrected) minimum payments, extra payment excluded.
    pub monthly_payment: Balance,
    /// Sum of the original balances, to two decimal places.
    pub total_paid: Balance,
    /// Interest accrued over the whole horizon, to two decimal places.
    pub total_interest_paid: Balance,
    /// Name of the debt to pay off first.
    pub priority: String,
}
