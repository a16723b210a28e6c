use super::money::{AnnualRate, Balance, Percent};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A debt as entered by the user.
///
/// Interest is a nominal annual percentage. The engine never mutates these;
/// every calculation works on its own [`DebtPosition`] copies.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Debt {
    /// Identifier, expected to be unique within a batch.
    pub name: String,
    /// Outstanding balance.
    pub amount: Balance,
    /// Annual interest rate as a percentage.
    pub interest_rate: Percent,
    /// Minimum monthly payment.
    pub min_payment: Balance,
}

impl Debt {
    pub fn new(
        name: impl Into<String>,
        amount: Balance,
        interest_rate: Percent,
        min_payment: Balance,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            interest_rate,
            min_payment,
        }
    }
}

/// The working state of one debt during a single repayment calculation.
#[derive(Debug, PartialEq, Clone)]
pub struct DebtPosition {
    pub name: String,
    pub balance: Balance,
    pub rate: AnnualRate,
    pub min_payment: Balance,
}

impl DebtPosition {
    /// Builds a working copy with the rate normalized to a decimal fraction.
    pub fn from_debt(debt: &Debt) -> Self {
        Self {
            name: debt.name.clone(),
            balance: debt.amount,
            rate: debt.interest_rate.to_annual_rate(),
            min_payment: debt.min_payment,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        !self.balance.is_positive()
    }

    /// Interest the current balance accrues over one month.
    pub fn monthly_interest(&self) -> Result<Balance> {
        self.rate.monthly_interest(self.balance)
    }

    /// Whether the minimum payment covers at least one month of interest.
    pub fn covers_interest(&self) -> Result<bool> {
        Ok(self.min_payment >= self.monthly_interest()?)
    }

    /// All three inputs must be strictly positive for the debt to take part
    /// in a calculation.
    pub fn is_valid(&self) -> bool {
        self.balance.is_positive() && self.min_payment.is_positive() && self.rate.is_positive()
    }
}
