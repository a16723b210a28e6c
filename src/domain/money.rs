use crate::error::{PlannerError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Represents a monetary value.
///
/// This is a wrapper around `rust_decimal::Decimal` so balances, payments and
/// interest never go through binary floating point.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(pub Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounds to cents using banker's rounding and pins the scale to exactly
    /// two decimal places, so `1000` is reported as `1000.00`.
    pub fn to_cents(&self) -> Self {
        let mut rounded = self.0.round_dp(2);
        rounded.rescale(2);
        Self(rounded)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Adds up `values`, reporting overflow as
    /// [`PlannerError::ArithmeticOverflow`] for `what` instead of panicking.
    pub fn checked_sum<I>(values: I, what: &'static str) -> Result<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        values.into_iter().try_fold(Self::ZERO, |acc, value| {
            acc.checked_add(value)
                .ok_or(PlannerError::ArithmeticOverflow(what))
        })
    }
}

impl From<Decimal> for Balance {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Balance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Balance::ZERO, |acc, b| acc + b)
    }
}

/// A nominal annual interest rate expressed as a percentage (`18.5` means 18.5%).
///
/// This is the unit debts are entered in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percent(pub Decimal);

impl Percent {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Converts the percentage into a decimal fraction (`18.5` becomes `0.185`).
    pub fn to_annual_rate(self) -> AnnualRate {
        AnnualRate(self.0 / Decimal::ONE_HUNDRED)
    }
}

/// A nominal annual interest rate as a decimal fraction (`0.185` for 18.5%).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct AnnualRate(Decimal);

impl AnnualRate {
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn monthly(&self) -> Decimal {
        self.0 / MONTHS_PER_YEAR
    }

    /// Interest accrued on `balance` over one month at this rate.
    pub fn monthly_interest(&self, balance: Balance) -> Result<Balance> {
        balance
            .0
            .checked_mul(self.monthly())
            .map(Balance)
            .ok_or(PlannerError::ArithmeticOverflow("monthly interest"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_arithmetic() {
        let b1 = Balance::new(dec!(10.0));
        let b2 = Balance::new(dec!(5.0));
        assert_eq!(b1 + b2, Balance::new(dec!(15.0)));
        assert_eq!(b1 - b2, Balance::new(dec!(5.0)));

        let total: Balance = [b1, b2, b2].into_iter().sum();
        assert_eq!(total, Balance::new(dec!(20.0)));
    }

    #[test]
    fn test_checked_sum() {
        let values = [Balance::new(dec!(10.5)), Balance::new(dec!(4.5))];
        assert_eq!(
            Balance::checked_sum(values, "total").unwrap(),
            Balance::new(dec!(15.0))
        );
        assert_eq!(
            Balance::checked_sum([Balance::ZERO; 0], "total").unwrap(),
            Balance::ZERO
        );

        let huge = [Balance::new(Decimal::MAX), Balance::new(dec!(1))];
        assert!(matches!(
            Balance::checked_sum(huge, "total"),
            Err(PlannerError::ArithmeticOverflow("total"))
        ));
    }

    #[test]
    fn test_to_cents_pins_two_decimal_places() {
        assert_eq!(Balance::new(dec!(1000)).to_cents().to_string(), "1000.00");
        assert_eq!(Balance::new(dec!(58.98488)).to_cents().to_string(), "58.98");
        assert_eq!(Balance::new(dec!(0.1)).to_cents().value().scale(), 2);
    }

    #[test]
    fn test_to_cents_rounds_half_to_even() {
        assert_eq!(Balance::new(dec!(2.345)).to_cents().value(), dec!(2.34));
        assert_eq!(Balance::new(dec!(2.355)).to_cents().value(), dec!(2.36));
    }

    #[test]
    fn test_percent_to_annual_rate() {
        let rate = Percent::new(dec!(18.5)).to_annual_rate();
        assert_eq!(rate.value(), dec!(0.185));
        assert!(rate.is_positive());
        assert!(!Percent::new(dec!(0)).to_annual_rate().is_positive());
    }

    #[test]
    fn test_monthly_interest() {
        let rate = Percent::new(dec!(12)).to_annual_rate();
        assert_eq!(rate.monthly(), dec!(0.01));
        assert_eq!(
            rate.monthly_interest(Balance::new(dec!(1000))).unwrap(),
            Balance::new(dec!(10))
        );
    }

    #[test]
    fn test_monthly_interest_overflow() {
        let rate = Percent::new(Decimal::MAX).to_annual_rate();
        let result = rate.monthly_interest(Balance::new(Decimal::MAX));
        assert!(matches!(
            result,
            Err(PlannerError::ArithmeticOverflow("monthly interest"))
        ));
    }
}
