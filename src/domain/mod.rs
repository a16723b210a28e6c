//! Domain types: money, debts, repayment results and budgets.

pub mod budget;
pub mod debt;
pub mod money;
pub mod plan;
