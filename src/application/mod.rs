//! Application layer containing the planning logic.
//!
//! `AmortizationEngine` simulates debt repayment and `BudgetPlanner` summarises
//! a monthly budget. Both are synchronous and keep no global state; callers
//! decide how to bound and schedule them.

pub mod budget;
pub mod engine;
