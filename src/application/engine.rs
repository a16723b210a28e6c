use crate::config::{DEFAULT_MAX_MONTHS, PlannerConfig};
use crate::domain::debt::{Debt, DebtPosition};
use crate::domain::money::Balance;
use crate::domain::plan::CalculationResult;
use crate::error::{PlannerError, Result};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, trace, warn};

/// Simulates month-by-month repayment of a batch of debts.
///
/// The engine holds no state between calls. Each calculation works on its own
/// copies of the debts, so the same batch can be passed in repeatedly or from
/// several threads at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmortizationEngine {
    max_months: u32,
    timeout: Option<Duration>,
}

impl Default for AmortizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

struct Simulation {
    months: u32,
    total_interest: Balance,
}

impl AmortizationEngine {
    pub fn new() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            timeout: None,
        }
    }

    /// Creates an engine that gives up after `max_months` simulated months.
    /// A limit of zero is rejected.
    pub fn with_max_months(max_months: u32) -> Result<Self> {
        Self::from_config(&PlannerConfig {
            max_months,
            ..PlannerConfig::default()
        })
    }

    /// Gives every calculation a wall-clock budget. The clock starts when
    /// `calculate_repayment` is called and is checked between months.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            max_months: config.max_months,
            timeout: config.timeout(),
        })
    }

    pub fn max_months(&self) -> u32 {
        self.max_months
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Computes how long the debts take to pay off and how much interest they
    /// cost along the way.
    ///
    /// Minimum payments that do not cover the first month's interest are raised
    /// to exactly that interest. The batch is rejected as a whole with
    /// [`PlannerError::InfeasibleDebtSet`] if any debt has a non-positive
    /// balance, rate or minimum payment, or if the combined payments do not
    /// exceed the combined first-month interest.
    ///
    /// # Arguments
    ///
    /// * `debts` - The debts to repay, rates given as percentages.
    /// * `extra_payment` - Amount paid each month on top of the minimums.
    #[instrument(skip_all, fields(debts = debts.len(), extra_payment = %extra_payment))]
    pub fn calculate_repayment(
        &self,
        debts: &[Debt],
        extra_payment: Balance,
    ) -> Result<CalculationResult> {
        if debts.is_empty() {
            return Err(PlannerError::ValidationError(
                "At least one debt is required".to_string(),
            ));
        }
        if extra_payment < Balance::ZERO {
            return Err(PlannerError::ValidationError(
                "Extra payment cannot be negative".to_string(),
            ));
        }
        let deadline = self
            .timeout
            .and_then(|timeout| Instant::now().checked_add(timeout));
        info!("Starting repayment calculation");

        let priority = self.priority_payment(debts)?.to_string();
        let principal = Balance::checked_sum(debts.iter().map(|d| d.amount), "total principal")?;

        let mut positions: Vec<DebtPosition> = debts.iter().map(DebtPosition::from_debt).collect();
        debug!("Interest rates converted to decimal");

        correct_min_payments(&mut positions)?;
        check_feasibility(&positions, extra_payment)?;

        let monthly_payment =
            Balance::checked_sum(positions.iter().map(|p| p.min_payment), "monthly payment")?;
        let simulation = self.simulate(
            &mut positions,
            principal,
            monthly_payment,
            extra_payment,
            deadline,
        )?;

        let result = CalculationResult {
            months: simulation.months,
            monthly_payment,
            total_paid: principal.to_cents(),
            total_interest_paid: simulation.total_interest.to_cents(),
            priority,
        };
        info!(
            months = result.months,
            total_interest_paid = %result.total_interest_paid,
            "Repayment calculation completed"
        );
        Ok(result)
    }

    /// Returns the name of the debt with the highest interest rate.
    ///
    /// Later debts win ties. Works on whatever rates the caller passes in and
    /// leaves them untouched.
    #[instrument(skip_all, fields(debts = debts.len()))]
    pub fn priority_payment<'a>(&self, debts: &'a [Debt]) -> Result<&'a str> {
        let debt = debts
            .iter()
            .max_by_key(|d| d.interest_rate)
            .ok_or_else(|| {
                PlannerError::ValidationError("At least one debt is required".to_string())
            })?;
        debug!(priority = %debt.name, "Priority payment found");
        Ok(&debt.name)
    }

    fn simulate(
        &self,
        positions: &mut [DebtPosition],
        principal: Balance,
        monthly_payment: Balance,
        extra_payment: Balance,
        deadline: Option<Instant>,
    ) -> Result<Simulation> {
        let mut remaining = principal;
        let mut payment_pool = checked(
            monthly_payment.checked_add(extra_payment),
            "monthly payment",
        )?;
        let mut total_interest = Balance::ZERO;
        let mut months = 0;

        while remaining.is_positive() {
            months += 1;
            let mut interest = Balance::ZERO;

            for position in positions.iter_mut().filter(|p| !p.is_paid_off()) {
                let accrued = position.monthly_interest()?;
                interest = checked(interest.checked_add(accrued), "monthly interest")?;
                position.balance = checked(position.balance.checked_add(accrued), "balance")?;

                if position.balance < position.min_payment {
                    // The unused part of the final payment leaves the pool for good.
                    let unused = checked(
                        position.min_payment.checked_sub(position.balance),
                        "payment pool",
                    )?;
                    payment_pool = checked(payment_pool.checked_sub(unused), "payment pool")?;
                    position.balance = Balance::ZERO;
                    debug!(debt = %position.name, month = months, "Debt paid off");
                } else {
                    position.balance = checked(
                        position.balance.checked_sub(position.min_payment),
                        "balance",
                    )?;
                }
            }

            total_interest = checked(total_interest.checked_add(interest), "total interest")?;
            remaining = checked(remaining.checked_add(interest), "remaining debt")?;
            remaining = checked(remaining.checked_sub(payment_pool), "remaining debt")?;
            trace!(month = months, %interest, %remaining, "Month simulated");

            if !remaining.is_positive() {
                break;
            }
            if months >= self.max_months {
                warn!(max_months = self.max_months, %remaining, "Simulation limit reached");
                return Err(PlannerError::SimulationLimitExceeded {
                    max_months: self.max_months,
                });
            }
            if deadline.is_some_and(|at| Instant::now() >= at) {
                let timeout_ms = self.timeout.map_or(0, |t| t.as_millis());
                warn!(month = months, timeout_ms = %timeout_ms, "Calculation timed out");
                return Err(PlannerError::TimedOut { timeout_ms });
            }
        }

        Ok(Simulation {
            months,
            total_interest,
        })
    }
}

/// Raises every minimum payment that falls short of the first month's interest.
fn correct_min_payments(positions: &mut [DebtPosition]) -> Result<()> {
    let mut corrected = 0;
    for position in positions.iter_mut() {
        if position.covers_interest()? {
            continue;
        }
        let interest = position.monthly_interest()?;
        warn!(
            debt = %position.name,
            from = %position.min_payment,
            to = %interest,
            "Minimum payment does not cover interest, raising it"
        );
        position.min_payment = interest;
        corrected += 1;
    }

    if corrected == 0 {
        debug!("Minimum payments are enough to cover interest");
    }
    Ok(())
}

/// All-or-nothing check that the batch can ever be paid off.
fn check_feasibility(positions: &[DebtPosition], extra_payment: Balance) -> Result<()> {
    if let Some(invalid) = positions.iter().find(|p| !p.is_valid()) {
        warn!(
            debt = %invalid.name,
            "Debt needs a positive balance, rate and minimum payment"
        );
        return Err(PlannerError::InfeasibleDebtSet);
    }

    let payments =
        Balance::checked_sum(positions.iter().map(|p| p.min_payment), "monthly payment")?;
    let total_payment = checked(payments.checked_add(extra_payment), "monthly payment")?;
    let mut total_interest = Balance::ZERO;
    for position in positions {
        total_interest = checked(
            total_interest.checked_add(position.monthly_interest()?),
            "monthly interest",
        )?;
    }

    if total_payment <= total_interest {
        warn!(
            %total_payment,
            %total_interest,
            "It is not possible to pay off the debts"
        );
        return Err(PlannerError::InfeasibleDebtSet);
    }
    debug!(%total_payment, %total_interest, "Debts can be paid off");
    Ok(())
}

fn checked(value: Option<Balance>, what: &'static str) -> Result<Balance> {
    value.ok_or(PlannerError::ArithmeticOverflow(what))
}
