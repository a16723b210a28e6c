use crate::domain::budget::{BudgetSummary, Category, CategoryTotal, Expense};
use crate::domain::money::Balance;
use crate::error::{PlannerError, Result};
use tracing::{debug, instrument};

/// Tracks a monthly budget and the expenses allocated against it.
#[derive(Debug, Default, Clone)]
pub struct BudgetPlanner {
    budget: Balance,
    expenses: Vec<Expense>,
}

impl BudgetPlanner {
    pub fn new(budget: Balance) -> Self {
        Self {
            budget,
            expenses: Vec::new(),
        }
    }

    pub fn set_budget(&mut self, budget: Balance) {
        self.budget = budget;
    }

    pub fn budget(&self) -> Balance {
        self.budget
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Adds an expense to the plan.
    ///
    /// Returns `Ok(false)` when an expense with the same name already exists;
    /// the first entry is kept.
    pub fn add_expense(&mut self, expense: Expense) -> Result<bool> {
        if expense.name.trim().is_empty() {
            return Err(PlannerError::ValidationError(
                "Expense name cannot be empty".to_string(),
            ));
        }
        if expense.amount == Balance::ZERO {
            return Err(PlannerError::ValidationError(format!(
                "Expense '{}' has no amount",
                expense.name
            )));
        }
        if self.expenses.iter().any(|e| e.name == expense.name) {
            debug!(expense = %expense.name, "Duplicate expense ignored");
            return Ok(false);
        }

        debug!(expense = %expense.name, category = %expense.category, "Added expense");
        self.expenses.push(expense);
        Ok(true)
    }

    /// Totals the expenses per category and against the budget.
    ///
    /// Amounts are summed with checked arithmetic, so absurd inputs fail with
    /// [`PlannerError::ArithmeticOverflow`] instead of panicking.
    #[instrument(skip_all, fields(expenses = self.expenses.len()))]
    pub fn summary(&self) -> Result<BudgetSummary> {
        let by_category = Category::ALL
            .iter()
            .map(|&category| {
                let amounts = self
                    .expenses
                    .iter()
                    .filter(|e| e.category == category)
                    .map(|e| e.amount);
                Ok(CategoryTotal {
                    category,
                    amount: Balance::checked_sum(amounts, "category total")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let total_where = |keep: fn(&Category) -> bool, what: &'static str| {
            let amounts = by_category
                .iter()
                .filter(|t| keep(&t.category))
                .map(|t| t.amount);
            Balance::checked_sum(amounts, what)
        };
        let spend = total_where(Category::is_spending, "spend")?;
        let saved = total_where(Category::is_saving, "saved")?;
        let emergency_fund = total_where(|c| *c == Category::EmergencyFund, "emergency fund")?;

        let available = if self.budget == Balance::ZERO {
            Balance::ZERO
        } else {
            checked(self.budget.checked_sub(spend), "available")?
        };
        let allocated = Balance::checked_sum([spend, saved, emergency_fund, available], "total")?;
        let true_total = checked(allocated.checked_sub(self.budget), "total")?;
        debug!(%spend, %saved, %available, "Budget summarised");

        Ok(BudgetSummary {
            budget: self.budget,
            spend,
            saved,
            emergency_fund,
            available,
            true_total,
            by_category,
        })
    }
}

fn checked(value: Option<Balance>, what: &'static str) -> Result<Balance> {
    value.ok_or(PlannerError::ArithmeticOverflow(what))
}
