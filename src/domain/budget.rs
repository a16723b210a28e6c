use super::money::Balance;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Category {
    Groceries,
    Investing,
    Savings,
    #[serde(rename = "Emergency fund")]
    EmergencyFund,
    #[serde(rename = "Debt repayment")]
    DebtRepayment,
    Utilities,
    Mortgage,
    Rent,
    Other,
    Transport,
    Entertainment,
}

impl Category {
    /// Every category, in the order summaries report them.
    pub const ALL: [Category; 11] = [
        Category::Groceries,
        Category::Investing,
        Category::Savings,
        Category::EmergencyFund,
        Category::DebtRepayment,
        Category::Utilities,
        Category::Mortgage,
        Category::Rent,
        Category::Other,
        Category::Transport,
        Category::Entertainment,
    ];

    /// Money set aside rather than spent.
    pub fn is_saving(&self) -> bool {
        matches!(self, Category::Investing | Category::Savings)
    }

    pub fn is_spending(&self) -> bool {
        !self.is_saving() && *self != Category::EmergencyFund
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Investing => "Investing",
            Category::Savings => "Savings",
            Category::EmergencyFund => "Emergency fund",
            Category::DebtRepayment => "Debt repayment",
            Category::Utilities => "Utilities",
            Category::Mortgage => "Mortgage",
            Category::Rent => "Rent",
            Category::Other => "Other",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single budget line.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Expense {
    pub name: String,
    pub category: Category,
    pub amount: Balance,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Balance,
}

/// Aggregated view of a budget and its expenses.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct BudgetSummary {
    pub budget: Balance,
    /// Everything except savings, investing and the emergency fund.
    pub spend: Balance,
    /// Savings plus investing.
    pub saved: Balance,
    pub emergency_fund: Balance,
    /// Budget left after spending. Zero while no budget is set.
    pub available: Balance,
    /// Everything allocated, including what is still available, minus the
    /// budget. Equals `saved + emergency_fund` once a budget is set.
    pub true_total: Balance,
    pub by_category: Vec<CategoryTotal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_expense_deserialization_with_spaced_category() {
        let csv = "name, category, amount\nrainy day, Emergency fund, 150.0";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let mut iter = reader.deserialize();

        let result: Expense = iter.next().unwrap().unwrap();
        assert_eq!(result.category, Category::EmergencyFund);
        assert_eq!(result.amount, Balance::new(dec!(150.0)));
    }

    #[test]
    fn test_category_classification() {
        assert!(Category::Savings.is_saving());
        assert!(Category::Investing.is_saving());
        assert!(!Category::EmergencyFund.is_saving());
        assert!(!Category::EmergencyFund.is_spending());
        assert!(Category::DebtRepayment.is_spending());
        assert!(Category::Rent.is_spending());
        assert!(Category::Groceries.is_spending());
    }

    #[test]
    fn test_groceries_deserialization() {
        let csv = "name,category,amount\nweekly shop,Groceries,85.50";
        let mut reader = csv::Reader::from_reader(csv.as_bytes());

        let result: Expense = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(result.category, Category::Groceries);
    }

    #[test]
    fn test_category_label_matches_serde_name() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }
}
