use crate::domain::budget::BudgetSummary;
use crate::domain::money::Balance;
use crate::domain::plan::CalculationResult;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Serialize)]
struct RepaymentRow<'a> {
    months: u32,
    monthly_payment: Balance,
    total_paid: Balance,
    total_interest_paid: Balance,
    priority: &'a str,
}

#[derive(Serialize)]
struct PriorityRow<'a> {
    priority: &'a str,
}

#[derive(Serialize)]
struct BudgetRow<'a> {
    item: &'a str,
    amount: Balance,
}

/// Writes calculation results to any `Write` sink as CSV or JSON.
pub struct ReportWriter<W: Write> {
    sink: W,
    format: OutputFormat,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W, format: OutputFormat) -> Self {
        Self { sink, format }
    }

    /// Writes a repayment result. The monthly payment is rounded to cents for
    /// display since corrected minimums can carry many decimal places.
    pub fn write_repayment(&mut self, result: &CalculationResult) -> Result<()> {
        let row = RepaymentRow {
            months: result.months,
            monthly_payment: result.monthly_payment.to_cents(),
            total_paid: result.total_paid,
            total_interest_paid: result.total_interest_paid,
            priority: &result.priority,
        };
        match self.format {
            OutputFormat::Csv => self.write_csv_rows([row]),
            OutputFormat::Json => self.write_json(&row),
        }
    }

    pub fn write_priority(&mut self, name: &str) -> Result<()> {
        let row = PriorityRow { priority: name };
        match self.format {
            OutputFormat::Csv => self.write_csv_rows([row]),
            OutputFormat::Json => self.write_json(&row),
        }
    }

    /// Writes one row per category followed by the summary totals.
    pub fn write_budget(&mut self, summary: &BudgetSummary) -> Result<()> {
        match self.format {
            OutputFormat::Csv => {
                let categories = summary.by_category.iter().map(|t| BudgetRow {
                    item: t.category.label(),
                    amount: t.amount,
                });
                let totals = [
                    ("Budget", summary.budget),
                    ("Spend", summary.spend),
                    ("Saved/Invested", summary.saved),
                    ("Emergency fund total", summary.emergency_fund),
                    ("Available", summary.available),
                    ("Total", summary.true_total),
                ]
                .into_iter()
                .map(|(item, amount)| BudgetRow { item, amount });
                self.write_csv_rows(categories.chain(totals))
            }
            OutputFormat::Json => self.write_json(summary),
        }
    }

    fn write_csv_rows<T: Serialize>(&mut self, rows: impl IntoIterator<Item = T>) -> Result<()> {
        let mut writer = csv::Writer::from_writer(&mut self.sink);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.sink, value)?;
        writeln!(self.sink)?;
        Ok(())
    }
}
