use clap::{Parser, Subcommand};
use debtplan::application::budget::BudgetPlanner;
use debtplan::application::engine::AmortizationEngine;
use debtplan::config::PlannerConfig;
use debtplan::domain::debt::Debt;
use debtplan::domain::money::Balance;
use debtplan::domain::plan::CalculationResult;
use debtplan::error::PlannerError;
use debtplan::interfaces::csv::debt_reader::DebtReader;
use debtplan::interfaces::csv::expense_reader::ExpenseReader;
use debtplan::interfaces::csv::report_writer::{OutputFormat, ReportWriter};
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for results
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate repayment of the debts in a CSV file
    Repay {
        /// Debts CSV file (name,amount,interest_rate,min_payment)
        input: PathBuf,

        /// Extra amount paid every month on top of the minimum payments
        #[arg(long, default_value_t = Decimal::ZERO)]
        extra: Decimal,

        /// TOML file with planner settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Give up after this many simulated months (overrides the config file)
        #[arg(long)]
        max_months: Option<u32>,

        /// Abort the calculation after this many milliseconds (overrides the config file)
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Print the debt to pay off first
    Priority {
        /// Debts CSV file (name,amount,interest_rate,min_payment)
        input: PathBuf,
    },
    /// Summarise a monthly budget
    Budget {
        /// Expenses CSV file (name,category,amount)
        input: PathBuf,

        /// Monthly budget to allocate
        #[arg(long, default_value_t = Decimal::ZERO)]
        budget: Decimal,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock(), cli.format);

    match cli.command {
        Command::Repay {
            input,
            extra,
            config,
            max_months,
            timeout_ms,
        } => {
            let mut config = match config {
                Some(path) => {
                    info!("Loading configuration from {}", path.display());
                    PlannerConfig::from_file(path).into_diagnostic()?
                }
                None => PlannerConfig::default(),
            };
            if let Some(max_months) = max_months {
                config.max_months = max_months;
            }
            if timeout_ms.is_some() {
                config.timeout_ms = timeout_ms;
            }
            config.validate().into_diagnostic()?;

            let debts = read_debts(input)?;
            let result = run_repayment(&config, debts, Balance::new(extra)).await?;
            writer.write_repayment(&result).into_diagnostic()?;
        }
        Command::Priority { input } => {
            let debts = read_debts(input)?;
            let name = AmortizationEngine::new()
                .priority_payment(&debts)
                .into_diagnostic()?;
            writer.write_priority(name).into_diagnostic()?;
        }
        Command::Budget { input, budget } => {
            let file = File::open(input).into_diagnostic()?;
            let mut planner = BudgetPlanner::new(Balance::new(budget));
            for expense in ExpenseReader::new(file).expenses() {
                let expense = expense.into_diagnostic()?;
                let name = expense.name.clone();
                if !planner.add_expense(expense).into_diagnostic()? {
                    warn!(expense = %name, "Duplicate expense ignored");
                }
            }
            let summary = planner.summary().into_diagnostic()?;
            writer.write_budget(&summary).into_diagnostic()?;
        }
    }

    Ok(())
}

/// Reads the whole debt batch. A malformed row rejects the batch, since
/// dropping a debt would change the plan.
fn read_debts(input: PathBuf) -> Result<Vec<Debt>> {
    let file = File::open(input).into_diagnostic()?;
    DebtReader::new(file).read_all().into_diagnostic()
}

/// Runs the calculation off the async runtime. The engine enforces the
/// configured timeout itself, so the blocking task ends when it fires.
async fn run_repayment(
    config: &PlannerConfig,
    debts: Vec<Debt>,
    extra_payment: Balance,
) -> Result<CalculationResult> {
    let engine = AmortizationEngine::from_config(config).into_diagnostic()?;
    let task =
        tokio::task::spawn_blocking(move || engine.calculate_repayment(&debts, extra_payment));

    match task.await.into_diagnostic()? {
        Ok(result) => Ok(result),
        Err(PlannerError::InfeasibleDebtSet) => Err(miette!(
            help = "raise the minimum payments or the extra payment",
            "The debts cannot be paid off with current inputs"
        )),
        Err(e @ PlannerError::TimedOut { .. }) => Err(miette!(
            help = "raise --timeout-ms or split the batch",
            "{}",
            e
        )),
        Err(e) => Err(e).into_diagnostic(),
    }
}
