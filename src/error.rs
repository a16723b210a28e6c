use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("The debts cannot be paid off with current inputs")]
    InfeasibleDebtSet,
    #[error("Simulation exceeded the limit of {max_months} months")]
    SimulationLimitExceeded { max_months: u32 },
    #[error("Repayment calculation did not finish within {timeout_ms} ms")]
    TimedOut { timeout_ms: u128 },
    #[error("Arithmetic overflow while computing {0}")]
    ArithmeticOverflow(&'static str),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
