use crate::domain::debt::Debt;
use crate::error::{PlannerError, Result};
use std::io::Read;

/// Reads debts from a CSV source.
///
/// Expects a `name,amount,interest_rate,min_payment` header with the rate as
/// an annual percentage. Whitespace around fields is trimmed.
pub struct DebtReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DebtReader<R> {
    /// Creates a new `DebtReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes debts.
    pub fn debts(self) -> impl Iterator<Item = Result<Debt>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PlannerError::from))
    }

    /// Reads the whole batch, failing on the first malformed row.
    pub fn read_all(self) -> Result<Vec<Debt>> {
        self.debts().collect()
    }
}
