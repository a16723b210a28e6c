use crate::domain::budget::Expense;
use crate::error::{PlannerError, Result};
use std::io::Read;

/// Reads budget expenses from a CSV source with a `name,category,amount` header.
pub struct ExpenseReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ExpenseReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    pub fn expenses(self) -> impl Iterator<Item = Result<Expense>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PlannerError::from))
    }
}
