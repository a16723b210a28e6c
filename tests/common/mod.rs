#![allow(dead_code)]

use debtplan::domain::debt::Debt;
use debtplan::domain::money::{Balance, Percent};
use rand::Rng;
use rust_decimal::Decimal;
use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes a debts CSV with the standard header to a temporary file.
pub fn debts_csv(rows: &[[&str; 4]]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    {
        let mut wtr = csv::Writer::from_writer(file.as_file_mut());
        wtr.write_record(["name", "amount", "interest_rate", "min_payment"])?;
        for row in rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
    }
    file.flush()?;
    Ok(file)
}

/// Writes `count` debts whose minimum payments barely clear the interest,
/// so each one takes several hundred months to repay.
pub fn slow_debts_csv(count: usize) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    {
        let mut wtr = csv::Writer::from_writer(file.as_file_mut());
        wtr.write_record(["name", "amount", "interest_rate", "min_payment"])?;
        for i in 0..count {
            wtr.write_record([format!("debt-{i}").as_str(), "10000", "12", "100.2"])?;
        }
        wtr.flush()?;
    }
    file.flush()?;
    Ok(file)
}

pub fn debt(name: &str, amount: Decimal, rate: Decimal, min_payment: Decimal) -> Debt {
    Debt::new(
        name,
        Balance::new(amount),
        Percent::new(rate),
        Balance::new(min_payment),
    )
}

/// A random batch where every minimum payment clears its first month of
/// interest by a margin.
pub fn random_batch<R: Rng>(rng: &mut R) -> Vec<Debt> {
    let size = rng.gen_range(1..=5);
    (0..size)
        .map(|i| {
            let amount = Decimal::from(rng.gen_range(100..=20_000i64));
            let rate = Decimal::from(rng.gen_range(1..=30i64));
            let interest = amount * rate / Decimal::from(1200);
            let min_payment =
                (interest * Decimal::new(15, 1) + Decimal::from(rng.gen_range(5..=100i64))).round_dp(2);
            debt(&format!("debt-{i}"), amount, rate, min_payment)
        })
        .collect()
}
