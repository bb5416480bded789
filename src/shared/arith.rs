//! Fixed-precision arithmetic over decimal strings.
//!
//! All math uses `rust_decimal::Decimal` for exact arithmetic — monetary
//! values never pass through binary floats. Results are rounded to the
//! ledger's 7 fractional digits and trailing zeros are stripped.

use std::fmt;

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::TRADE_DECIMALS;

/// Errors from deriving one offer field out of the others.
///
/// Callers treat these as "derivation unavailable": the input the user is
/// typing stands, nothing else changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    InvalidDecimal { input: String },
    DivisionByZero,
    Overflow { context: &'static str },
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::InvalidDecimal { input } => {
                write!(f, "Invalid decimal '{}'", input)
            }
            ArithmeticError::DivisionByZero => write!(f, "Division by zero"),
            ArithmeticError::Overflow { context } => write!(f, "Overflow: {}", context),
        }
    }
}

impl std::error::Error for ArithmeticError {}

fn parse(input: &str) -> Result<Decimal, ArithmeticError> {
    Decimal::from_str(input.trim()).map_err(|_| ArithmeticError::InvalidDecimal {
        input: input.to_string(),
    })
}

/// Round half-away-from-zero to the tradable precision and strip trailing
/// zeros, so `1.5000000` renders as `1.5`.
fn cap(value: Decimal, digits: u32) -> Decimal {
    value
        .round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// `a * b` at 7-digit precision.
pub fn multiply(a: &str, b: &str) -> Result<String, ArithmeticError> {
    let product = parse(a)?
        .checked_mul(parse(b)?)
        .ok_or(ArithmeticError::Overflow { context: "a * b" })?;
    Ok(cap(product, TRADE_DECIMALS).to_string())
}

/// `a / b` at 7-digit precision. A zero divisor is a dedicated error so
/// the form can distinguish it from garbage input.
pub fn divide(a: &str, b: &str) -> Result<String, ArithmeticError> {
    let divisor = parse(b)?;
    if divisor.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    let quotient = parse(a)?
        .checked_div(divisor)
        .ok_or(ArithmeticError::Overflow { context: "a / b" })?;
    Ok(cap(quotient, TRADE_DECIMALS).to_string())
}

/// Re-render a decimal string capped at `digits` fractional digits
/// (default: the tradable precision). Idempotent.
pub fn to_fixed_digits(input: &str, digits: Option<u32>) -> Result<String, ArithmeticError> {
    let digits = digits.unwrap_or(TRADE_DECIMALS);
    Ok(cap(parse(input)?, digits).to_string())
}

/// Whether `input` is a well-formed positive amount the ledger can hold:
/// a positive decimal with at most 7 fractional digits.
pub fn is_valid_amount(input: &str) -> bool {
    match Decimal::from_str(input.trim()) {
        Ok(value) => value > Decimal::ZERO && value.normalize().scale() <= TRADE_DECIMALS,
        Err(_) => false,
    }
}
