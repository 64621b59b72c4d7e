use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{EngineError, ResultEngine};

/// Number of fractional digits every finalized amount carries.
pub const MONEY_SCALE: u32 = 2;

/// A monetary value as it arrives at the engine boundary.
///
/// Donation amounts come from several places (the database, CSV imports,
/// admin input) and not all of them are exact. `RawAmount` keeps the original
/// representation so that each consumer decides how to handle a value that
/// cannot be normalized.
///
/// # Examples
///
/// ```rust
/// use engine::{RawAmount, money};
///
/// let amount = money::normalize(&RawAmount::from(10.1)).unwrap();
/// assert_eq!(amount.to_string(), "10.10");
///
/// let amount = money::normalize(&RawAmount::from("10.005")).unwrap();
/// assert_eq!(amount.to_string(), "10.01");
///
/// assert!(money::normalize(&RawAmount::from("ten")).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RawAmount {
    /// Already an exact decimal.
    Exact(Decimal),
    /// Binary floating point, parsed through its shortest decimal representation.
    Float(f64),
    /// Free text, e.g. a database TEXT column or a CSV cell.
    Text(String),
    /// Absent value, treated as zero.
    #[default]
    Missing,
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
            Self::Missing => f.write_str("<missing>"),
        }
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        Self::Exact(value)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<RawAmount>> From<Option<T>> for RawAmount {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Normalizes an amount into an exact value with two fractional digits.
///
/// Rounding is half-up (away from zero on ties), so `0.005` becomes `0.01`
/// and `-0.005` becomes `-0.01`. Missing values and empty text are zero.
/// Floats go through their shortest decimal string first, so `10.1_f64`
/// yields `10.10` and never `10.09`.
pub fn normalize(raw: &RawAmount) -> ResultEngine<Decimal> {
    let value = match raw {
        RawAmount::Exact(value) => *value,
        RawAmount::Float(value) => {
            if !value.is_finite() {
                return Err(EngineError::InvalidAmount(format!(
                    "non-finite amount {value}"
                )));
            }
            parse_decimal(&value.to_string())?
        }
        RawAmount::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Decimal::ZERO
            } else {
                parse_decimal(trimmed)?
            }
        }
        RawAmount::Missing => Decimal::ZERO,
    };

    Ok(round_money(value))
}

/// Same as [`normalize`], but substitutes zero for a malformed amount.
///
/// Used by the document paths (statements, breakdowns), where a single bad
/// row must not prevent the document from being produced.
pub fn normalize_or_zero(raw: &RawAmount) -> Decimal {
    match normalize(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("substituting zero for malformed amount {raw}: {err}");
            zero()
        }
    }
}

/// Rounds half-up to [`MONEY_SCALE`] digits and fixes the scale.
///
/// A zero result is always the positive `0.00`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return zero();
    }
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Renders an amount as a fixed two-digit string (`"175.00"`).
pub fn format_money(value: Decimal) -> String {
    round_money(value).to_string()
}

/// `0.00`
pub fn zero() -> Decimal {
    Decimal::new(0, MONEY_SCALE)
}

fn parse_decimal(text: &str) -> ResultEngine<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| EngineError::InvalidAmount(format!("cannot parse amount '{text}'")))
}
