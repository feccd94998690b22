use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::ToPrimitive,
};

use crate::EngineError;

/// Money amount as an exact decimal.
///
/// Records only ever hold positive amounts, but parsing is signed so the
/// entry form can tell "not a number" apart from "not positive". No
/// precision is dropped: whatever scale was typed or stored is kept.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let amount = Amount::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator and
/// exponent notation):
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!("10".parse::<Amount>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Amount>().unwrap().cents(), 1050);
/// assert_eq!("12.345".parse::<Amount>().unwrap().to_string(), "12.345");
/// assert_eq!("1e-05".parse::<Amount>().unwrap().to_string(), "0.00001");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub fn new(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The value in cents, rounded half-to-even.
    #[must_use]
    pub fn cents(self) -> i64 {
        (self.0.round_dp(2) * Decimal::ONE_HUNDRED)
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whole units, rounded to the nearest unit and clamped at zero.
    ///
    /// Chart widgets only take unsigned integers.
    #[must_use]
    pub fn whole_units(self) -> u64 {
        self.0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .unwrap_or(0)
    }

    /// Lossy conversion used where a float is the only option
    /// (spreadsheet cells, pie slice ratios).
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

/// At least two decimals; extra significant digits are kept.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = if self.0.is_zero() {
            Decimal::ZERO
        } else {
            self.0.normalize()
        };
        if value.scale() < 2 {
            write!(f, "{value:.2}")
        } else {
            write!(f, "{value}")
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses a decimal string.
    ///
    /// Accepts `.` or `,` as decimal separator, an optional leading `+`/`-`
    /// and an optional exponent (`1e-05`). `"5."` and `".5"` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EngineError::InvalidAmount(format!("{reason}: \"{s}\""));

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        if rest.is_empty() {
            return Err(invalid("empty amount"));
        }

        let rest = rest.replace(',', ".");
        let (mantissa, exponent) = match rest.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().map_err(|_| invalid("not a number"))?;
                (mantissa, Some(exponent))
            }
            None => (rest.as_str(), None),
        };

        let (units, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (units.is_empty() && frac.is_empty()) || !digits_only(units) || !digits_only(frac) {
            return Err(invalid("not a number"));
        }
        let units = if units.is_empty() { "0" } else { units };
        let plain = if frac.is_empty() {
            units.to_string()
        } else {
            format!("{units}.{frac}")
        };

        let value = match exponent {
            None => Decimal::from_str_exact(&plain),
            Some(exponent) => Decimal::from_scientific(&format!("{plain}e{exponent}")),
        }
        .map_err(|_| invalid("amount out of range"))?;

        Ok(Amount(if negative { -value } else { value }))
    }
}
