//! Arbitrary-precision decimal numbers.
//!
//! A [`Decimal`] stores `mantissa * 10^(-scale)` with an unbounded integer mantissa. Addition,
//! subtraction, multiplication and integer powers are exact. Division is the only operation that
//! rounds, and it does so to an explicit number of significant digits (round-half-even).
//!
//! Probabilities that sit within `1e-10` of one lose all their significance in `f64` once raised
//! to a few thousand. With this type, `(1 - 1e-10)^3200` is represented with all of its 32000
//! digits, and `1 - p` is exact.

use std::{
    cmp::Ordering,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub},
    str::FromStr,
};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error thrown by decimal parsing or division.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    /// The string is not a decimal literal.
    #[error("Cannot parse `{0}` as a decimal number.")]
    Parse(String),
    /// Attempted to divide by zero.
    #[error("Division by zero.")]
    DivisionByZero,
}

/// Largest power of ten a parsed literal may scale its digits by, in either direction: `1e-1000`
/// and `1e1000` parse, `1e-1001` does not. Beyond that, every later operation on the value would
/// align to an enormous power of ten.
pub const MAX_PARSE_EXPONENT: usize = 1000;

/// Exact decimal number `mantissa * 10^(-scale)`.
#[derive(Clone, Debug, Default)]
pub struct Decimal {
    mantissa: BigInt,
    scale: usize,
}

/// `10^exp` as a big integer.
fn ten_pow(exp: usize) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exp)
}

/// Number of decimal digits of `|m|`. Zero has one digit.
fn num_digits(m: &BigInt) -> usize {
    if m.is_zero() {
        return 1;
    }
    let abs = m.abs();
    // estimate from the bit length, then correct by at most one in either direction
    let mut digits = ((abs.bits() - 1) as f64 * std::f64::consts::LOG10_2) as usize + 1;
    while digits > 1 && abs < ten_pow(digits - 1) {
        digits -= 1;
    }
    while abs >= ten_pow(digits) {
        digits += 1;
    }
    digits
}

/// `numerator / denominator`, rounded half-even to an integer.
fn div_round_half_even(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    let (quotient, remainder) = numerator.div_rem(denominator);
    if remainder.is_zero() {
        return quotient;
    }
    let away = if numerator.is_negative() == denominator.is_negative() {
        BigInt::one()
    } else {
        -BigInt::one()
    };
    match (remainder.abs() * 2u32).cmp(&denominator.abs()) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + away,
        Ordering::Equal if quotient.is_even() => quotient,
        Ordering::Equal => quotient + away,
    }
}

/// Bring both mantissas to the larger of the two scales.
fn align(a: &Decimal, b: &Decimal) -> (BigInt, BigInt, usize) {
    let scale = a.scale.max(b.scale);
    (a.mantissa_at(scale), b.mantissa_at(scale), scale)
}

impl Decimal {
    /// Create the decimal `mantissa * 10^(-scale)`.
    pub fn new(mantissa: impl Into<BigInt>, scale: usize) -> Self {
        Self {
            mantissa: mantissa.into(),
            scale,
        }
    }

    /// Exact `10^exp`, for positive and negative exponents. The result holds `|exp|` digits, so
    /// untrusted exponents must go through [`FromStr`] instead, which enforces
    /// [`MAX_PARSE_EXPONENT`].
    pub fn pow10(exp: i32) -> Self {
        if exp >= 0 {
            Self::new(ten_pow(exp as usize), 0)
        } else {
            Self::new(1u32, exp.unsigned_abs() as usize)
        }
    }

    /// The unscaled integer value.
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Number of digits after the decimal point in the internal representation.
    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Mantissa expressed at a larger (or equal) scale.
    fn mantissa_at(&self, scale: usize) -> BigInt {
        debug_assert!(scale >= self.scale);
        if scale == self.scale {
            self.mantissa.clone()
        } else {
            &self.mantissa * ten_pow(scale - self.scale)
        }
    }

    /// Exact integer power.
    pub fn pow(&self, exp: u32) -> Self {
        Self {
            mantissa: self.mantissa.pow(exp),
            scale: self.scale * exp as usize,
        }
    }

    /// Strip trailing zeros after the decimal point without changing the value.
    pub fn normalized(&self) -> Self {
        if self.mantissa.is_zero() {
            return Self::zero();
        }
        let ten = BigInt::from(10u32);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        // every trailing decimal zero is also a trailing binary zero
        let bound = mantissa.trailing_zeros().unwrap_or(0) as usize;
        for _ in 0..bound.min(self.scale) {
            let (quotient, remainder) = mantissa.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            mantissa = quotient;
            scale -= 1;
        }
        Self { mantissa, scale }
    }

    /// Round to `digits` significant digits (half-even). Values that already fit are returned
    /// unchanged.
    pub fn round_significant(&self, digits: usize) -> Self {
        let digits = digits.max(1);
        let len = num_digits(&self.mantissa);
        if len <= digits {
            return self.clone();
        }
        let drop = len - digits;
        let mantissa = div_round_half_even(&self.mantissa, &ten_pow(drop));
        if drop <= self.scale {
            Self {
                mantissa,
                scale: self.scale - drop,
            }
        } else {
            Self {
                mantissa: mantissa * ten_pow(drop - self.scale),
                scale: 0,
            }
        }
    }

    /// Divide by `rhs`, rounding the quotient to `digits` significant digits (half-even).
    pub fn checked_div(&self, rhs: &Self, digits: usize) -> Result<Self, DecimalError> {
        if rhs.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let digits = digits.max(1);

        // a / b = (ma * 10^sb) / (mb * 10^sa)
        let numerator = &self.mantissa * ten_pow(rhs.scale);
        let denominator = &rhs.mantissa * ten_pow(self.scale);

        // choose the shift such that the integer quotient has `digits` (or `digits + 1`) digits
        let mut shift =
            digits as i64 + num_digits(&denominator) as i64 - num_digits(&numerator) as i64;
        let (num, mut den) = if shift >= 0 {
            (numerator * ten_pow(shift as usize), denominator)
        } else {
            (numerator, denominator * ten_pow(shift.unsigned_abs() as usize))
        };
        if (&num / &den).abs() >= ten_pow(digits) {
            den *= 10u32;
            shift -= 1;
        }

        let quotient = div_round_half_even(&num, &den);
        Ok(if shift >= 0 {
            Self::new(quotient, shift as usize)
        } else {
            Self::new(quotient * ten_pow(shift.unsigned_abs() as usize), 0)
        })
    }

    /// Render in scientific notation with at most `digits` significant digits, e.g. `3.2E-7`.
    pub fn to_scientific(&self, digits: usize) -> String {
        let rounded = self.round_significant(digits).normalized();
        let sign = if rounded.is_negative() { "-" } else { "" };
        let body = rounded.mantissa.abs().to_string();
        let adjusted = body.len() as i64 - 1 - rounded.scale as i64;
        let (lead, rest) = body.split_at(1);
        // integers keep their trailing zeros in the mantissa
        let rest = rest.trim_end_matches('0');
        if rest.is_empty() {
            format!("{sign}{lead}E{adjusted:+}")
        } else {
            format!("{sign}{lead}.{rest}E{adjusted:+}")
        }
    }

    /// Render with at most `digits` significant digits. Plain notation is used unless the value
    /// is smaller than `1e-6`, in which case the scientific form is returned.
    pub fn format_significant(&self, digits: usize) -> String {
        let rounded = self.round_significant(digits).normalized();
        let adjusted = num_digits(&rounded.mantissa) as i64 - 1 - rounded.scale as i64;
        if rounded.is_zero() || adjusted >= -6 {
            rounded.to_string()
        } else {
            rounded.to_scientific(digits)
        }
    }
}

impl Zero for Decimal {
    fn zero() -> Self {
        Self::new(0u32, 0)
    }

    fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }
}

impl One for Decimal {
    fn one() -> Self {
        Self::new(1u32, 0)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self::new(value, 0)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::new(value, 0)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::new(value, 0)
    }
}

impl From<usize> for Decimal {
    fn from(value: usize) -> Self {
        Self::new(value, 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.mantissa.cmp(&other.mantissa);
        }
        let (a, b, _) = align(self, other);
        a.cmp(&b)
    }
}

impl<'b> Add<&'b Decimal> for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &'b Decimal) -> Decimal {
        let (a, b, scale) = align(self, rhs);
        Decimal::new(a + b, scale)
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        &self + &rhs
    }
}

impl AddAssign<&Decimal> for Decimal {
    fn add_assign(&mut self, rhs: &Decimal) {
        *self = &*self + rhs;
    }
}

impl<'b> Sub<&'b Decimal> for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &'b Decimal) -> Decimal {
        let (a, b, scale) = align(self, rhs);
        Decimal::new(a - b, scale)
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        &self - &rhs
    }
}

impl<'b> Mul<&'b Decimal> for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &'b Decimal) -> Decimal {
        Decimal::new(&self.mantissa * &rhs.mantissa, self.scale + rhs.scale)
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        &self * &rhs
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.mantissa, self.scale)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::zero(), |mut acc, x| {
            acc += x;
            acc
        })
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::zero(), |mut acc, x| {
            acc += &x;
            acc
        })
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    /// Parse plain (`0.001`, `-2.5`) or scientific (`1e-10`, `3.2E+3`) literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DecimalError::Parse(s.to_string());
        let literal = s.trim();

        let (body, exponent) = match literal.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => (
                &literal[..i],
                literal[i + 1..].parse::<i64>().map_err(|_| err())?,
            ),
            None => (literal, 0),
        };
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body.strip_prefix('+').unwrap_or(body)),
        };
        let (int, frac) = body.split_once('.').unwrap_or((body, ""));
        if (int.is_empty() && frac.is_empty())
            || !int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(err());
        }

        let mut mantissa: BigInt = format!("{int}{frac}").parse().map_err(|_| err())?;
        if negative {
            mantissa = -mantissa;
        }
        let scale = i64::try_from(frac.len())
            .ok()
            .and_then(|len| len.checked_sub(exponent))
            .filter(|scale| scale.unsigned_abs() <= MAX_PARSE_EXPONENT as u64)
            .ok_or_else(err)?;
        Ok(if scale >= 0 {
            Self::new(mantissa, scale as usize)
        } else {
            Self::new(mantissa * ten_pow(scale.unsigned_abs() as usize), 0)
        })
    }
}

/// Exact value in plain notation.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.mantissa.abs().to_string();
        if self.scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        if digits.len() > self.scale {
            let (int, frac) = digits.split_at(digits.len() - self.scale);
            write!(f, "{sign}{int}.{frac}")
        } else {
            let zeros = "0".repeat(self.scale - digits.len());
            write!(f, "{sign}0.{zeros}{digits}")
        }
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DecimalVisitor;

        impl de::Visitor<'_> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal number, or a string containing one")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
                Ok(Decimal::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
                Ok(Decimal::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
                if !v.is_finite() {
                    return Err(E::custom(format!("{v} is not a finite number")));
                }
                // shortest round-trip representation, never in exponent form
                v.to_string().parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(DecimalVisitor)
    }
}
